//! Generate operation - render the manifest into a project directory.

use std::path::Path;

use eyre::{Context, Result, bail};
use sprig_core::WriteResult;
use sprig_tree::{ProjectConfig, TemplateTree};
use tracing::{debug, info};

use super::Plan;
use crate::{
    bundle::{RefreshPolicy, TemplateSource},
    render::{RenderContext, Renderer},
    reports::GenerateReport,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory the project directory is created in.
    pub output_root: &'a Path,
    /// Where the templates come from.
    pub source: &'a dyn TemplateSource,
    /// Whether a cached bundle may be reused.
    pub refresh: RefreshPolicy,
    /// Renders one manifest entry.
    pub renderer: &'a dyn Renderer,
    /// Write into a non-empty project directory.
    pub force: bool,
}

/// Execute the generate operation.
///
/// Renders every manifest entry, in order, into `<output_root>/<file form>`.
/// The first failure stops the run; files already written are left in place.
pub fn generate(
    plan: &Plan,
    config: &ProjectConfig,
    tree: &TemplateTree,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let project_dir = opts.output_root.join(plan.forms.file());
    if !opts.force && is_non_empty_dir(&project_dir)? {
        bail!(
            "'{}' already exists and is not empty (use --force to write into it)",
            project_dir.display()
        );
    }

    let bundle = opts
        .source
        .fetch(opts.refresh)
        .wrap_err_with(|| format!("failed to fetch template bundle '{}'", opts.source.id()))?;
    let template_root = bundle.join(&tree.root);
    if !template_root.is_dir() {
        bail!(
            "template bundle has no '{}' directory (looked in '{}')",
            tree.root,
            template_root.display()
        );
    }

    let ctx = RenderContext::new(&plan.forms, config);
    let mut report = GenerateReport {
        title: plan.forms.title().to_string(),
        project_dir: project_dir.clone(),
        written: Vec::new(),
        skipped: Vec::new(),
    };

    for entry in &plan.manifest {
        let template = template_root.join(&entry.template_path);
        let output = project_dir.join(&entry.output_path);
        debug!(template = %entry.template_path, output = %entry.output_path, "rendering");

        let result = opts
            .renderer
            .render_and_write(&template, &output, &ctx)
            .wrap_err_with(|| format!("failed to generate '{}'", entry.output_path))?;

        match result {
            WriteResult::Written => report.written.push(entry.output_path.clone()),
            WriteResult::Skipped => report.skipped.push(entry.output_path.clone()),
        }
    }

    info!(
        project = %project_dir.display(),
        files = report.written.len(),
        "project generated"
    );
    Ok(report)
}

fn is_non_empty_dir(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if !path.is_dir() {
        bail!("'{}' exists and is not a directory", path.display());
    }
    let mut entries = std::fs::read_dir(path)
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
    Ok(entries.next().is_some())
}
