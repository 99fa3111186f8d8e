//! Expansion of a template tree into a concrete file manifest.

use std::collections::HashSet;

use serde::Serialize;
use sprig_core::IdentifierForms;

use crate::{
    Error, ProjectConfig, Result, TagKind,
    placeholder,
    tree::{TemplateTree, TreeEntry},
};

/// One file to produce: where to read the template and where to write it.
///
/// Both paths are relative and `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ManifestEntry {
    /// Lookup path inside the template bundle's root
    pub template_path: String,
    /// Destination path inside the project directory
    pub output_path: String,
}

/// Check an entry's placeholders and tags against the tree's rules.
pub(crate) fn check_entry(entry: &TreeEntry, tree: &TemplateTree) -> Result<()> {
    placeholder::parse(&entry.path)
        .map_err(|token| Error::unknown_placeholder(&entry.path, token))?;

    for (kind, tag) in entry.tags() {
        if !tree.declares(kind, tag) {
            return Err(Error::conditional_tag(&entry.path, kind, tag));
        }
    }
    Ok(())
}

fn is_selected(entry: &TreeEntry, config: &ProjectConfig) -> bool {
    entry.tags().all(|(kind, tag)| match kind {
        TagKind::Flag => config.has_feature(tag),
        TagKind::Section => config.has_section(tag),
    })
}

/// Expand a tree into the ordered manifest for one project.
///
/// Every entry is checked before anything is produced, so a malformed tree
/// fails regardless of which flags are on. Entries keep the tree's order.
pub fn expand(
    forms: &IdentifierForms,
    config: &ProjectConfig,
    tree: &TemplateTree,
) -> Result<Vec<ManifestEntry>> {
    for entry in &tree.files {
        check_entry(entry, tree)?;
    }

    let mut outputs = HashSet::new();
    let mut manifest = Vec::new();
    for entry in tree.files.iter().filter(|e| is_selected(e, config)) {
        let substitute = |name: &str| {
            placeholder::substitute(&entry.path, name)
                .map_err(|token| Error::unknown_placeholder(&entry.path, token))
        };
        let output_path = substitute(forms.file())?;
        let template_path = substitute(&tree.template_name)?;

        if !outputs.insert(output_path.clone()) {
            return Err(Box::new(Error::OutputCollision { path: output_path }));
        }
        manifest.push(ManifestEntry {
            template_path,
            output_path,
        });
    }
    Ok(manifest)
}

/// Derive the identifier forms for `raw_name` and expand `tree` with them.
pub fn run_core_with(
    raw_name: &str,
    config: &ProjectConfig,
    tree: &TemplateTree,
) -> Result<Vec<ManifestEntry>> {
    let forms = sprig_core::derive(raw_name).map_err(|e| Box::new(Error::from(e)))?;
    expand(&forms, config, tree)
}

/// Produce the manifest for `raw_name` over the builtin tree.
pub fn run_core(raw_name: &str, config: &ProjectConfig) -> Result<Vec<ManifestEntry>> {
    run_core_with(raw_name, config, &TemplateTree::builtin()?)
}
