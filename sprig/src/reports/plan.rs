//! Plan command report data structures.

use sprig_tree::ManifestEntry;

use super::output::{Output, Report};

/// The manifest that a run would render, without writing anything.
#[derive(Debug)]
pub struct PlanReport {
    /// Project title form.
    pub title: String,
    /// Directory the project would be created in.
    pub project_dir: String,
    /// Ordered manifest entries.
    pub manifest: Vec<ManifestEntry>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.title);
        out.key_value("Directory", &self.project_dir);
        out.newline();

        out.section(&format!("Files ({})", self.manifest.len()));
        for entry in &self.manifest {
            if entry.template_path == entry.output_path {
                out.list_item(&entry.output_path);
            } else {
                out.list_item(&format!("{}  <-  {}", entry.output_path, entry.template_path));
            }
        }
    }
}
