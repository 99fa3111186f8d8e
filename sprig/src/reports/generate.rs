//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from scaffolding a project.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project title form.
    pub title: String,
    /// Directory the project was written to.
    pub project_dir: PathBuf,
    /// Files written, relative to the project directory.
    pub written: Vec<String>,
    /// Files left untouched because they already existed.
    pub skipped: Vec<String>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!(
            "Created {} in {}",
            self.title,
            self.project_dir.display()
        ));
        out.newline();

        out.section(&format!("Files ({})", self.written.len()));
        for path in &self.written {
            out.added_item(path);
        }

        if !self.skipped.is_empty() {
            out.newline();
            out.section("Skipped (already present)");
            for path in &self.skipped {
                out.list_item(path);
            }
        }
    }
}
