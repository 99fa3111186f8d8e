//! Check command report data structures.

use super::output::{Output, Report};

/// Summary of a validated template tree.
#[derive(Debug)]
pub struct CheckReport {
    /// Where the tree came from (file path or "builtin").
    pub source: String,
    /// Description format version.
    pub version: u32,
    /// Template-side name literal.
    pub template_name: String,
    /// Bundle subdirectory holding the templates.
    pub root: String,
    /// Declared feature flags.
    pub flags: Vec<String>,
    /// Declared optional sections.
    pub sections: Vec<String>,
    /// Number of file entries.
    pub files: usize,
    /// Entries gated by a flag or section.
    pub conditional: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.source));
        out.newline();
        out.key_value_indented("version", &self.version.to_string());
        out.key_value_indented("template name", &self.template_name);
        if !self.root.is_empty() {
            out.key_value_indented("root", &self.root);
        }
        out.key_value_indented("flags", &join_or_none(&self.flags));
        out.key_value_indented("sections", &join_or_none(&self.sections));
        out.key_value_indented(
            "files",
            &format!("{} ({} conditional)", self.files, self.conditional),
        );
    }
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
