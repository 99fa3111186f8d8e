//! Check operation - template tree validation summary.

use sprig_tree::TemplateTree;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The tree has already been parsed and validated; this summarizes it.
pub fn check(tree: &TemplateTree, source: &str) -> CheckReport {
    let conditional = tree.files.iter().filter(|e| !e.is_unconditional()).count();
    CheckReport {
        source: source.to_string(),
        version: tree.version,
        template_name: tree.template_name.clone(),
        root: tree.root.clone(),
        flags: tree.flags.clone(),
        sections: tree.sections.clone(),
        files: tree.files.len(),
        conditional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_builtin() {
        let report = check(&TemplateTree::builtin().unwrap(), "builtin");
        assert_eq!(report.files, 21);
        assert_eq!(report.conditional, 10);
        assert_eq!(report.sections, ["admin", "activator", "deactivator", "uninstall"]);
    }
}
