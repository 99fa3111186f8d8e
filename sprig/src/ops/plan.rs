//! Plan operation - derive the names and expand the manifest.

use sprig_core::IdentifierForms;
use sprig_tree::{Error, ManifestEntry, ProjectConfig, Result, TemplateTree, expand};

/// Everything decided before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub forms: IdentifierForms,
    pub manifest: Vec<ManifestEntry>,
}

/// Execute the plan operation.
///
/// Fails on a bad name or a malformed tree; nothing is written either way.
pub fn plan(config: &ProjectConfig, tree: &TemplateTree) -> Result<Plan> {
    let forms = sprig_core::derive(&config.name).map_err(|e| Box::new(Error::from(e)))?;
    let manifest = expand(&forms, config, tree)?;
    Ok(Plan { forms, manifest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_matches_run_core() {
        let config = ProjectConfig::new("Shop Helper").with_admin(false);
        let tree = TemplateTree::builtin().unwrap();

        let plan = plan(&config, &tree).unwrap();

        assert_eq!(plan.forms.file(), "shop-helper");
        assert_eq!(plan.manifest, sprig_tree::run_core("Shop Helper", &config).unwrap());
    }

    #[test]
    fn test_plan_rejects_bad_name() {
        let config = ProjectConfig::new("   ");
        let err = plan(&config, &TemplateTree::builtin().unwrap()).unwrap_err();
        assert!(matches!(*err, Error::InvalidName(_)));
    }
}
