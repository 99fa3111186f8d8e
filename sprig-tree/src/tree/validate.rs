//! Load-time validation of tree descriptions.

use std::collections::HashSet;

use super::{TREE_VERSION, TemplateTree};
use crate::{Error, Result, error::SourceContext, expand::check_entry, placeholder};

/// Validate a parsed tree, attaching source spans to any error.
pub(crate) fn validate_tree(tree: &TemplateTree, ctx: &SourceContext) -> Result<()> {
    if tree.version != TREE_VERSION {
        return Err(Box::new(Error::UnsupportedVersion {
            version: tree.version,
            supported: TREE_VERSION,
        }));
    }

    if !is_slug(&tree.template_name, false) {
        return Err(ctx.validation_error(
            "template_name must be non-empty and use only a-z, 0-9 and '-'",
            &tree.template_name,
        ));
    }

    if !tree.root.is_empty() {
        if let Some(reason) = unsafe_path(&tree.root) {
            return Err(ctx.validation_error(format!("root {reason}"), &tree.root));
        }
    }

    check_vocabulary(&tree.flags, "flag", ctx)?;
    check_vocabulary(&tree.sections, "section", ctx)?;

    let mut templates = HashSet::new();
    let mut resolved = HashSet::new();
    for entry in &tree.files {
        check_entry(entry, tree).map_err(|e| ctx.locate(e))?;

        if let Some(reason) = unsafe_path(&entry.path) {
            return Err(ctx.validation_error(format!("path {reason}"), &entry.path));
        }
        if !templates.insert(entry.path.as_str()) {
            return Err(ctx.validation_error(
                format!("'{}' is listed more than once", entry.path),
                &entry.path,
            ));
        }
        // Template-side lookups must be unique too.
        let template_path = placeholder::substitute(&entry.path, &tree.template_name)
            .map_err(|token| ctx.locate(Error::unknown_placeholder(&entry.path, token)))?;
        if !resolved.insert(template_path.clone()) {
            return Err(ctx.validation_error(
                format!("'{}' resolves to template '{template_path}' more than once", entry.path),
                &entry.path,
            ));
        }
    }

    Ok(())
}

fn check_vocabulary(names: &[String], kind: &str, ctx: &SourceContext) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !is_slug(name, true) {
            return Err(ctx.validation_error(
                format!("{kind} '{name}' must use only a-z, 0-9, '-' and '_'"),
                name,
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(ctx.validation_error(format!("{kind} '{name}' is declared twice"), name));
        }
    }
    Ok(())
}

fn is_slug(s: &str, allow_underscore: bool) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_underscore && c == '_')
        })
}

/// Returns why a relative path is unsafe to join onto an output root.
fn unsafe_path(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return Some("cannot be empty");
    }
    if path.starts_with('/') || path.contains(':') {
        return Some("must be relative");
    }
    if path.contains('\\') {
        return Some("must use '/' as separator");
    }
    if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Some("cannot contain empty, '.' or '..' segments");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(src: &str) -> Result<TemplateTree> {
        TemplateTree::from_str_with_filename(src, "tree.toml")
    }

    fn message(err: Box<Error>) -> String {
        err.to_string()
    }

    #[test]
    fn test_unsupported_version() {
        let err = validate("version = 2\ntemplate_name = \"x\"").unwrap_err();
        assert!(matches!(
            *err,
            Error::UnsupportedVersion {
                version: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_bad_template_name() {
        let err = validate("version = 1\ntemplate_name = \"Plugin Name\"").unwrap_err();
        assert!(message(err).contains("template_name"));
    }

    #[test]
    fn test_duplicate_path() {
        let src = r#"
            version = 1
            template_name = "x"
            [[files]]
            path = "index.php"
            [[files]]
            path = "index.php"
        "#;
        assert!(message(validate(src).unwrap_err()).contains("more than once"));
    }

    #[test]
    fn test_template_side_collision() {
        let src = r#"
            version = 1
            template_name = "plugin-name"
            [[files]]
            path = "{name}.php"
            [[files]]
            path = "plugin-name.php"
        "#;
        assert!(message(validate(src).unwrap_err()).contains("resolves to template"));
    }

    #[test]
    fn test_unsafe_paths() {
        for path in ["/etc/passwd", "../up.php", "a//b.php", "a/./b.php", "C:/x", "a\\b"] {
            let src = format!(
                "version = 1\ntemplate_name = \"x\"\n[[files]]\npath = '{path}'\n"
            );
            assert!(validate(&src).is_err(), "{path}");
        }
    }

    #[test]
    fn test_bad_root() {
        let err = validate("version = 1\ntemplate_name = \"x\"\nroot = \"../bundle\"").unwrap_err();
        assert!(message(err).contains("root"));
    }

    #[test]
    fn test_vocabulary_rules() {
        let err = validate("version = 1\ntemplate_name = \"x\"\nflags = [\"CSS\"]").unwrap_err();
        assert!(message(err).contains("flag 'CSS'"));

        let err =
            validate("version = 1\ntemplate_name = \"x\"\nsections = [\"a\", \"a\"]").unwrap_err();
        assert!(message(err).contains("declared twice"));

        assert!(validate("version = 1\ntemplate_name = \"x\"\nsections = [\"on_boot\"]").is_ok());
    }

    #[test]
    fn test_unsafe_path_reasons() {
        assert_eq!(unsafe_path(""), Some("cannot be empty"));
        assert_eq!(unsafe_path("/x"), Some("must be relative"));
        assert_eq!(unsafe_path("admin/index.php"), None);
        assert_eq!(unsafe_path("{name}.php"), None);
    }
}
