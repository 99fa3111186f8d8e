//! Tree description parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{TemplateTree, validate::validate_tree};
use crate::{Error, Result, error::SourceContext};

impl FromStr for TemplateTree {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "tree.toml")
    }
}

impl TemplateTree {
    /// Parse a tree description from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a tree description with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        let tree: Self = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
        validate_tree(&tree, &source_ctx)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::TagKind;

    const MINIMAL: &str = r#"
        version = 1
        template_name = "plugin-name"
        flags = ["css"]

        [[files]]
        path = "{name}.php"

        [[files]]
        path = "css/{name}.css"
        flag = "css"
    "#;

    #[test]
    fn test_parse_minimal() {
        let tree: TemplateTree = MINIMAL.parse().unwrap();
        assert_eq!(tree.root, "");
        assert_eq!(tree.files.len(), 2);
        assert_eq!(tree.files[1].flag.as_deref(), Some("css"));
        assert!(tree.sections.is_empty());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = TemplateTree::from_str("version = ").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let src = r#"
            version = 1
            template_name = "x"

            [[files]]
            path = "a.txt"
            when = "css"
        "#;
        assert!(matches!(
            *TemplateTree::from_str(src).unwrap_err(),
            Error::Parse { .. }
        ));
    }

    #[test]
    fn test_unknown_placeholder_located() {
        let src = r#"
            version = 1
            template_name = "x"

            [[files]]
            path = "{slug}.php"
        "#;
        match *TemplateTree::from_str(src).unwrap_err() {
            Error::UnknownPlaceholder {
                src, span, token, ..
            } => {
                assert_eq!(token, "slug");
                assert!(src.is_some());
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_undeclared_tag_located() {
        let src = r#"
            version = 1
            template_name = "x"
            sections = ["admin"]

            [[files]]
            path = "hooks.php"
            section = "hooks"
        "#;
        match *TemplateTree::from_str(src).unwrap_err() {
            Error::ConditionalTag { kind, tag, .. } => {
                assert_eq!(kind, TagKind::Section);
                assert_eq!(tag, "hooks");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let tree = TemplateTree::from_file(file.path()).unwrap();
        assert_eq!(tree.template_name, "plugin-name");
    }

    #[test]
    fn test_from_missing_file() {
        let err = TemplateTree::from_file("/definitely/not/here/tree.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
