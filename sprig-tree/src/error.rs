use std::{fmt, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for sprig-tree operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Which vocabulary a conditional tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// A feature flag, e.g. `css`
    Flag,
    /// An optional section, e.g. `admin`
    Section,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Flag => "flag",
            TagKind::Section => "section",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source context for error reporting.
///
/// Encapsulates the source content and filename of a tree description so
/// validation can point at the offending line.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_value(&self, value: &str) -> Option<SourceSpan> {
        ['"', '\''].iter().find_map(|quote| {
            let needle = format!("{quote}{value}{quote}");
            self.src
                .find(&needle)
                .map(|pos| SourceSpan::from((pos + 1, value.len())))
        })
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at a quoted value, when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_value(value),
            message: message.into(),
        })
    }

    /// Attach this source to an expansion error so it renders with a label.
    pub fn locate(&self, err: Box<Error>) -> Box<Error> {
        match *err {
            Error::UnknownPlaceholder { path, token, .. } => Box::new(Error::UnknownPlaceholder {
                src: Some(self.named_source()),
                span: self.find_value(&path),
                path,
                token,
            }),
            Error::ConditionalTag { path, kind, tag, .. } => Box::new(Error::ConditionalTag {
                src: Some(self.named_source()),
                span: self.find_value(&tag),
                path,
                kind,
                tag,
            }),
            other => Box::new(other),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(sprig::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template tree")]
    #[diagnostic(code(sprig::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(sprig::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("unsupported template tree version {version}")]
    #[diagnostic(
        code(sprig::unsupported_version),
        help("this build of sprig understands version {supported}")
    )]
    UnsupportedVersion { version: u32, supported: u32 },

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidName(#[from] sprig_core::InvalidName),

    #[error("unknown placeholder '{token}' in '{path}'")]
    #[diagnostic(
        code(sprig::unknown_placeholder),
        help("the only placeholder a path may contain is {{name}}")
    )]
    UnknownPlaceholder {
        #[source_code]
        src: Option<NamedSource<String>>,
        #[label("used here")]
        span: Option<SourceSpan>,
        path: String,
        token: String,
    },

    #[error("'{path}' is tagged with unknown {kind} '{tag}'")]
    #[diagnostic(
        code(sprig::conditional_tag),
        help("declare '{tag}' in the tree's list of {kind}s, or fix the tag")
    )]
    ConditionalTag {
        #[source_code]
        src: Option<NamedSource<String>>,
        #[label("not declared")]
        span: Option<SourceSpan>,
        path: String,
        kind: TagKind,
        tag: String,
    },

    #[error("more than one template writes to '{path}'")]
    #[diagnostic(
        code(sprig::output_collision),
        help("a literal path in the tree equals another path once the project name is filled in")
    )]
    OutputCollision { path: String },
}

impl Error {
    /// Create an unknown placeholder error with no source attached
    pub fn unknown_placeholder(path: impl Into<String>, token: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownPlaceholder {
            src: None,
            span: None,
            path: path.into(),
            token: token.into(),
        })
    }

    /// Create a conditional tag error with no source attached
    pub fn conditional_tag(
        path: impl Into<String>,
        kind: TagKind,
        tag: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::ConditionalTag {
            src: None,
            span: None,
            path: path.into(),
            kind,
            tag: tag.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value_span() {
        let ctx = SourceContext::new("path = \"{name}.php\"\n", "tree.toml");
        let span = ctx.find_value("{name}.php").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 10);
        assert!(ctx.find_value("missing").is_none());
    }

    #[test]
    fn test_locate_attaches_span() {
        let src = "[[files]]\npath = \"{slug}.php\"\n";
        let ctx = SourceContext::new(src, "tree.toml");
        let err = ctx.locate(Error::unknown_placeholder("{slug}.php", "slug"));
        match *err {
            Error::UnknownPlaceholder { src, span, .. } => {
                assert!(src.is_some());
                assert_eq!(span.unwrap().offset(), 18);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_messages() {
        let err = Error::conditional_tag("admin/x.css", TagKind::Flag, "sass");
        assert_eq!(
            err.to_string(),
            "'admin/x.css' is tagged with unknown flag 'sass'"
        );
        let err = Error::unknown_placeholder("{slug}.php", "slug");
        assert_eq!(err.to_string(), "unknown placeholder 'slug' in '{slug}.php'");
    }
}
