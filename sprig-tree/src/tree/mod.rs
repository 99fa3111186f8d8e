//! Template tree descriptions.
//!
//! A tree is the name-agnostic catalog of every file a boilerplate can
//! produce. Paths contain the `{name}` placeholder; entries may be tagged
//! with a feature flag and/or an optional section that gates inclusion.

mod parse;
mod validate;

use serde::Deserialize;

use crate::{Result, error::TagKind};

/// Tree description format understood by this crate.
pub const TREE_VERSION: u32 = 1;

const BUILTIN: &str = include_str!("builtin.toml");

/// A versioned, name-agnostic description of a boilerplate layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateTree {
    /// Description format version
    pub version: u32,

    /// Directory inside the template bundle that holds the templates
    #[serde(default)]
    pub root: String,

    /// Literal substituted for `{name}` on the template side
    pub template_name: String,

    /// Feature flag vocabulary
    #[serde(default)]
    pub flags: Vec<String>,

    /// Optional section vocabulary
    #[serde(default)]
    pub sections: Vec<String>,

    /// File entries, in creation order
    #[serde(default)]
    pub files: Vec<TreeEntry>,
}

/// One file the boilerplate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeEntry {
    /// Relative path template, e.g. `includes/class-{name}.php`
    pub path: String,

    /// Feature flag the entry requires
    #[serde(default)]
    pub flag: Option<String>,

    /// Optional section the entry requires
    #[serde(default)]
    pub section: Option<String>,
}

impl TreeEntry {
    /// Create an unconditional entry.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            flag: None,
            section: None,
        }
    }

    /// Require a feature flag.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Require an optional section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Whether the entry is always included.
    pub fn is_unconditional(&self) -> bool {
        self.flag.is_none() && self.section.is_none()
    }

    /// The entry's tags with their kinds.
    pub fn tags(&self) -> impl Iterator<Item = (TagKind, &str)> {
        let flag = self.flag.as_deref().map(|f| (TagKind::Flag, f));
        let section = self.section.as_deref().map(|s| (TagKind::Section, s));
        flag.into_iter().chain(section)
    }
}

impl TemplateTree {
    /// Create an empty tree whose templates use `template_name` for `{name}`.
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            version: TREE_VERSION,
            root: String::new(),
            template_name: template_name.into(),
            flags: Vec::new(),
            sections: Vec::new(),
            files: Vec::new(),
        }
    }

    /// The WordPress plugin boilerplate shipped with sprig.
    pub fn builtin() -> Result<Self> {
        Self::from_str_with_filename(BUILTIN, "builtin.toml")
    }

    /// Declare a feature flag.
    pub fn with_flag_name(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Declare an optional section.
    pub fn with_section_name(mut self, section: impl Into<String>) -> Self {
        self.sections.push(section.into());
        self
    }

    /// Append a file entry.
    pub fn with_file(mut self, entry: TreeEntry) -> Self {
        self.files.push(entry);
        self
    }

    /// Whether `tag` is declared in the vocabulary of `kind`.
    pub fn declares(&self, kind: TagKind, tag: &str) -> bool {
        let vocabulary = match kind {
            TagKind::Flag => &self.flags,
            TagKind::Section => &self.sections,
        };
        vocabulary.iter().any(|t| t == tag)
    }
}
