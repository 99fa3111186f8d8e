//! Template tree descriptions and manifest expansion.
//!
//! A [`TemplateTree`] catalogs every file a boilerplate can produce.
//! [`expand`] turns it into the ordered [`ManifestEntry`] list for one
//! project, given its [`IdentifierForms`](sprig_core::IdentifierForms) and
//! [`ProjectConfig`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod expand;
pub mod placeholder;
mod tree;

pub use config::{ADMIN_SECTION, Author, DEFAULT_FEATURES, DEFAULT_SECTIONS, License, ProjectConfig};
pub use error::{Error, Result, SourceContext, TagKind};
pub use expand::{ManifestEntry, expand, run_core, run_core_with};
pub use tree::{TREE_VERSION, TemplateTree, TreeEntry};
