//! Core utilities and types for the sprig scaffolder.
//!
//! This crate turns a free-form project name into the family of identifier
//! forms used across every generated file, and provides the file-writing
//! primitives the renderer builds on.

mod file;
mod naming;
mod utils;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Identifier forms
pub use naming::{IdentifierForms, InvalidName, derive, normalize_words, pretty_name};
// String utilities
pub use utils::{capitalize, transliterate};
