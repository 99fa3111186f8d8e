//! The sprig scaffolder.
//!
//! Collects the project answers, derives the identifier forms, expands the
//! template tree into a manifest and renders each entry from a template
//! bundle into a new project directory.

pub mod answers;
pub mod bundle;
pub mod ops;
pub mod render;
pub mod reports;
