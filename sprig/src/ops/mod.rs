//! Core operations.
//!
//! This module contains the business logic for sprig commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod names;
pub mod plan;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use names::names;
pub use plan::{Plan, plan};
