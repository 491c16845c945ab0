//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing
//! - [`render`] - Text views of status, log, branches and commit diffs

pub mod output;
pub mod render;
