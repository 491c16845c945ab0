//! core
//!
//! Core domain types, state and algorithms for gitsim.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitId, Head, etc.
//! - [`graph`] - Append-only commit graph and snapshots
//! - [`branches`] - Branch table
//! - [`state`] - Repository state threaded through the interpreter
//! - [`verify`] - Verification of repository invariants
//! - [`diff`] - Positional line diff and per-commit diffs
//! - [`history`] - Command history and recall cursor
//! - [`store`] - Session persistence
//! - [`lock`] - Exclusive lock for session writes
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for gitsim storage
//!
//! # Design Principles
//!
//! - State is a value: transitions produce a new state
//! - Nothing in here performs I/O except `store`, `lock` and `config`

pub mod branches;
pub mod config;
pub mod diff;
pub mod graph;
pub mod history;
pub mod lock;
pub mod paths;
pub mod state;
pub mod store;
pub mod types;
pub mod verify;
