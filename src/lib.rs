//! gitsim - An in-memory Git simulator
//!
//! gitsim models the parts of Git a newcomer meets first: a working copy,
//! a staging area, an append-only commit graph, branches and HEAD. A small
//! command language (`git status`, `add`, `commit`, `branch`, `checkout`,
//! `merge`, `reset --hard`, `revert`, `log`) drives it, and a positional
//! line diff shows what each commit changed.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, repository state, diff, history, persistence
//! - [`engine`] - Command interpreter: Parse -> Validate -> Apply
//! - [`ui`] - Verbosity-aware output and text rendering
//! - [`cli`] - Command-line interface layer
//!
//! # Correctness Invariants
//!
//! 1. Every commit id referenced by a parent, a branch or HEAD exists
//! 2. An attached HEAD points at its branch's commit
//! 3. Commits are never removed or rewritten
//! 4. A failed command leaves the state exactly as it was
//!
//! # Example
//!
//! ```
//! use gitsim::core::state::RepoState;
//! use gitsim::engine::run;
//!
//! let state = RepoState::bootstrap();
//! let state = run(&state, "git branch feature").unwrap();
//! let state = run(&state, "git checkout feature").unwrap();
//!
//! assert_eq!(state.current_branch().unwrap().as_str(), "feature");
//! assert!(run(&state, "git push").is_err());
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
