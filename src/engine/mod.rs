//! engine
//!
//! The command interpreter: Parse -> Validate -> Apply.
//!
//! # Architecture
//!
//! ```text
//! raw line -> parse() -> Invocation -> execute(&state) -> new RepoState
//!                 \                          \
//!                  CommandError               CommandError
//! ```
//!
//! [`parse`](parse::parse) handles the program name, the subcommand and
//! argument shape. [`execute`] checks the invocation against the current
//! state and applies it. Both stop at the first violated precondition.
//!
//! # Invariants
//!
//! - The interpreter never mutates the state it is given
//! - A command is applied completely or not at all
//! - Persistence is the caller's job; nothing here performs I/O
//!
//! # Example
//!
//! ```
//! use gitsim::core::state::RepoState;
//! use gitsim::engine::run;
//!
//! let state = RepoState::bootstrap();
//! let state = run(&state, "git add app.js").unwrap();
//! let state = run(&state, "git commit -m tweak").unwrap();
//!
//! assert_eq!(state.head().commit().as_str(), "c2");
//! assert!(state.staged().is_empty());
//! ```

pub mod error;
mod handlers;
pub mod parse;

pub use error::{CommandError, ErrorKind};
pub use parse::{parse, Invocation, ResetTarget};

use tracing::debug;

use crate::core::state::RepoState;

/// Parse and apply one command line.
///
/// Returns the next state, or the first error found. `state` is unchanged
/// either way.
pub fn run(state: &RepoState, raw: &str) -> Result<RepoState, CommandError> {
    let invocation = parse(raw)?;
    execute(state, &invocation)
}

/// Apply an already parsed command.
pub fn execute(state: &RepoState, invocation: &Invocation) -> Result<RepoState, CommandError> {
    debug!(subcommand = invocation.name(), head = %state.head().commit(), "executing");

    let result = match invocation {
        Invocation::Status | Invocation::Log => Ok(state.clone()),
        Invocation::Add { file } => handlers::add(state, file),
        Invocation::Commit { message } => handlers::commit(state, message),
        Invocation::Branch { name } => handlers::branch(state, name),
        Invocation::Checkout { target } => handlers::checkout(state, target),
        Invocation::Merge { source } => handlers::merge(state, source),
        Invocation::Reset { target } => handlers::reset(state, target),
        Invocation::Revert { commit } => handlers::revert(state, commit),
    };

    if let Err(err) = &result {
        debug!(subcommand = invocation.name(), error = %err, "rejected");
    }
    result
}

/// Apply a file-edit event from the presentation layer.
///
/// Sets the file's content. A staged file stays staged; any other file
/// becomes modified. Fails with [`CommandError::NoSuchFile`] for an unknown
/// name.
pub fn edit_file(state: &RepoState, name: &str, content: &str) -> Result<RepoState, CommandError> {
    handlers::edit(state, name, content)
}
