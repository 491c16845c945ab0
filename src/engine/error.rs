//! engine::error
//!
//! Structured errors reported by the command interpreter.
//!
//! Every error is recoverable: the state the command was applied to is left
//! untouched and the message is meant to be shown to the user verbatim.

use thiserror::Error;

/// A rejected command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("\"{0}\" is not a git command.")]
    UnknownProgram(String),

    #[error("unsupported git subcommand \"{0}\".")]
    UnsupportedSubcommand(String),

    #[error("git {subcommand} requires {what}.")]
    MissingArgument {
        subcommand: &'static str,
        what: &'static str,
    },

    #[error("git commit requires a message. Use: git commit -m \"your message\"")]
    MissingMessage,

    #[error("Usage: {0}")]
    UsageError(&'static str),

    #[error("No such file \"{0}\".")]
    NoSuchFile(String),

    #[error("Branch \"{0}\" does not exist.")]
    NoSuchBranch(String),

    #[error("commit \"{0}\" not found.")]
    NoSuchCommit(String),

    #[error("No such branch or commit \"{0}\".")]
    NoSuchRef(String),

    #[error("Branch \"{0}\" already exists.")]
    BranchExists(String),

    #[error("Nothing to commit. Staging area is empty.")]
    EmptyStagingArea,

    #[error("You are in a detached HEAD; cannot {0}.")]
    DetachedHead(&'static str),
}

/// Fieldless discriminant of [`CommandError`] for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownProgram,
    UnsupportedSubcommand,
    MissingArgument,
    MissingMessage,
    UsageError,
    NoSuchFile,
    NoSuchBranch,
    NoSuchCommit,
    NoSuchRef,
    BranchExists,
    EmptyStagingArea,
    DetachedHead,
}

impl CommandError {
    /// The error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::UnknownProgram(_) => ErrorKind::UnknownProgram,
            CommandError::UnsupportedSubcommand(_) => ErrorKind::UnsupportedSubcommand,
            CommandError::MissingArgument { .. } => ErrorKind::MissingArgument,
            CommandError::MissingMessage => ErrorKind::MissingMessage,
            CommandError::UsageError(_) => ErrorKind::UsageError,
            CommandError::NoSuchFile(_) => ErrorKind::NoSuchFile,
            CommandError::NoSuchBranch(_) => ErrorKind::NoSuchBranch,
            CommandError::NoSuchCommit(_) => ErrorKind::NoSuchCommit,
            CommandError::NoSuchRef(_) => ErrorKind::NoSuchRef,
            CommandError::BranchExists(_) => ErrorKind::BranchExists,
            CommandError::EmptyStagingArea => ErrorKind::EmptyStagingArea,
            CommandError::DetachedHead(_) => ErrorKind::DetachedHead,
        }
    }
}
