//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the session through the [`Context`]
//! 2. Calls the engine to compute the next state
//! 3. Saves when something changed and formats the output
//!
//! Handlers do NOT change repository state themselves.

mod branches;
mod completion;
mod edit;
mod history;
mod repl;
mod reset_session;
mod run;
mod show;

pub use branches::branches;
pub use completion::completion;
pub use edit::edit;
pub use history::history;
pub use repl::repl;
pub use reset_session::reset_session;
pub use run::run;
pub use show::show;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Run { words } => run::run(ctx, &words.join(" ")),
        Command::Repl => {
            let stdin = std::io::stdin();
            repl::repl(ctx, stdin.lock())
        }
        Command::Show { commit } => show::show(ctx, &commit),
        Command::Edit { file, content } => edit::edit(ctx, &file, &content),
        Command::Branches => branches::branches(ctx),
        Command::History { count } => history::history(ctx, count),
        Command::ResetSession => reset_session::reset_session(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
