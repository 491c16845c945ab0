//! run command - Execute one simulated git command line
//!
//! [`submit`] is shared with the REPL: it records the line in the history,
//! runs it through the engine and prints the result. Saving is left to the
//! caller.

use anyhow::Result;

use crate::cli::Context;
use crate::core::state::RepoState;
use crate::core::store::Session;
use crate::engine::{self, CommandError, Invocation};
use crate::ui::output;
use crate::ui::render;

/// Run `line` against the saved session and save the result.
///
/// The history is saved even when the command fails.
pub fn run(ctx: &Context, line: &str) -> Result<()> {
    let (_lock, mut session) = ctx.load_for_update()?;
    let result = submit(ctx, &mut session, line);
    ctx.save_session(&session)?;
    result?;
    Ok(())
}

/// Record, apply and report one command line.
///
/// Returns whether the repository state changed. On error `session.state`
/// is untouched.
pub(super) fn submit(ctx: &Context, session: &mut Session, line: &str) -> Result<bool, CommandError> {
    session.history.record(line, ctx.config.history_limit());

    let invocation = engine::parse(line)?;
    let next = engine::execute(&session.state, &invocation)?;

    match invocation {
        Invocation::Status => output::print(render::status(&next), ctx.verbosity),
        Invocation::Log => output::print(render::log(&next), ctx.verbosity),
        _ => {
            output::success(describe(&invocation, &next), ctx.verbosity);
            if ctx.config.show_status() {
                output::print(render::status(&next), ctx.verbosity);
            }
        }
    }

    let changed = !invocation.is_read_only();
    if changed {
        session.state = next;
    }
    Ok(changed)
}

/// One-line summary of a successful mutating command.
fn describe(invocation: &Invocation, state: &RepoState) -> String {
    let head = state.head().commit();
    let tip = || {
        let message = state
            .head_commit()
            .map(|c| c.message.as_str())
            .unwrap_or_default();
        match state.current_branch() {
            Some(branch) => format!("[{branch} {head}] {message}"),
            None => format!("[detached {head}] {message}"),
        }
    };

    match invocation {
        Invocation::Add { file } => format!("Staged {file}."),
        Invocation::Commit { .. } | Invocation::Merge { .. } | Invocation::Revert { .. } => tip(),
        Invocation::Branch { name } => format!("Created branch {name} at {head}."),
        Invocation::Checkout { target } => match state.current_branch() {
            Some(branch) => format!("Switched to branch {branch}."),
            None => format!("HEAD is now at {target} (detached)."),
        },
        Invocation::Reset { .. } => format!("HEAD is now at {head}."),
        Invocation::Status | Invocation::Log => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run as apply;

    #[test]
    fn describe_commit_and_checkout() {
        let state = apply(&RepoState::bootstrap(), "git add app.js").unwrap();
        let state = apply(&state, "git commit -m tweak").unwrap();
        let commit = Invocation::Commit {
            message: "tweak".into(),
        };
        assert_eq!(describe(&commit, &state), "[main c2] tweak");

        let state = apply(&state, "git checkout c1").unwrap();
        let checkout = Invocation::Checkout {
            target: "c1".into(),
        };
        assert_eq!(describe(&checkout, &state), "HEAD is now at c1 (detached).");
    }
}
