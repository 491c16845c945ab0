//! show command - Print a commit's diff against its first parent

use anyhow::Result;

use crate::cli::Context;
use crate::core::diff::diff_commit;
use crate::engine::CommandError;
use crate::ui::{output, render};

/// Print the changes `commit` made.
pub fn show(ctx: &Context, commit: &str) -> Result<()> {
    let session = ctx.load_session()?;
    let diff = diff_commit(session.state.commits(), commit)
        .ok_or_else(|| CommandError::NoSuchCommit(commit.to_string()))?;

    output::print(render::commit_diff(&diff), ctx.verbosity);
    Ok(())
}
