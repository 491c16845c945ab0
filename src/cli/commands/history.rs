//! history command - Show recently submitted commands

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Print up to `count` commands, newest first.
pub fn history(ctx: &Context, count: usize) -> Result<()> {
    let session = ctx.load_session()?;
    if session.history.is_empty() {
        output::print("No commands yet.", ctx.verbosity);
        return Ok(());
    }

    for (i, command) in session.history.recent(count).iter().enumerate() {
        output::print(format!("{:>3}  {}", i + 1, command), ctx.verbosity);
    }
    Ok(())
}
