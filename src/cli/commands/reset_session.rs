//! reset-session command - Start over from the initial repository

use anyhow::Result;

use crate::cli::Context;
use crate::core::store::Session;
use crate::ui::output;

/// Replace the saved session with a fresh one. History is cleared too.
pub fn reset_session(ctx: &Context) -> Result<()> {
    let _lock = ctx.store.lock()?;
    ctx.save_session(&Session::default())?;
    output::success("Session reset to the initial repository.", ctx.verbosity);
    Ok(())
}
