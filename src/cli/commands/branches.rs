//! branches command - List the branch table

use anyhow::Result;

use crate::cli::Context;
use crate::ui::{output, render};

/// Print every branch with the commit it points at.
pub fn branches(ctx: &Context) -> Result<()> {
    let session = ctx.load_session()?;
    output::print(render::branches(&session.state).trim_end(), ctx.verbosity);
    Ok(())
}
