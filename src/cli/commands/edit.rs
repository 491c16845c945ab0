//! edit command - Replace a working file's content

use anyhow::Result;

use crate::cli::Context;
use crate::engine;
use crate::ui::output;

/// Apply a file edit and save the session.
pub fn edit(ctx: &Context, file: &str, content: &str) -> Result<()> {
    let (_lock, mut session) = ctx.load_for_update()?;
    session.state = engine::edit_file(&session.state, file, content)?;
    ctx.save_session(&session)?;

    if let Some(f) = session.state.file(file) {
        output::success(format!("Edited {} ({}).", f.name, f.status), ctx.verbosity);
    }
    Ok(())
}
