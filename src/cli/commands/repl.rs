//! repl command - Line-oriented simulator prompt

use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};

use super::run::submit;
use crate::cli::Context;
use crate::core::history::HistoryCursor;
use crate::ui::output;

const PROMPT: &str = "gitsim> ";

/// Repeats the most recent command.
const RECALL: &str = "!!";

/// Read command lines from `input` until EOF, `exit` or `quit`.
///
/// A failing command is reported and the loop continues. The session is
/// saved after every submitted line and stays locked until the prompt ends.
pub fn repl(ctx: &Context, input: impl BufRead) -> Result<()> {
    let (_lock, mut session) = ctx.load_for_update()?;
    let mut cursor = HistoryCursor::new();
    let mut lines = input.lines();

    loop {
        if ctx.verbosity.is_chatty() {
            print!("{PROMPT}");
            std::io::stdout().flush().context("cannot write prompt")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let raw = line.context("cannot read command")?;
        let line = match raw.trim() {
            "" => continue,
            "exit" | "quit" => break,
            RECALL => {
                cursor.reset();
                match cursor.older(&session.history) {
                    Some(previous) => {
                        output::print(previous, ctx.verbosity);
                        previous.to_string()
                    }
                    None => {
                        output::warn("no previous command", ctx.verbosity);
                        continue;
                    }
                }
            }
            other => other.to_string(),
        };

        if let Err(err) = submit(ctx, &mut session, &line) {
            output::error(&err);
        }
        ctx.save_session(&session)?;
    }

    Ok(())
}
