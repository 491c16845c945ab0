//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--session <path>`: Use this session file
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// gitsim - An in-memory Git simulator for learning the basics
#[derive(Parser, Debug)]
#[command(name = "gitsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session file to load and save (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Config file to use instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; errors are still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one simulated git command
    #[command(
        name = "run",
        long_about = "Run one simulated git command against the saved session.\n\n\
            The words are joined into a single command line and handed to the \
            interpreter, exactly as if typed at the simulator prompt. Mutating \
            commands save the session; every submitted line is added to the \
            command history, even when it fails.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Stage and commit a file
    gitsim run git add app.js
    gitsim run git commit -m tweak

    # Branch, switch and merge
    gitsim run git branch feature
    gitsim run git checkout feature
    gitsim run git checkout main
    gitsim run git merge feature

    # Move the current branch back one commit
    gitsim run git reset --hard HEAD~1

SUPPORTED COMMANDS:
    status, add, commit, branch, checkout, merge, reset --hard, revert, log"
    )]
    Run {
        /// The command line, starting with `git`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Read commands from stdin until EOF or `exit`
    #[command(
        name = "repl",
        long_about = "Interactive prompt for the simulator.\n\n\
            Each line is run as a git command. Errors are reported and the \
            prompt continues. The session is saved after every change.",
        after_help = "\
PROMPT EXTRAS:
    !!      run the most recent command again
    exit    leave the prompt (also: quit, EOF)"
    )]
    Repl,

    /// Show the changes a commit made against its first parent
    Show {
        /// Commit id, e.g. c3
        commit: String,
    },

    /// Change a working file's content
    #[command(
        long_about = "Replace a working file's content.\n\n\
            An unstaged file becomes modified. A staged file stays staged and \
            the next commit records the new content."
    )]
    Edit {
        /// File name, e.g. app.js
        file: String,

        /// New content
        content: String,
    },

    /// List branches and the commits they point at
    Branches,

    /// Show recently submitted commands, newest first
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Discard the saved session and start from the initial repository
    #[command(name = "reset-session")]
    ResetSession,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shells supported by `completion`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
