//! engine::parse
//!
//! Tokenizer and argument checks for the command language.
//!
//! Input is split on whitespace. The first token must be the program name
//! `git`, the second selects the subcommand and the rest are its arguments.
//! Quotes are not special to the tokenizer; `commit` strips them from its
//! message token afterwards.

use super::error::CommandError;
use crate::core::types::{BranchName, CommitId, FileName};

/// The only program the interpreter accepts.
pub const PROGRAM: &str = "git";

/// Prefix of the ancestor syntax accepted by `reset --hard`.
const ANCESTOR_PREFIX: &str = "HEAD~";

/// A syntactically valid command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Status,
    Add { file: FileName },
    Commit { message: String },
    Branch { name: BranchName },
    Checkout { target: String },
    Merge { source: BranchName },
    Reset { target: ResetTarget },
    Revert { commit: CommitId },
    Log,
}

impl Invocation {
    /// The subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Invocation::Status => "status",
            Invocation::Add { .. } => "add",
            Invocation::Commit { .. } => "commit",
            Invocation::Branch { .. } => "branch",
            Invocation::Checkout { .. } => "checkout",
            Invocation::Merge { .. } => "merge",
            Invocation::Reset { .. } => "reset",
            Invocation::Revert { .. } => "revert",
            Invocation::Log => "log",
        }
    }

    /// True for commands that never change the state.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Invocation::Status | Invocation::Log)
    }
}

/// Where `reset --hard` should move the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetTarget {
    /// A literal commit id.
    Commit(CommitId),
    /// `HEAD~N`: N first-parent steps back from HEAD.
    Ancestor(usize),
}

/// Parse a raw command line.
///
/// # Example
///
/// ```
/// use gitsim::engine::parse::{parse, Invocation, ResetTarget};
///
/// assert_eq!(parse("git status").unwrap(), Invocation::Status);
/// assert_eq!(
///     parse("git reset --hard HEAD~2").unwrap(),
///     Invocation::Reset { target: ResetTarget::Ancestor(2) }
/// );
/// assert!(parse("svn status").is_err());
/// ```
pub fn parse(raw: &str) -> Result<Invocation, CommandError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let program = tokens.first().copied().unwrap_or("");
    if program != PROGRAM {
        return Err(CommandError::UnknownProgram(program.to_string()));
    }

    let sub = tokens.get(1).copied().unwrap_or("");
    let args = tokens.get(2..).unwrap_or(&[]);

    match sub {
        "status" => Ok(Invocation::Status),
        "log" => Ok(Invocation::Log),
        "add" => {
            let file = first_arg(args, "add", "a target file")?;
            Ok(Invocation::Add {
                file: FileName::new(file),
            })
        }
        "commit" => Ok(Invocation::Commit {
            message: commit_message(args)?,
        }),
        "branch" => {
            let name = first_arg(args, "branch", "a name")?;
            Ok(Invocation::Branch {
                name: BranchName::new(name),
            })
        }
        "checkout" => {
            let target = first_arg(args, "checkout", "a branch or commit")?;
            Ok(Invocation::Checkout {
                target: target.to_string(),
            })
        }
        "merge" => {
            let source = first_arg(args, "merge", "a source branch")?;
            Ok(Invocation::Merge {
                source: BranchName::new(source),
            })
        }
        "reset" => Ok(Invocation::Reset {
            target: reset_target(args)?,
        }),
        "revert" => {
            let commit = first_arg(args, "revert", "a commit id")?;
            Ok(Invocation::Revert {
                commit: CommitId::new(commit),
            })
        }
        other => Err(CommandError::UnsupportedSubcommand(other.to_string())),
    }
}

/// First positional argument; extra arguments are ignored.
fn first_arg<'a>(
    args: &[&'a str],
    subcommand: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or(CommandError::MissingArgument { subcommand, what })
}

/// The token after `-m`, with quote characters removed.
fn commit_message(args: &[&str]) -> Result<String, CommandError> {
    let token = args
        .iter()
        .position(|a| *a == "-m")
        .and_then(|i| args.get(i + 1))
        .ok_or(CommandError::MissingMessage)?;

    let message: String = token.chars().filter(|c| *c != '"' && *c != '\'').collect();
    if message.is_empty() {
        return Err(CommandError::MissingMessage);
    }
    Ok(message)
}

const RESET_USAGE: &str = "git reset --hard <commit-ish> (e.g., HEAD~1 or c3)";

fn reset_target(args: &[&str]) -> Result<ResetTarget, CommandError> {
    let [mode, target] = args else {
        return Err(CommandError::UsageError(RESET_USAGE));
    };
    if *mode != "--hard" {
        return Err(CommandError::UsageError(RESET_USAGE));
    }

    match target.strip_prefix(ANCESTOR_PREFIX) {
        Some(suffix) => Ok(ResetTarget::Ancestor(ancestor_steps(suffix))),
        None => Ok(ResetTarget::Commit(CommitId::new(*target))),
    }
}

/// Leading decimal digits of `suffix`; absent, unparsable or zero means 1.
fn ancestor_steps(suffix: &str) -> usize {
    let digits: String = suffix.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_programs() {
        assert_eq!(
            parse("hg status"),
            Err(CommandError::UnknownProgram("hg".into()))
        );
    }

    #[test]
    fn blank_input_is_unknown_program() {
        assert_eq!(parse("   "), Err(CommandError::UnknownProgram(String::new())));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert_eq!(
            parse("git rebase main"),
            Err(CommandError::UnsupportedSubcommand("rebase".into()))
        );
    }

    #[test]
    fn bare_git_is_unsupported_empty_subcommand() {
        assert_eq!(
            parse("git"),
            Err(CommandError::UnsupportedSubcommand(String::new()))
        );
    }

    #[test]
    fn tolerates_extra_whitespace() {
        assert_eq!(
            parse("  git   add\tapp.js  ").unwrap(),
            Invocation::Add {
                file: FileName::new("app.js")
            }
        );
    }

    #[test]
    fn missing_arguments() {
        for (input, sub) in [
            ("git add", "add"),
            ("git branch", "branch"),
            ("git checkout", "checkout"),
            ("git merge", "merge"),
            ("git revert", "revert"),
        ] {
            match parse(input) {
                Err(CommandError::MissingArgument { subcommand, .. }) => {
                    assert_eq!(subcommand, sub)
                }
                other => panic!("{input}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn commit_message_strips_quotes() {
        assert_eq!(
            parse("git commit -m \"tweak\"").unwrap(),
            Invocation::Commit {
                message: "tweak".into()
            }
        );
        assert_eq!(
            parse("git commit -m 'fix'").unwrap(),
            Invocation::Commit {
                message: "fix".into()
            }
        );
    }

    #[test]
    fn commit_message_is_single_token() {
        assert_eq!(
            parse("git commit -m \"two words\"").unwrap(),
            Invocation::Commit {
                message: "two".into()
            }
        );
    }

    #[test]
    fn commit_without_message() {
        assert_eq!(parse("git commit"), Err(CommandError::MissingMessage));
        assert_eq!(parse("git commit -m"), Err(CommandError::MissingMessage));
        assert_eq!(parse("git commit -m \"\""), Err(CommandError::MissingMessage));
    }

    #[test]
    fn reset_requires_hard_and_target() {
        assert!(matches!(parse("git reset"), Err(CommandError::UsageError(_))));
        assert!(matches!(
            parse("git reset --hard"),
            Err(CommandError::UsageError(_))
        ));
        assert!(matches!(
            parse("git reset --soft c1"),
            Err(CommandError::UsageError(_))
        ));
        assert!(matches!(
            parse("git reset --hard c1 extra"),
            Err(CommandError::UsageError(_))
        ));
    }

    #[test]
    fn reset_target_forms() {
        let target = |s: &str| match parse(s).unwrap() {
            Invocation::Reset { target } => target,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(target("git reset --hard c3"), ResetTarget::Commit("c3".into()));
        assert_eq!(target("git reset --hard HEAD~3"), ResetTarget::Ancestor(3));
        assert_eq!(target("git reset --hard HEAD~"), ResetTarget::Ancestor(1));
        assert_eq!(target("git reset --hard HEAD~x"), ResetTarget::Ancestor(1));
        assert_eq!(target("git reset --hard HEAD~0"), ResetTarget::Ancestor(1));
        assert_eq!(target("git reset --hard HEAD~2x"), ResetTarget::Ancestor(2));
    }

    #[test]
    fn read_only_commands() {
        assert!(parse("git status").unwrap().is_read_only());
        assert!(parse("git log").unwrap().is_read_only());
        assert!(!parse("git branch x").unwrap().is_read_only());
    }
}
