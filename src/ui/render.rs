//! ui::render
//!
//! Plain-text views of a repository state.
//!
//! Every function returns a `String` so the CLI decides where it goes and
//! tests can compare it directly.

use std::fmt::Write as _;

use crate::core::diff::CommitDiff;
use crate::core::state::RepoState;
use crate::core::types::FileStatus;

/// Current branch, HEAD and the staged/working file partition.
pub fn status(state: &RepoState) -> String {
    let mut out = String::new();
    let head = state.head();

    match head.branch() {
        Some(branch) => {
            let _ = writeln!(out, "On branch {branch}");
        }
        None => {
            let _ = writeln!(out, "HEAD detached at {}", head.commit());
        }
    }
    let _ = writeln!(out, "HEAD: {}", head.commit());

    let staged: Vec<_> = state.staged_files().collect();
    if staged.is_empty() {
        out.push_str("Nothing staged.\n");
    } else {
        out.push_str("Staged files:\n");
        for file in staged {
            let _ = writeln!(out, "  {}", file.name);
        }
    }

    out.push_str("Working files:\n");
    for file in state.working_files() {
        match file.status {
            FileStatus::Modified => {
                let _ = writeln!(out, "  {} (modified)", file.name);
            }
            _ => {
                let _ = writeln!(out, "  {}", file.name);
            }
        }
    }

    out
}

/// Every commit, newest first.
pub fn log(state: &RepoState) -> String {
    let mut out = String::new();
    let head = state.head().commit();

    for commit in state.commits().iter_newest_first() {
        let marker = if &commit.id == head { " (HEAD)" } else { "" };
        let _ = writeln!(out, "commit {}{}", commit.id, marker);

        let parents = if commit.parents.is_empty() {
            "none".to_string()
        } else {
            join(commit.parents.iter())
        };
        let _ = writeln!(out, "Parents: {parents}");

        if !commit.branch_labels.is_empty() {
            let _ = writeln!(out, "Branches: {}", join(commit.branch_labels.iter()));
        }
        let _ = writeln!(out, "Date: {}", commit.timestamp);
        let _ = writeln!(out, "\n    {}\n", commit.message);
    }

    out
}

/// The branch table, one `name -> commit` line per branch.
pub fn branches(state: &RepoState) -> String {
    let current = state.current_branch();
    let mut out = String::new();

    for (name, commit) in state.branches().iter() {
        let marker = if Some(name) == current { " (HEAD)" } else { "" };
        let _ = writeln!(out, "{name}{marker} -> {commit}");
    }

    out
}

/// A commit's per-file changes against its first parent.
pub fn commit_diff(diff: &CommitDiff) -> String {
    let mut out = String::new();

    match &diff.parent {
        Some(parent) => {
            let _ = writeln!(out, "commit {} (parent {})", diff.commit, parent);
        }
        None => {
            let _ = writeln!(out, "commit {} (root)", diff.commit);
        }
    }

    if diff.is_empty() {
        out.push_str("No changes versus parent.\n");
        return out;
    }

    for file in &diff.files {
        let _ = writeln!(out, "--- {}", file.name);
        for line in &file.lines {
            let _ = writeln!(out, "{}{}", line.kind.prefix(), line.line);
        }
    }

    out
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}
