//! engine::handlers
//!
//! One handler per mutating subcommand.
//!
//! # Invariants
//!
//! - Handlers check every precondition before building the next state
//! - The input state is borrowed and never changed; success returns a copy
//!   with the whole change applied
//! - Every commit id written to the branch table or HEAD exists in the graph

use tracing::info;

use super::error::CommandError;
use super::parse::ResetTarget;
use crate::core::graph::Commit;
use crate::core::state::RepoState;
use crate::core::types::{BranchName, CommitId, FileName, FileStatus, Head, UtcTimestamp};

/// Branch HEAD is attached to, or `DetachedHead` naming the operation.
fn attached_branch(state: &RepoState, operation: &'static str) -> Result<BranchName, CommandError> {
    state
        .current_branch()
        .cloned()
        .ok_or(CommandError::DetachedHead(operation))
}

/// `git add <file>`
pub(super) fn add(state: &RepoState, file: &FileName) -> Result<RepoState, CommandError> {
    if state.file(file.as_str()).is_none() {
        return Err(CommandError::NoSuchFile(file.to_string()));
    }

    let mut next = state.clone();
    if let Some(f) = next.file_mut(file.as_str()) {
        f.status = FileStatus::Staged;
    }
    next.stage(file);
    Ok(next)
}

/// `git commit -m <message>`
pub(super) fn commit(state: &RepoState, message: &str) -> Result<RepoState, CommandError> {
    if state.staged().is_empty() {
        return Err(CommandError::EmptyStagingArea);
    }
    let branch = attached_branch(state, "commit")?;

    let parent = state.head().commit().clone();
    let mut snapshot = state.commits().snapshot_of(parent.as_str());
    for name in state.staged() {
        if let Some(file) = state.file(name.as_str()) {
            snapshot.upsert(file.name.clone(), file.content.clone());
        }
    }

    let commit = Commit {
        id: state.commits().next_id(),
        message: message.to_string(),
        parents: vec![parent],
        branch_labels: vec![branch.clone()],
        timestamp: UtcTimestamp::now(),
        snapshot,
    };
    info!(commit = %commit.id, branch = %branch, files = state.staged().len(), "committed");

    let mut next = state.clone();
    next.advance(&branch, commit);
    next.clear_staging();
    Ok(next)
}

/// `git branch <name>`
///
/// The new branch starts at HEAD's commit, which for an attached HEAD is
/// its branch's entry. HEAD does not move.
pub(super) fn branch(state: &RepoState, name: &BranchName) -> Result<RepoState, CommandError> {
    if state.branches().contains(name.as_str()) {
        return Err(CommandError::BranchExists(name.to_string()));
    }

    let mut next = state.clone();
    next.branches_mut()
        .create(name.clone(), state.head().commit().clone());
    info!(branch = %name, at = %state.head().commit(), "created branch");
    Ok(next)
}

/// `git checkout <branch-or-commit>`
///
/// Branch names take precedence over commit ids.
pub(super) fn checkout(state: &RepoState, target: &str) -> Result<RepoState, CommandError> {
    let head = if let Some(tip) = state.branches().get(target) {
        Head::attached(BranchName::new(target), tip.clone())
    } else if state.commits().contains(target) {
        Head::detached(CommitId::new(target))
    } else {
        return Err(CommandError::NoSuchRef(target.to_string()));
    };

    info!(reference = target, detached = head.is_detached(), "checked out");
    let mut next = state.clone();
    next.set_head(head);
    Ok(next)
}

/// `git merge <branch>`
///
/// Union merge without conflict detection: the result is the target's
/// snapshot minus every name the source also has, followed by the whole
/// source snapshot. The source wins every collision.
pub(super) fn merge(state: &RepoState, source: &BranchName) -> Result<RepoState, CommandError> {
    let target = attached_branch(state, "merge")?;
    let source_tip = state
        .branches()
        .get(source.as_str())
        .cloned()
        .ok_or_else(|| CommandError::NoSuchBranch(source.to_string()))?;
    let target_tip = state.head().commit().clone();

    let source_snapshot = state.commits().snapshot_of(source_tip.as_str());
    let mut snapshot = state
        .commits()
        .snapshot_of(target_tip.as_str())
        .without_names_of(&source_snapshot);
    snapshot.extend_from(&source_snapshot);

    let commit = Commit {
        id: state.commits().next_id(),
        message: format!("Merge {source} into {target}"),
        parents: vec![target_tip, source_tip],
        branch_labels: vec![target.clone()],
        timestamp: UtcTimestamp::now(),
        snapshot,
    };
    info!(commit = %commit.id, source = %source, target = %target, "merged");

    let mut next = state.clone();
    next.advance(&target, commit);
    Ok(next)
}

/// `git reset --hard <commit-id|HEAD~N>`
///
/// Moves the current branch and HEAD only. Working files and the staging
/// area are left as they are.
pub(super) fn reset(state: &RepoState, target: &ResetTarget) -> Result<RepoState, CommandError> {
    let resolved = match target {
        ResetTarget::Ancestor(steps) => state
            .commits()
            .first_parent_walk(state.head().commit(), *steps),
        ResetTarget::Commit(id) => {
            if !state.commits().contains(id.as_str()) {
                return Err(CommandError::NoSuchCommit(id.to_string()));
            }
            id.clone()
        }
    };
    let branch = attached_branch(state, "reset")?;

    info!(branch = %branch, to = %resolved, "reset");
    let mut next = state.clone();
    next.move_branch(&branch, resolved);
    Ok(next)
}

/// `git revert <commit-id>`
///
/// Records a marker commit on the current branch. Its snapshot is the
/// branch tip's snapshot unchanged; the reverted commit's changes are not
/// undone.
pub(super) fn revert(state: &RepoState, id: &CommitId) -> Result<RepoState, CommandError> {
    let original = state
        .commits()
        .get(id.as_str())
        .ok_or_else(|| CommandError::NoSuchCommit(id.to_string()))?;
    let branch = attached_branch(state, "revert")?;

    let parent = state.head().commit().clone();
    let commit = Commit {
        id: state.commits().next_id(),
        message: format!("Revert \"{}\" ({})", original.message, id),
        snapshot: state.commits().snapshot_of(parent.as_str()),
        parents: vec![parent],
        branch_labels: vec![branch.clone()],
        timestamp: UtcTimestamp::now(),
    };
    info!(commit = %commit.id, reverted = %id, "reverted");

    let mut next = state.clone();
    next.advance(&branch, commit);
    Ok(next)
}

/// Working-copy edit of a file's content.
///
/// A staged file stays staged so the next commit picks up the new content;
/// any other file becomes modified.
pub(super) fn edit(state: &RepoState, name: &str, content: &str) -> Result<RepoState, CommandError> {
    if state.file(name).is_none() {
        return Err(CommandError::NoSuchFile(name.to_string()));
    }

    let mut next = state.clone();
    if let Some(file) = next.file_mut(name) {
        file.content = content.to_string();
        if file.status != FileStatus::Staged {
            file.status = FileStatus::Modified;
        }
    }
    Ok(next)
}
