//! core::verify
//!
//! Verification of repository state invariants.
//!
//! # Invariants Checked
//!
//! - File names are unique
//! - Every staged name is a working file
//! - A file has `Staged` status exactly when its name is in the staging area
//! - Commit ids run `c1`, `c2`, ... in graph order
//! - Every commit's parents exist in the graph and precede it
//! - Every branch table entry references an existing commit
//! - HEAD references an existing commit
//! - An attached HEAD mirrors its branch's table entry
//!
//! The interpreter preserves these by construction. Verification runs when
//! a persisted session is loaded, since that is the only way a state enters
//! the program without passing through the interpreter.

use std::collections::HashSet;

use thiserror::Error;

use super::state::RepoState;
use super::types::{CommitId, FileStatus};

/// Errors from invariant verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("duplicate file '{0}'")]
    DuplicateFile(String),

    #[error("staged name '{0}' is not a working file")]
    StagedUnknownFile(String),

    #[error("file '{0}' status disagrees with the staging area")]
    StagingMismatch(String),

    #[error("commit '{found}' is out of sequence (expected '{expected}')")]
    CommitOutOfSequence { expected: String, found: String },

    #[error("commit graph is empty")]
    EmptyGraph,

    #[error("commit '{commit}' has unknown parent '{parent}'")]
    UnknownParent { commit: String, parent: String },

    #[error("branch '{branch}' points at unknown commit '{commit}'")]
    DanglingBranch { branch: String, commit: String },

    #[error("HEAD points at unknown commit '{0}'")]
    DanglingHead(String),

    #[error("HEAD is attached to unknown branch '{0}'")]
    UnknownHeadBranch(String),

    #[error("HEAD is at '{head}' but branch '{branch}' is at '{tip}'")]
    HeadOutOfSync {
        branch: String,
        head: String,
        tip: String,
    },
}

/// Check every cross-entity invariant of a repository state.
///
/// Returns the first violation found.
///
/// # Example
///
/// ```
/// use gitsim::core::state::RepoState;
/// use gitsim::core::verify::verify;
///
/// assert!(verify(&RepoState::bootstrap()).is_ok());
/// ```
pub fn verify(state: &RepoState) -> Result<(), VerifyError> {
    let mut names = HashSet::new();
    for file in state.files() {
        if !names.insert(file.name.as_str()) {
            return Err(VerifyError::DuplicateFile(file.name.to_string()));
        }
    }

    for staged in state.staged() {
        if !names.contains(staged.as_str()) {
            return Err(VerifyError::StagedUnknownFile(staged.to_string()));
        }
    }

    for file in state.files() {
        let staged = state.staged().contains(&file.name);
        if staged != (file.status == FileStatus::Staged) {
            return Err(VerifyError::StagingMismatch(file.name.to_string()));
        }
    }

    let graph = state.commits();
    if graph.is_empty() {
        return Err(VerifyError::EmptyGraph);
    }

    // `next_id` relies on this sequence; it also makes ids unique.
    let mut seen = HashSet::new();
    for (index, commit) in graph.iter().enumerate() {
        let expected = CommitId::nth(index + 1);
        if commit.id != expected {
            return Err(VerifyError::CommitOutOfSequence {
                expected: expected.to_string(),
                found: commit.id.to_string(),
            });
        }
        for parent in &commit.parents {
            if !seen.contains(parent.as_str()) {
                return Err(VerifyError::UnknownParent {
                    commit: commit.id.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
        seen.insert(commit.id.as_str());
    }

    for (branch, commit) in state.branches().iter() {
        if !graph.contains(commit.as_str()) {
            return Err(VerifyError::DanglingBranch {
                branch: branch.to_string(),
                commit: commit.to_string(),
            });
        }
    }

    let head = state.head();
    if !graph.contains(head.commit().as_str()) {
        return Err(VerifyError::DanglingHead(head.commit().to_string()));
    }

    if let Some(branch) = head.branch() {
        let tip = state
            .branches()
            .get(branch.as_str())
            .ok_or_else(|| VerifyError::UnknownHeadBranch(branch.to_string()))?;
        if tip != head.commit() {
            return Err(VerifyError::HeadOutOfSync {
                branch: branch.to_string(),
                head: head.commit().to_string(),
                tip: tip.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::branches::BranchTable;
    use crate::core::graph::{Commit, CommitGraph};
    use crate::core::state::WorkingFile;
    use crate::core::types::{BranchName, FileName, Head, UtcTimestamp};

    fn rebuild(
        state: &RepoState,
        staged: Vec<FileName>,
        branches: BranchTable,
        head: Head,
    ) -> RepoState {
        RepoState::from_parts(
            state.files().to_vec(),
            staged,
            state.commits().clone(),
            branches,
            head,
        )
    }

    #[test]
    fn bootstrap_verifies() {
        assert_eq!(verify(&RepoState::bootstrap()), Ok(()));
    }

    #[test]
    fn staged_unknown_file_detected() {
        let base = RepoState::bootstrap();
        let state = rebuild(
            &base,
            vec![FileName::new("ghost.txt")],
            base.branches().clone(),
            base.head().clone(),
        );
        assert_eq!(
            verify(&state),
            Err(VerifyError::StagedUnknownFile("ghost.txt".into()))
        );
    }

    #[test]
    fn dangling_branch_detected() {
        let base = RepoState::bootstrap();
        let mut branches = base.branches().clone();
        branches.set(BranchName::new("feature"), CommitId::nth(9));
        let state = rebuild(&base, vec![], branches, base.head().clone());
        assert!(matches!(
            verify(&state),
            Err(VerifyError::DanglingBranch { .. })
        ));
    }

    #[test]
    fn dangling_detached_head_detected() {
        let base = RepoState::bootstrap();
        let state = rebuild(
            &base,
            vec![],
            base.branches().clone(),
            Head::detached(CommitId::nth(4)),
        );
        assert_eq!(verify(&state), Err(VerifyError::DanglingHead("c4".into())));
    }

    #[test]
    fn head_attached_to_unknown_branch_detected() {
        let base = RepoState::bootstrap();
        let state = rebuild(
            &base,
            vec![],
            base.branches().clone(),
            Head::attached(BranchName::new("nope"), CommitId::nth(1)),
        );
        assert_eq!(
            verify(&state),
            Err(VerifyError::UnknownHeadBranch("nope".into()))
        );
    }

    #[test]
    fn skipped_commit_id_detected() {
        let base = RepoState::bootstrap();
        let root = base.head_commit().unwrap().clone();
        let mut graph = CommitGraph::with_root(root.clone());
        graph.append(Commit {
            id: CommitId::nth(3),
            parents: vec![root.id.clone()],
            timestamp: UtcTimestamp::now(),
            ..root
        });
        let state = RepoState::from_parts(
            base.files().to_vec(),
            vec![],
            graph,
            base.branches().clone(),
            base.head().clone(),
        );
        assert_eq!(
            verify(&state),
            Err(VerifyError::CommitOutOfSequence {
                expected: "c2".into(),
                found: "c3".into(),
            })
        );
    }

    #[test]
    fn staged_status_without_staging_entry_detected() {
        let base = RepoState::bootstrap();
        let mut files = base.files().to_vec();
        files[1].status = FileStatus::Staged;
        let state = RepoState::from_parts(
            files,
            vec![],
            base.commits().clone(),
            base.branches().clone(),
            base.head().clone(),
        );
        assert_eq!(
            verify(&state),
            Err(VerifyError::StagingMismatch("app.js".into()))
        );
    }

    #[test]
    fn staging_entry_without_staged_status_detected() {
        let base = RepoState::bootstrap();
        let state = rebuild(
            &base,
            vec![FileName::new("README.md")],
            base.branches().clone(),
            base.head().clone(),
        );
        assert_eq!(
            verify(&state),
            Err(VerifyError::StagingMismatch("README.md".into()))
        );
    }

    #[test]
    fn staged_file_in_both_places_verifies() {
        let base = RepoState::bootstrap();
        let mut files: Vec<WorkingFile> = base.files().to_vec();
        files[1].status = FileStatus::Staged;
        let state = RepoState::from_parts(
            files,
            vec![FileName::new("app.js")],
            base.commits().clone(),
            base.branches().clone(),
            base.head().clone(),
        );
        assert_eq!(verify(&state), Ok(()));
    }
}
