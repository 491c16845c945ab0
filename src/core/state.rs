//! core::state
//!
//! The repository state: the single value every command transforms.
//!
//! # Architecture
//!
//! [`RepoState`] owns the working files, the staging area, the commit graph,
//! the branch table and HEAD. It is a plain value: the interpreter borrows a
//! state and returns a new one, so a caller can keep any previous state for
//! undo or replay and a failed command never leaves a half-applied change.
//!
//! # Invariants
//!
//! - Every commit id referenced by the branch table or HEAD is in the graph
//! - Every staged name is a working file
//! - An attached HEAD's commit equals its branch's table entry
//!
//! See [`crate::core::verify`] for the checker.

use serde::{Deserialize, Serialize};

use super::branches::BranchTable;
use super::graph::{Commit, CommitGraph, Snapshot, SnapshotEntry};
use super::types::{BranchName, CommitId, FileName, FileStatus, Head, UtcTimestamp};

/// Name of the branch the bootstrap state starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// Message of the bootstrap root commit.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Seed files of a fresh repository.
const SEED_FILES: [(&str, &str); 3] = [
    ("index.html", "<!DOCTYPE html>\n<html></html>"),
    ("app.js", "console.log('hello');"),
    ("README.md", "# Git Simulator"),
];

/// A file in the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingFile {
    /// Unique file name
    pub name: FileName,
    /// Current content
    pub content: String,
    /// Working-set status
    pub status: FileStatus,
}

impl WorkingFile {
    /// Create an unmodified file.
    pub fn new(name: impl Into<FileName>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            status: FileStatus::Unmodified,
        }
    }
}

/// Complete repository state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    files: Vec<WorkingFile>,
    staged: Vec<FileName>,
    commits: CommitGraph,
    branches: BranchTable,
    #[serde(rename = "HEAD")]
    head: Head,
}

impl Default for RepoState {
    fn default() -> Self {
        Self::bootstrap()
    }
}

impl RepoState {
    /// The fixed starting state: three seed files, root commit `c1` on
    /// `main`, HEAD attached to `main`, nothing staged.
    ///
    /// # Example
    ///
    /// ```
    /// use gitsim::core::state::RepoState;
    ///
    /// let state = RepoState::bootstrap();
    /// assert_eq!(state.files().len(), 3);
    /// assert_eq!(state.commits().len(), 1);
    /// assert_eq!(state.head().commit().as_str(), "c1");
    /// assert_eq!(state.current_branch().map(|b| b.as_str()), Some("main"));
    /// ```
    pub fn bootstrap() -> Self {
        let files: Vec<WorkingFile> = SEED_FILES
            .iter()
            .map(|(name, content)| WorkingFile::new(*name, *content))
            .collect();
        let snapshot = Snapshot::from_entries(
            files
                .iter()
                .map(|f| SnapshotEntry::new(f.name.clone(), f.content.clone())),
        );

        let main = BranchName::new(DEFAULT_BRANCH);
        let root_id = CommitId::nth(1);
        let root = Commit {
            id: root_id.clone(),
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            parents: vec![],
            branch_labels: vec![main.clone()],
            timestamp: UtcTimestamp::now(),
            snapshot,
        };

        let mut branches = BranchTable::new();
        branches.set(main.clone(), root_id.clone());

        Self {
            files,
            staged: vec![],
            commits: CommitGraph::with_root(root),
            branches,
            head: Head::attached(main, root_id),
        }
    }

    /// Assemble a state from parts without checking invariants.
    ///
    /// Run [`crate::core::verify::verify`] on the result before trusting it.
    pub fn from_parts(
        files: Vec<WorkingFile>,
        staged: Vec<FileName>,
        commits: CommitGraph,
        branches: BranchTable,
        head: Head,
    ) -> Self {
        Self {
            files,
            staged,
            commits,
            branches,
            head,
        }
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// All working files.
    pub fn files(&self) -> &[WorkingFile] {
        &self.files
    }

    /// Look up a working file.
    pub fn file(&self, name: &str) -> Option<&WorkingFile> {
        self.files.iter().find(|f| f.name.as_str() == name)
    }

    /// Files not currently staged.
    pub fn working_files(&self) -> impl Iterator<Item = &WorkingFile> {
        self.files.iter().filter(|f| f.status != FileStatus::Staged)
    }

    /// Files currently staged.
    pub fn staged_files(&self) -> impl Iterator<Item = &WorkingFile> {
        self.files.iter().filter(|f| f.status == FileStatus::Staged)
    }

    /// Names in the staging area, in staging order.
    pub fn staged(&self) -> &[FileName] {
        &self.staged
    }

    /// The commit graph.
    pub fn commits(&self) -> &CommitGraph {
        &self.commits
    }

    /// The branch table.
    pub fn branches(&self) -> &BranchTable {
        &self.branches
    }

    /// HEAD.
    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The attached branch, `None` when detached.
    pub fn current_branch(&self) -> Option<&BranchName> {
        self.head.branch()
    }

    /// The commit HEAD points at.
    pub fn head_commit(&self) -> Option<&Commit> {
        self.commits.get(self.head.commit().as_str())
    }

    /// The commit a branch points at.
    pub fn branch_tip(&self, name: &str) -> Option<&Commit> {
        self.branches
            .get(name)
            .and_then(|id| self.commits.get(id.as_str()))
    }

    // =========================================================================
    // Mutators for the interpreter
    // =========================================================================

    pub(crate) fn file_mut(&mut self, name: &str) -> Option<&mut WorkingFile> {
        self.files.iter_mut().find(|f| f.name.as_str() == name)
    }

    pub(crate) fn stage(&mut self, name: &FileName) {
        if !self.staged.contains(name) {
            self.staged.push(name.clone());
        }
    }

    /// Empty the staging area and return every staged file to unmodified.
    pub(crate) fn clear_staging(&mut self) {
        self.staged.clear();
        for file in &mut self.files {
            if file.status == FileStatus::Staged {
                file.status = FileStatus::Unmodified;
            }
        }
    }

    pub(crate) fn branches_mut(&mut self) -> &mut BranchTable {
        &mut self.branches
    }

    pub(crate) fn set_head(&mut self, head: Head) {
        self.head = head;
    }

    /// Append a commit and advance the attached branch and HEAD to it.
    pub(crate) fn advance(&mut self, branch: &BranchName, commit: Commit) {
        let id = commit.id.clone();
        self.commits.append(commit);
        self.move_branch(branch, id);
    }

    /// Point `branch` and HEAD at `id`.
    pub(crate) fn move_branch(&mut self, branch: &BranchName, id: CommitId) {
        self.branches.set(branch.clone(), id.clone());
        self.head = self.head.with_commit(id);
    }
}
