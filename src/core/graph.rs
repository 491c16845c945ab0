//! core::graph
//!
//! Commit graph representation and operations.
//!
//! # Architecture
//!
//! The commit graph is an append-only DAG where:
//! - Nodes are commits, kept in creation order
//! - Edges point from a commit to its parents (0, 1 or 2 of them)
//! - Every commit carries a full materialized [`Snapshot`] of tracked files
//!
//! # Invariants
//!
//! - Commits are never mutated or removed once appended
//! - A parent is always appended before its children
//! - Ids come from [`CommitGraph::next_id`], so they are collision-free

use serde::{Deserialize, Serialize};

use super::types::{BranchName, CommitId, FileName, UtcTimestamp};

/// One file recorded in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// File name
    pub name: FileName,
    /// File content at commit time
    pub content: String,
}

impl SnapshotEntry {
    /// Create a snapshot entry.
    pub fn new(name: impl Into<FileName>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The full set of tracked files recorded in a commit.
///
/// Entries are unique by name and keep their insertion order.
///
/// # Example
///
/// ```
/// use gitsim::core::graph::Snapshot;
///
/// let mut snap = Snapshot::default();
/// snap.upsert("a.txt", "1");
/// snap.upsert("b.txt", "2");
/// snap.upsert("a.txt", "3");
///
/// assert_eq!(snap.len(), 2);
/// assert_eq!(snap.get("a.txt"), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<SnapshotEntry>);

impl Snapshot {
    /// Create a snapshot from entries.
    ///
    /// Later duplicates of a name overwrite earlier ones in place.
    pub fn from_entries(entries: impl IntoIterator<Item = SnapshotEntry>) -> Self {
        let mut snap = Self::default();
        for entry in entries {
            snap.upsert(entry.name, entry.content);
        }
        snap
    }

    /// Content of the named file, if recorded.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| e.content.as_str())
    }

    /// Check if the named file is recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overwrite the named file's content, or append it if absent.
    pub fn upsert(&mut self, name: impl Into<FileName>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.0.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.content = content,
            None => self.0.push(SnapshotEntry { name, content }),
        }
    }

    /// A copy without any entry whose name is also recorded in `other`.
    pub fn without_names_of(&self, other: &Snapshot) -> Snapshot {
        Snapshot(
            self.0
                .iter()
                .filter(|e| !other.contains(e.name.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Append every entry of `other`, overwriting same-named entries.
    pub fn extend_from(&mut self, other: &Snapshot) {
        for entry in &other.0 {
            self.upsert(entry.name.clone(), entry.content.clone());
        }
    }

    /// File names in recorded order.
    pub fn names(&self) -> impl Iterator<Item = &FileName> {
        self.0.iter().map(|e| &e.name)
    }

    /// Entries in recorded order.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.0
    }

    /// Number of recorded files.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no files are recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A commit in the history DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Sequential id
    pub id: CommitId,
    /// Commit message
    pub message: String,
    /// Parent ids; a merge lists the target first and the source second
    pub parents: Vec<CommitId>,
    /// Branch the commit was created on
    #[serde(rename = "branches")]
    pub branch_labels: Vec<BranchName>,
    /// Creation time
    pub timestamp: UtcTimestamp,
    /// Full copy of tracked files
    pub snapshot: Snapshot,
}

impl Commit {
    /// The first parent, if any.
    pub fn first_parent(&self) -> Option<&CommitId> {
        self.parents.first()
    }

    /// True for a commit with no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True for a commit with two parents.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Append-only store of commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitGraph {
    commits: Vec<Commit>,
}

impl CommitGraph {
    /// Create a graph holding a single root commit.
    pub fn with_root(root: Commit) -> Self {
        Self {
            commits: vec![root],
        }
    }

    /// Id the next appended commit must use.
    pub fn next_id(&self) -> CommitId {
        CommitId::nth(self.commits.len() + 1)
    }

    /// Append a commit.
    ///
    /// Callers build the commit with [`CommitGraph::next_id`] and parents
    /// already present in the graph.
    pub fn append(&mut self, commit: Commit) {
        debug_assert!(!self.contains(commit.id.as_str()));
        self.commits.push(commit);
    }

    /// Look up a commit.
    pub fn get(&self, id: &str) -> Option<&Commit> {
        self.commits.iter().find(|c| c.id.as_str() == id)
    }

    /// Check if a commit exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of commits.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// True if the graph holds no commits.
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Commits in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Commit> {
        self.commits.iter()
    }

    /// Commits newest first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter().rev()
    }

    /// Snapshot of a commit, empty if the commit is unknown.
    pub fn snapshot_of(&self, id: &str) -> Snapshot {
        self.get(id).map(|c| c.snapshot.clone()).unwrap_or_default()
    }

    /// Follow first parents `steps` times from `from`.
    ///
    /// Stops early at a commit with no parents (or an unknown id) and
    /// returns the commit reached.
    ///
    /// # Example
    ///
    /// ```
    /// use gitsim::core::state::RepoState;
    ///
    /// let state = RepoState::bootstrap();
    /// let graph = state.commits();
    /// let reached = graph.first_parent_walk(&"c1".into(), 5);
    /// assert_eq!(reached.as_str(), "c1");
    /// ```
    pub fn first_parent_walk(&self, from: &CommitId, steps: usize) -> CommitId {
        let mut current = from.clone();
        for _ in 0..steps {
            match self.get(current.as_str()).and_then(Commit::first_parent) {
                Some(parent) => current = parent.clone(),
                None => break,
            }
        }
        current
    }
}
