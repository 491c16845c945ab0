//! core::branches
//!
//! The branch table: movable name -> commit pointers.
//!
//! # Invariants
//!
//! - Every value references a commit in the graph. This is guaranteed by the
//!   interpreter at write time and re-checked by [`crate::core::verify`] when
//!   a persisted session is loaded.
//! - Entries are never removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{BranchName, CommitId};

/// Mapping from branch name to the commit it points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchTable(BTreeMap<BranchName, CommitId>);

impl BranchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commit a branch points at.
    pub fn get(&self, name: &str) -> Option<&CommitId> {
        self.0.get(name)
    }

    /// Check if a branch exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Add a new branch.
    ///
    /// Returns `false` and leaves the table unchanged if the name is taken.
    pub fn create(&mut self, name: BranchName, at: CommitId) -> bool {
        if self.0.contains_key(&name) {
            return false;
        }
        self.0.insert(name, at);
        true
    }

    /// Point a branch at a commit, creating the entry if needed.
    pub fn set(&mut self, name: BranchName, at: CommitId) {
        self.0.insert(name, at);
    }

    /// Branches sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &CommitId)> {
        self.0.iter()
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no branches.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
