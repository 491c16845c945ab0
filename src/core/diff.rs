//! core::diff
//!
//! Line diff engine for history inspection.
//!
//! # Algorithm
//!
//! [`diff_lines`] is positional: line `i` of the old text is compared with
//! line `i` of the new text. It does not search for a minimal edit script,
//! so an inserted line shifts every following pair and reports them all as
//! changed. The output is only ever shown to people; merges never use it.
//!
//! [`diff_commit`] applies it per file between a commit and its first
//! parent (a root commit is compared against an empty snapshot).

use serde::{Deserialize, Serialize};

use super::graph::{CommitGraph, Snapshot};
use super::types::{CommitId, FileName};

/// Kind of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Added,
    Removed,
}

impl DiffKind {
    /// Single-character prefix for unified-style rendering.
    pub fn prefix(&self) -> char {
        match self {
            DiffKind::Equal => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        }
    }
}

/// One line of diff output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub line: String,
}

impl DiffLine {
    fn new(kind: DiffKind, line: &str) -> Self {
        Self {
            kind,
            line: line.to_string(),
        }
    }
}

/// Compare two texts line by line at equal indices.
///
/// Equal pairs produce one `Equal` line. A differing pair produces a
/// `Removed` line for the old side and then an `Added` line for the new
/// side, each omitted when that side's line is empty or missing.
///
/// # Example
///
/// ```
/// use gitsim::core::diff::{diff_lines, DiffKind};
///
/// let diff = diff_lines("a\nb", "a\nc");
/// let kinds: Vec<_> = diff.iter().map(|d| d.kind).collect();
/// assert_eq!(kinds, vec![DiffKind::Equal, DiffKind::Removed, DiffKind::Added]);
/// ```
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let len = old_lines.len().max(new_lines.len());

    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let o = old_lines.get(i).copied().unwrap_or("");
        let n = new_lines.get(i).copied().unwrap_or("");
        if o == n {
            out.push(DiffLine::new(DiffKind::Equal, o));
        } else {
            if !o.is_empty() {
                out.push(DiffLine::new(DiffKind::Removed, o));
            }
            if !n.is_empty() {
                out.push(DiffLine::new(DiffKind::Added, n));
            }
        }
    }
    out
}

/// Changes to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    pub name: FileName,
    pub lines: Vec<DiffLine>,
}

/// Changes a commit introduced relative to its first parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDiff {
    pub commit: CommitId,
    pub parent: Option<CommitId>,
    pub files: Vec<FileDiff>,
}

impl CommitDiff {
    /// True when the commit's snapshot equals its parent's.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Diff two snapshots file by file.
///
/// Files are visited in `old` order, then names only in `new`. Unchanged
/// files are skipped; a file missing on one side counts as empty there.
pub fn diff_snapshots(old: &Snapshot, new: &Snapshot) -> Vec<FileDiff> {
    let mut names: Vec<&FileName> = old.names().collect();
    for name in new.names() {
        if !old.contains(name.as_str()) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .filter_map(|name| {
            let before = old.get(name.as_str()).unwrap_or("");
            let after = new.get(name.as_str()).unwrap_or("");
            (before != after).then(|| FileDiff {
                name: name.clone(),
                lines: diff_lines(before, after),
            })
        })
        .collect()
}

/// Diff a commit against its first parent.
///
/// Returns `None` if the commit does not exist.
pub fn diff_commit(graph: &CommitGraph, id: &str) -> Option<CommitDiff> {
    let commit = graph.get(id)?;
    let parent = commit.first_parent().cloned();
    let base = parent
        .as_ref()
        .map(|p| graph.snapshot_of(p.as_str()))
        .unwrap_or_default();

    Some(CommitDiff {
        commit: commit.id.clone(),
        parent,
        files: diff_snapshots(&base, &commit.snapshot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{Commit, SnapshotEntry};
    use crate::core::types::{BranchName, UtcTimestamp};

    fn kinds(diff: &[DiffLine]) -> Vec<DiffKind> {
        diff.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn identical_texts_are_all_equal() {
        let diff = diff_lines("a\nb\nc", "a\nb\nc");
        assert_eq!(diff.len(), 3);
        assert!(diff.iter().all(|d| d.kind == DiffKind::Equal));
    }

    #[test]
    fn changed_line_is_removed_then_added() {
        let diff = diff_lines("x", "y");
        assert_eq!(
            diff,
            vec![
                DiffLine::new(DiffKind::Removed, "x"),
                DiffLine::new(DiffKind::Added, "y"),
            ]
        );
    }

    #[test]
    fn appended_line_only_adds() {
        let diff = diff_lines("a", "a\nb");
        assert_eq!(kinds(&diff), vec![DiffKind::Equal, DiffKind::Added]);
        assert_eq!(diff[1].line, "b");
    }

    #[test]
    fn empty_side_is_omitted() {
        let diff = diff_lines("", "hello");
        assert_eq!(diff, vec![DiffLine::new(DiffKind::Added, "hello")]);

        let diff = diff_lines("bye", "");
        assert_eq!(diff, vec![DiffLine::new(DiffKind::Removed, "bye")]);
    }

    #[test]
    fn insertion_shifts_following_lines() {
        // Positional, so every line after the insertion is reported.
        let diff = diff_lines("a\nb", "new\na\nb");
        assert_eq!(
            kinds(&diff),
            vec![
                DiffKind::Removed,
                DiffKind::Added,
                DiffKind::Removed,
                DiffKind::Added,
                DiffKind::Added,
            ]
        );
    }

    fn commit(id: &str, parents: &[&str], files: &[(&str, &str)]) -> Commit {
        Commit {
            id: id.into(),
            message: String::new(),
            parents: parents.iter().map(|p| CommitId::from(*p)).collect(),
            branch_labels: vec![BranchName::new("main")],
            timestamp: UtcTimestamp::now(),
            snapshot: Snapshot::from_entries(
                files.iter().map(|(n, c)| SnapshotEntry::new(*n, *c)),
            ),
        }
    }

    #[test]
    fn root_commit_diffs_against_empty() {
        let graph = CommitGraph::with_root(commit("c1", &[], &[("a", "1")]));
        let diff = diff_commit(&graph, "c1").unwrap();
        assert_eq!(diff.parent, None);
        assert_eq!(diff.files.len(), 1);
        assert_eq!(kinds(&diff.files[0].lines), vec![DiffKind::Added]);
    }

    #[test]
    fn commit_diff_skips_unchanged_and_covers_union() {
        let mut graph =
            CommitGraph::with_root(commit("c1", &[], &[("keep", "same"), ("gone", "old")]));
        graph.append(commit(
            "c2",
            &["c1"],
            &[("keep", "same"), ("gone", ""), ("new", "fresh")],
        ));

        let diff = diff_commit(&graph, "c2").unwrap();
        let names: Vec<_> = diff.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["gone", "new"]);
    }

    #[test]
    fn unchanged_commit_has_empty_diff() {
        let mut graph = CommitGraph::with_root(commit("c1", &[], &[("a", "1")]));
        graph.append(commit("c2", &["c1"], &[("a", "1")]));
        assert!(diff_commit(&graph, "c2").unwrap().is_empty());
    }

    #[test]
    fn merge_commit_diffs_against_first_parent() {
        let mut graph = CommitGraph::with_root(commit("c1", &[], &[("a", "1")]));
        graph.append(commit("c2", &["c1"], &[("a", "2")]));
        graph.append(commit("c3", &["c1", "c2"], &[("a", "2")]));

        let diff = diff_commit(&graph, "c3").unwrap();
        assert_eq!(diff.parent.as_ref().map(|p| p.as_str()), Some("c1"));
        assert_eq!(diff.files.len(), 1);
    }

    #[test]
    fn unknown_commit_is_none() {
        let graph = CommitGraph::with_root(commit("c1", &[], &[]));
        assert!(diff_commit(&graph, "c42").is_none());
    }
}
