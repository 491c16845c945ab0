//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Name of a branch in the branch table
//! - [`CommitId`] - Sequential commit identifier (`c1`, `c2`, ...)
//! - [`FileName`] - Name of a tracked file
//! - [`FileStatus`] - Working-set status of a file
//! - [`Head`] - The HEAD reference (attached or detached)
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Examples
//!
//! ```
//! use gitsim::core::types::{BranchName, CommitId, Head};
//!
//! let main = BranchName::new("main");
//! let head = Head::attached(main.clone(), CommitId::nth(1));
//! assert_eq!(head.branch(), Some(&main));
//! assert_eq!(head.commit().as_str(), "c1");
//! assert!(!head.is_detached());
//! ```

use serde::{Deserialize, Serialize};

/// Implements the string plumbing shared by the name newtypes.
macro_rules! string_newtype {
    ($name:ident) => {
        impl $name {
            /// Get the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// A branch name.
///
/// Any whitespace-free token the interpreter receives is accepted; the
/// command language has no branch-name rules beyond tokenization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Create a branch name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

string_newtype!(BranchName);

/// A commit identifier.
///
/// Ids are handed out sequentially from the size of the commit graph, so
/// they stay unique as long as commits are never removed.
///
/// # Example
///
/// ```
/// use gitsim::core::types::CommitId;
///
/// assert_eq!(CommitId::nth(3).as_str(), "c3");
/// assert_eq!(CommitId::new("c3"), CommitId::nth(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Create a commit id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the `n`th commit ever created (1-based).
    pub fn nth(n: usize) -> Self {
        Self(format!("c{n}"))
    }
}

string_newtype!(CommitId);

/// A tracked file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Create a file name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

string_newtype!(FileName);

/// Working-set status of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Content matches what was last committed or seeded.
    #[default]
    Unmodified,
    /// Marked for inclusion in the next commit.
    Staged,
    /// Edited since the last commit and not staged.
    Modified,
}

impl FileStatus {
    /// Lowercase label used in views.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Unmodified => "unmodified",
            FileStatus::Staged => "staged",
            FileStatus::Modified => "modified",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The HEAD reference.
///
/// Attached: `branch` is set and `commit` mirrors that branch's entry in the
/// branch table. Detached: `branch` is `None` and `commit` is any existing
/// commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    branch: Option<BranchName>,
    commit: CommitId,
}

impl Head {
    /// HEAD attached to `branch`, currently at `commit`.
    pub fn attached(branch: BranchName, commit: CommitId) -> Self {
        Self {
            branch: Some(branch),
            commit,
        }
    }

    /// HEAD detached at `commit`.
    pub fn detached(commit: CommitId) -> Self {
        Self {
            branch: None,
            commit,
        }
    }

    /// The attached branch, if any.
    pub fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    /// The commit HEAD points at.
    pub fn commit(&self) -> &CommitId {
        &self.commit
    }

    /// True when no branch is attached.
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }

    /// Same attachment, new commit.
    pub(crate) fn with_commit(&self, commit: CommitId) -> Self {
        Self {
            branch: self.branch.clone(),
            commit,
        }
    }
}

/// A UTC timestamp.
///
/// # Example
///
/// ```
/// use gitsim::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
