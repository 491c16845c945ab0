//! core::history
//!
//! Submitted command lines, most recent first.
//!
//! The history is part of the persisted session. It holds each distinct
//! command once: resubmitting a command moves it back to the front.

use serde::{Deserialize, Serialize};

/// Default number of commands kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Most-recent-first list of distinct command lines.
///
/// # Example
///
/// ```
/// use gitsim::core::history::CommandHistory;
///
/// let mut history = CommandHistory::default();
/// history.record("git status", 50);
/// history.record("git log", 50);
/// history.record("git status", 50);
///
/// assert_eq!(history.entries(), &["git status", "git log"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandHistory(Vec<String>);

impl CommandHistory {
    /// Record a submitted command.
    ///
    /// Blank input is ignored. The entry is moved to the front if already
    /// present and the list is truncated to `limit`.
    pub fn record(&mut self, command: &str, limit: usize) {
        if command.trim().is_empty() {
            return;
        }
        self.0.retain(|c| c != command);
        self.0.insert(0, command.to_string());
        self.0.truncate(limit);
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// The `n` most recent entries.
    pub fn recent(&self, n: usize) -> &[String] {
        &self.0[..n.min(self.0.len())]
    }

    /// Entry at `index` (0 is the most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Up/down recall position over a [`CommandHistory`].
///
/// Starts at the empty prompt. [`older`](Self::older) steps toward older
/// entries and stops at the oldest; [`newer`](Self::newer) steps back and
/// eventually returns to the empty prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    position: Option<usize>,
}

impl HistoryCursor {
    /// Cursor at the empty prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step to an older entry and return the recalled command.
    ///
    /// Returns `None` when the history is empty.
    pub fn older<'h>(&mut self, history: &'h CommandHistory) -> Option<&'h str> {
        if history.is_empty() {
            self.position = None;
            return None;
        }
        let next = match self.position {
            None => 0,
            Some(p) => (p + 1).min(history.len() - 1),
        };
        self.position = Some(next);
        history.get(next)
    }

    /// Step to a newer entry and return the recalled command.
    ///
    /// Returns `None` once back at the empty prompt.
    pub fn newer<'h>(&mut self, history: &'h CommandHistory) -> Option<&'h str> {
        self.position = match self.position {
            None | Some(0) => None,
            Some(p) => Some(p - 1),
        };
        self.position.and_then(|p| history.get(p))
    }

    /// Return to the empty prompt.
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Current position, `None` at the empty prompt.
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}
