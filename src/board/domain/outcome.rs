//! Results of mutations that may legitimately do nothing.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Whether a board mutation changed the board.
///
/// Unknown identifiers and stale drag indices are routine when a UI retries
/// or races, so they leave the board untouched and report why instead of
/// failing.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation was applied and the board changed.
    Applied,
    /// The mutation was a no-op.
    Skipped(SkipReason),
}

impl Outcome {
    /// Returns `true` when the mutation was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Returns the skip reason, if the mutation was a no-op.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Applied => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}

impl From<SkipReason> for Outcome {
    fn from(reason: SkipReason) -> Self {
        Self::Skipped(reason)
    }
}

/// Why a mutation left the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// No task with this identifier exists.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// No column with this identifier exists.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// Source and destination index are the same.
    #[error("task is already at index {index}")]
    SameIndex {
        /// The requested index.
        index: usize,
    },

    /// A reorder index lies outside the column.
    #[error(
        "reorder in column {column_id} out of range: \
         from {from_index} to {to_index} with {len} tasks"
    )]
    IndexOutOfRange {
        /// Column being reordered.
        column_id: ColumnId,
        /// Requested source index.
        from_index: usize,
        /// Requested destination index.
        to_index: usize,
        /// Number of tasks in the column.
        len: usize,
    },
}
