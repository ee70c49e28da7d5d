//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Validation errors raised before a board mutation is applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the configured maximum length.
    #[error("task title is {actual} characters long, the maximum is {max}")]
    TaskTitleTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// The account key is empty after trimming.
    #[error("account key must not be empty")]
    EmptyAccountKey,

    /// The account key exceeds the storable length.
    #[error("account key is {actual} characters long, the maximum is {max}")]
    AccountKeyTooLong {
        /// Maximum length in characters.
        max: usize,
        /// Length of the rejected key in characters.
        actual: usize,
    },
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
