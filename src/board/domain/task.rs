//! Task records and the request objects used to create and edit them.

use super::{AccountKey, BoardDomainError, ColumnId, ParsePriorityError, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A card on the board.
///
/// `column_id` and `order` place the task; both are managed by the ordering
/// engine and can only change through board operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    priority: Priority,
    column_id: ColumnId,
    order: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<AccountKey>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Column the task belongs to.
    pub column_id: ColumnId,
    /// Position within the column.
    pub order: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Account that created the task, if any.
    pub owner: Option<AccountKey>,
}

impl Task {
    /// Creates a task placed at `order` in `column_id`.
    pub(crate) fn create(
        id: TaskId,
        draft: TaskDraft,
        column_id: ColumnId,
        order: usize,
        owner: Option<AccountKey>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: draft.title.trim().to_owned(),
            description: draft.description,
            priority: draft.priority,
            column_id,
            order,
            created_at: timestamp,
            updated_at: timestamp,
            due_date: draft.due_date,
            owner,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            column_id: data.column_id,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
            due_date: data.due_date,
            owner: data.owner,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the column the task belongs to.
    #[must_use]
    pub const fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// Returns the zero-based position within the column.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the account that created the task, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<&AccountKey> {
        self.owner.as_ref()
    }

    pub(crate) const fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    /// Moves the task into another column; the caller renumbers both columns.
    pub(crate) fn relocate(&mut self, column_id: ColumnId, clock: &impl Clock) {
        self.column_id = column_id;
        self.touch(clock);
    }

    pub(crate) fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_owned();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.touch(clock);
    }

    /// Raises `updated_at` to `created_at` when it lags behind.
    ///
    /// Returns `true` when the timestamp was changed.
    pub(crate) fn clamp_timestamps(&mut self) -> bool {
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
            return true;
        }
        false
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub(crate) fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}

/// Request payload for adding a task to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<NaiveDate>,
    column_id: Option<ColumnId>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            column_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Requests a target column. Unknown columns fall back to the first one.
    #[must_use]
    pub fn in_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    /// Returns the requested column, if any.
    #[must_use]
    pub const fn column_id(&self) -> Option<&ColumnId> {
        self.column_id.as_ref()
    }

    /// Returns the raw title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Partial update for an existing task.
///
/// Identity, creation time and placement are not part of the patch: they are
/// either immutable or owned by the ordering operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Creates an empty patch; applying it only refreshes `updated_at`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn new_title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Validates a task title against the configured maximum length.
pub(crate) fn validate_title(title: &str, max_length: usize) -> Result<(), BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    let actual = trimmed.chars().count();
    if actual > max_length {
        return Err(BoardDomainError::TaskTitleTooLong {
            max: max_length,
            actual,
        });
    }
    Ok(())
}
