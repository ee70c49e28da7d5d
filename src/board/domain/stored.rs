//! Persisted record shapes.
//!
//! Stored boards may predate explicit column placement: early tasks carried
//! only a fixed `status` label. Both shapes are accepted on read and resolved
//! once by load reconciliation; the live board never sees the legacy shape.

use super::{AccountKey, BoardSnapshot, Column, ColumnId, Priority, Task, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A board as read from or written to a persistence backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredBoard {
    /// Stored columns, possibly unordered.
    #[serde(default)]
    pub columns: Vec<StoredColumn>,
    /// Stored tasks in either shape.
    #[serde(default)]
    pub tasks: Vec<StoredTask>,
}

impl From<&BoardSnapshot> for StoredBoard {
    fn from(snapshot: &BoardSnapshot) -> Self {
        Self {
            columns: snapshot.columns().iter().map(StoredColumn::from).collect(),
            tasks: snapshot
                .tasks()
                .iter()
                .cloned()
                .map(StoredTask::Current)
                .collect(),
        }
    }
}

/// A stored column. `order` may be missing in hand-edited data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredColumn {
    /// Column identifier.
    pub id: ColumnId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Display position, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

impl From<&Column> for StoredColumn {
    fn from(column: &Column) -> Self {
        Self {
            id: column.id().clone(),
            title: column.title().to_owned(),
            order: Some(column.order()),
        }
    }
}

/// A stored task in either the current or the legacy shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredTask {
    /// Task with explicit column placement and order.
    Current(Task),
    /// Task keyed by a status label, or missing placement fields.
    Legacy(LegacyTask),
}

/// Task record from before columns were user-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTask {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Priority label; unknown labels read as medium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Legacy status label such as `todo` or `done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Column identifier, when the record was partially migrated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<ColumnId>,
    /// Order of any JSON type; only non-negative integers are honoured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Latest modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Due date as `YYYY-MM-DD`; unparseable values are dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Creating account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl LegacyTask {
    /// Creates a legacy record carrying only a status label.
    #[must_use]
    pub fn with_status(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority: None,
            status: Some(status.into()),
            column_id: None,
            order: None,
            created_at: None,
            updated_at: None,
            due_date: None,
            owner: None,
        }
    }

    /// Returns the priority, defaulting unknown or missing labels to medium.
    #[must_use]
    pub fn parsed_priority(&self) -> Priority {
        self.priority
            .as_deref()
            .and_then(|label| Priority::try_from(label).ok())
            .unwrap_or_default()
    }

    /// Returns the order when it is a non-negative integer.
    #[must_use]
    pub fn numeric_order(&self) -> Option<usize> {
        self.order
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|order| usize::try_from(order).ok())
    }

    /// Returns the due date when it parses as `YYYY-MM-DD`.
    #[must_use]
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }

    /// Returns the normalised owner key, if one is present and non-empty.
    #[must_use]
    pub fn parsed_owner(&self) -> Option<AccountKey> {
        self.owner
            .as_deref()
            .and_then(|raw| AccountKey::new(raw).ok())
    }
}
