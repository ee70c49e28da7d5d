//! Board and storage configuration.

use crate::board::domain::{Column, ColumnId};

/// Identifier and title of a column created for new and guest boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSeed {
    /// Well-known column identifier.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
}

impl ColumnSeed {
    /// Creates a column seed.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Configuration for board behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Columns of a freshly created or reset board, left to right.
    pub default_columns: Vec<ColumnSeed>,
    /// Column used for new tasks when the board has no columns at all.
    pub fallback_column_id: ColumnId,
    /// Maximum task title length in characters.
    pub max_title_length: usize,
    /// Columns whose tasks count as completed on the dashboard.
    pub completed_column_ids: Vec<ColumnId>,
    /// Number of tasks listed as recent on the dashboard.
    pub recent_task_limit: usize,
    /// Legacy status labels that name a column under another identifier.
    pub legacy_status_aliases: Vec<(String, ColumnId)>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_columns: vec![
                ColumnSeed::new("todo", "To Do"),
                ColumnSeed::new("in-progress", "In Progress"),
                ColumnSeed::new("done", "Done"),
            ],
            fallback_column_id: ColumnId::from("todo"),
            max_title_length: 200,
            completed_column_ids: vec![ColumnId::from("done")],
            recent_task_limit: 5,
            legacy_status_aliases: vec![
                ("inprogress".to_owned(), ColumnId::from("in-progress")),
                ("completed".to_owned(), ColumnId::from("done")),
            ],
        }
    }
}

impl BoardConfig {
    /// Replaces the default columns.
    #[must_use]
    pub fn with_default_columns(mut self, columns: impl IntoIterator<Item = ColumnSeed>) -> Self {
        self.default_columns = columns.into_iter().collect();
        self
    }

    /// Replaces the maximum title length.
    #[must_use]
    pub const fn with_max_title_length(mut self, max_title_length: usize) -> Self {
        self.max_title_length = max_title_length;
        self
    }

    /// Replaces the set of completed columns.
    #[must_use]
    pub fn with_completed_columns(mut self, ids: impl IntoIterator<Item = ColumnId>) -> Self {
        self.completed_column_ids = ids.into_iter().collect();
        self
    }

    /// Replaces the number of recent tasks reported by the dashboard.
    #[must_use]
    pub const fn with_recent_task_limit(mut self, limit: usize) -> Self {
        self.recent_task_limit = limit;
        self
    }

    /// Maps an additional legacy status label onto a column.
    #[must_use]
    pub fn with_legacy_status_alias(
        mut self,
        status: impl Into<String>,
        column_id: impl Into<ColumnId>,
    ) -> Self {
        self.legacy_status_aliases
            .push((status.into(), column_id.into()));
        self
    }

    /// Returns the column a legacy status label is an alias for.
    #[must_use]
    pub fn legacy_status_alias(&self, status: &str) -> Option<&ColumnId> {
        self.legacy_status_aliases
            .iter()
            .find(|(alias, _)| alias == status)
            .map(|(_, column_id)| column_id)
    }

    /// Builds the default columns with dense orders.
    #[must_use]
    pub fn seed_columns(&self) -> Vec<Column> {
        self.default_columns
            .iter()
            .enumerate()
            .map(|(order, seed)| Column::new(seed.id.clone(), seed.title.clone(), order))
            .collect()
    }

    /// Builds the column recreated when a task is added to an empty board.
    #[must_use]
    pub fn fallback_column(&self) -> Column {
        let title = self
            .default_columns
            .iter()
            .find(|seed| seed.id == self.fallback_column_id)
            .map_or("To Do", |seed| seed.title.as_str());
        Column::new(self.fallback_column_id.clone(), title, 0)
    }

    /// Returns `true` when tasks in the column count as completed.
    #[must_use]
    pub fn is_completed_column(&self, id: &ColumnId) -> bool {
        self.completed_column_ids.contains(id)
    }
}

/// Key layout used by key-value persistence backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key of the consolidated board document.
    pub database_key: String,
    /// Prefix of legacy per-account task entries.
    pub legacy_tasks_prefix: String,
    /// Prefix of legacy per-account column entries.
    pub legacy_columns_prefix: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            database_key: "kanban-db".to_owned(),
            legacy_tasks_prefix: "kanban-tasks::".to_owned(),
            legacy_columns_prefix: "kanban-columns::".to_owned(),
        }
    }
}

impl StorageKeys {
    /// Version written into the consolidated document.
    pub const DOCUMENT_VERSION: u32 = 1;

    /// Returns the legacy column key paired with an account's task key.
    #[must_use]
    pub fn legacy_columns_key(&self, account: &str) -> String {
        format!("{}{account}", self.legacy_columns_prefix)
    }

    /// Returns `true` for any key in the legacy per-account layout.
    #[must_use]
    pub fn is_legacy_key(&self, key: &str) -> bool {
        key.starts_with(self.legacy_tasks_prefix.trim_end_matches(':'))
            || key.starts_with(self.legacy_columns_prefix.trim_end_matches(':'))
    }
}
