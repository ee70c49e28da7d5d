//! Consistent `(columns, tasks)` pairs exchanged with the ordering engine and
//! persistence adapters.

use super::{Column, ColumnId, Task, TaskId};
use serde::Serialize;

/// An immutable-in-contract view of one board.
///
/// Columns are kept sorted by their order. Snapshots are only produced by the
/// ordering engine, the board aggregate or load reconciliation, so every
/// snapshot handed out satisfies the board invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl BoardSnapshot {
    pub(crate) const fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns all tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Splits the snapshot into its columns and tasks.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Column>, Vec<Task>) {
        (self.columns, self.tasks)
    }
}
