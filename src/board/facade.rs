//! The board aggregate: the only way callers mutate a board.
//!
//! A [`Board`] owns one account's snapshot. Each mutation computes a new
//! snapshot through the ordering engine and swaps it in only once the
//! invariants hold again, so a board is never observed half-updated.

use crate::board::{
    config::BoardConfig,
    domain::{
        AccountKey, BoardDomainError, BoardSnapshot, Column, ColumnId, Outcome, SkipReason, Task,
        TaskDraft, TaskId, TaskPatch, validate_title,
    },
    ordering::{self, Reordering},
};
use mockable::Clock;
use tracing::debug;

/// One account's columns and tasks together with the operations on them.
#[derive(Debug, Clone)]
pub struct Board {
    owner: Option<AccountKey>,
    snapshot: BoardSnapshot,
    config: BoardConfig,
}

impl Board {
    /// Creates a board with the configured default columns and no tasks.
    #[must_use]
    pub fn with_defaults(owner: Option<AccountKey>, config: BoardConfig) -> Self {
        let snapshot = BoardSnapshot::new(config.seed_columns(), Vec::new());
        Self {
            owner,
            snapshot,
            config,
        }
    }

    /// Wraps a snapshot produced by load reconciliation.
    pub(crate) const fn from_snapshot(
        owner: Option<AccountKey>,
        snapshot: BoardSnapshot,
        config: BoardConfig,
    ) -> Self {
        Self {
            owner,
            snapshot,
            config,
        }
    }

    /// Returns the owning account, or `None` for a guest board.
    #[must_use]
    pub const fn owner(&self) -> Option<&AccountKey> {
        self.owner.as_ref()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Returns the board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.snapshot.columns()
    }

    /// Returns all tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.snapshot.tasks()
    }

    /// Finds a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.snapshot.column(id)
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.snapshot.task(id)
    }

    /// Returns a column's tasks in display order.
    #[must_use]
    pub fn tasks_in_column(&self, id: &ColumnId) -> Vec<&Task> {
        ordering::tasks_in_column(self.tasks(), id)
    }

    /// Adds a task at the end of its column.
    ///
    /// The draft's column is used when it exists on this board; otherwise the
    /// task lands in the first column. A board without columns gets the
    /// fallback column back first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the title is empty or too long.
    pub fn add_task(
        &mut self,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<TaskId, BoardDomainError> {
        validate_title(draft.title(), self.config.max_title_length)?;

        let mut columns = self.columns().to_vec();
        if columns.is_empty() {
            columns.push(self.config.fallback_column());
        }
        let column_id = draft
            .column_id()
            .filter(|id| columns.iter().any(|column| column.id() == *id))
            .or_else(|| columns.first().map(Column::id))
            .cloned()
            .unwrap_or_else(|| self.config.fallback_column_id.clone());

        let id = self.fresh_task_id();
        let order = ordering::next_order_for_column(self.tasks(), &column_id);
        let task = Task::create(
            id.clone(),
            draft,
            column_id.clone(),
            order,
            self.owner.clone(),
            clock,
        );
        let mut tasks = self.tasks().to_vec();
        tasks.push(task);

        self.commit(columns, tasks);
        debug!(task_id = %id, column_id = %column_id, order, "task added");
        Ok(id)
    }

    /// Merges a patch into an existing task and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the patch carries an invalid title.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<Outcome, BoardDomainError> {
        if let Some(title) = patch.new_title() {
            validate_title(title, self.config.max_title_length)?;
        }
        if self.task(id).is_none() {
            return Ok(skipped(SkipReason::UnknownTask(id.clone())));
        }

        let tasks = self
            .tasks()
            .iter()
            .cloned()
            .map(|mut task| {
                if task.id() == id {
                    task.apply_patch(patch.clone(), clock);
                }
                task
            })
            .collect();
        self.commit(self.columns().to_vec(), tasks);
        debug!(task_id = %id, "task updated");
        Ok(Outcome::Applied)
    }

    /// Removes a task and closes the gap in its column.
    pub fn delete_task(&mut self, id: &TaskId) -> Outcome {
        if self.task(id).is_none() {
            return skipped(SkipReason::UnknownTask(id.clone()));
        }
        let remaining: Vec<Task> = self
            .tasks()
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();
        self.commit(self.columns().to_vec(), ordering::normalize(&remaining));
        debug!(task_id = %id, "task deleted");
        Outcome::Applied
    }

    /// Appends a new column at the right-hand end.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] for a blank title.
    pub fn add_column(&mut self, title: &str) -> Result<ColumnId, BoardDomainError> {
        let column_title = validate_column_title(title)?;
        let id = self.fresh_column_id();
        let mut columns = self.columns().to_vec();
        let order = columns.len();
        columns.push(Column::new(id.clone(), column_title, order));
        self.commit(columns, self.tasks().to_vec());
        debug!(column_id = %id, "column added");
        Ok(id)
    }

    /// Renames a column without changing its position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] for a blank title.
    pub fn rename_column(
        &mut self,
        id: &ColumnId,
        title: &str,
    ) -> Result<Outcome, BoardDomainError> {
        let new_title = validate_column_title(title)?;
        if self.column(id).is_none() {
            return Ok(skipped(SkipReason::UnknownColumn(id.clone())));
        }
        let columns = self
            .columns()
            .iter()
            .cloned()
            .map(|mut column| {
                if column.id() == id {
                    column.rename(new_title.clone());
                }
                column
            })
            .collect();
        self.commit(columns, self.tasks().to_vec());
        debug!(column_id = %id, "column renamed");
        Ok(Outcome::Applied)
    }

    /// Deletes a column together with every task in it.
    pub fn delete_column(&mut self, id: &ColumnId) -> Outcome {
        if self.column(id).is_none() {
            return skipped(SkipReason::UnknownColumn(id.clone()));
        }
        let remaining_columns: Vec<Column> = self
            .columns()
            .iter()
            .filter(|column| column.id() != id)
            .cloned()
            .collect();
        let remaining_tasks: Vec<Task> = self
            .tasks()
            .iter()
            .filter(|task| task.column_id() != id)
            .cloned()
            .collect();
        let removed = self.tasks().len().saturating_sub(remaining_tasks.len());
        self.commit(
            ordering::normalize_columns(&remaining_columns),
            ordering::normalize(&remaining_tasks),
        );
        debug!(column_id = %id, removed_tasks = removed, "column deleted");
        Outcome::Applied
    }

    /// Moves a task within its column; see
    /// [`ordering::reorder_within_column`].
    pub fn reorder_within_column(
        &mut self,
        column_id: &ColumnId,
        from_index: usize,
        to_index: usize,
        clock: &impl Clock,
    ) -> Outcome {
        if self.column(column_id).is_none() {
            return skipped(SkipReason::UnknownColumn(column_id.clone()));
        }
        let result =
            ordering::reorder_within_column(self.tasks(), column_id, from_index, to_index, clock);
        self.apply(result)
    }

    /// Moves a task to a position in another column; see
    /// [`ordering::move_across_columns`].
    pub fn move_across_columns(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
        clock: &impl Clock,
    ) -> Outcome {
        if self.column(target_column_id).is_none() {
            return skipped(SkipReason::UnknownColumn(target_column_id.clone()));
        }
        let result = ordering::move_across_columns(
            self.tasks(),
            task_id,
            target_column_id,
            target_index,
            clock,
        );
        self.apply(result)
    }

    /// Discards every task and restores the default columns.
    pub fn reset(&mut self) {
        self.commit(self.config.seed_columns(), Vec::new());
        debug!("board reset to defaults");
    }

    fn apply(&mut self, result: Reordering) -> Outcome {
        match result {
            Ok(tasks) => {
                self.commit(self.columns().to_vec(), tasks);
                Outcome::Applied
            }
            Err(reason) => skipped(reason),
        }
    }

    fn commit(&mut self, columns: Vec<Column>, tasks: Vec<Task>) {
        let next = BoardSnapshot::new(columns, tasks);
        debug_assert_eq!(ordering::check_invariants(&next), Ok(()));
        self.snapshot = next;
    }

    fn fresh_task_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.task(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_column_id(&self) -> ColumnId {
        loop {
            let id = ColumnId::generate();
            if self.column(&id).is_none() {
                return id;
            }
        }
    }
}

fn skipped(reason: SkipReason) -> Outcome {
    debug!(%reason, "board mutation skipped");
    Outcome::Skipped(reason)
}

fn validate_column_title(title: &str) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyColumnTitle);
    }
    Ok(trimmed.to_owned())
}
