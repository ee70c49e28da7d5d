//! Session service for one account's board.
//!
//! Provides [`BoardSession`], which loads a board through a [`BoardStore`],
//! funnels every mutation through the [`Board`] façade and saves the new
//! snapshot after each applied change. Guest sessions are held in memory
//! only.

use crate::board::{
    config::BoardConfig,
    dashboard::{self, DashboardFilter, DashboardStats},
    domain::{AccountKey, BoardDomainError, ColumnId, Outcome, Task, TaskDraft, TaskId, TaskPatch},
    facade::Board,
    migration::{self, MigrationReport},
    ports::{BoardStore, BoardStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for board sessions.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// Domain validation failed; the board is unchanged.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The store failed; the in-memory board keeps the change.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// A board opened for an account or a guest.
pub struct BoardSession<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    board: Board,
    report: MigrationReport,
}

impl<S, C> BoardSession<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Opens a board.
    ///
    /// Without an account the session holds the default board and never
    /// touches the store. An account with a stored board gets it back
    /// reconciled; an account without one gets the default board, which is
    /// saved straight away.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when loading fails or the seeded
    /// board cannot be saved.
    pub async fn open(
        store: Arc<S>,
        clock: Arc<C>,
        config: BoardConfig,
        account: Option<AccountKey>,
    ) -> BoardSessionResult<Self> {
        let Some(key) = account else {
            debug!("opening guest board");
            return Ok(Self {
                store,
                clock,
                board: Board::with_defaults(None, config),
                report: MigrationReport::default(),
            });
        };

        let Some(stored) = store.load(&key).await? else {
            info!(account = %key, "seeding default board for new account");
            let board = Board::with_defaults(Some(key.clone()), config);
            store.save(&key, board.snapshot()).await?;
            return Ok(Self {
                store,
                clock,
                board,
                report: MigrationReport::default(),
            });
        };

        let (snapshot, report) = migration::reconcile(stored, &config, clock.as_ref());
        if !report.is_clean() {
            info!(account = %key, ?report, "reconciled stored board");
        }
        let board = Board::from_snapshot(Some(key), snapshot, config);
        debug!(account = ?board.owner().map(AccountKey::as_str), "board opened");
        Ok(Self {
            store,
            clock,
            board,
            report,
        })
    }

    /// Returns the live board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the session and returns its board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Returns the repairs made while loading the board.
    #[must_use]
    pub const fn migration_report(&self) -> MigrationReport {
        self.report
    }

    /// Returns `true` when the session belongs to no account.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.board.owner().is_none()
    }

    /// Computes dashboard statistics at the session clock's current time.
    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        dashboard::stats(&self.board, self.clock.as_ref())
    }

    /// Lists the tasks matching a dashboard filter, in board order.
    #[must_use]
    pub fn filter(&self, selection: &DashboardFilter) -> Vec<&Task> {
        dashboard::filter(&self.board, selection, self.clock.as_ref())
    }

    /// Adds a task; see [`Board::add_task`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError`] when the draft is invalid or the save
    /// fails.
    pub async fn add_task(&mut self, draft: TaskDraft) -> BoardSessionResult<TaskId> {
        let id = self.board.add_task(draft, self.clock.as_ref())?;
        self.persist().await?;
        Ok(id)
    }

    /// Updates a task; see [`Board::update_task`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError`] when the patch is invalid or the save
    /// fails.
    pub async fn update_task(
        &mut self,
        id: &TaskId,
        patch: TaskPatch,
    ) -> BoardSessionResult<Outcome> {
        let outcome = self.board.update_task(id, patch, self.clock.as_ref())?;
        self.persist_if_applied(outcome).await
    }

    /// Deletes a task; see [`Board::delete_task`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the save fails.
    pub async fn delete_task(&mut self, id: &TaskId) -> BoardSessionResult<Outcome> {
        let outcome = self.board.delete_task(id);
        self.persist_if_applied(outcome).await
    }

    /// Adds a column; see [`Board::add_column`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError`] when the title is blank or the save
    /// fails.
    pub async fn add_column(&mut self, title: &str) -> BoardSessionResult<ColumnId> {
        let id = self.board.add_column(title)?;
        self.persist().await?;
        Ok(id)
    }

    /// Renames a column; see [`Board::rename_column`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError`] when the title is blank or the save
    /// fails.
    pub async fn rename_column(
        &mut self,
        id: &ColumnId,
        title: &str,
    ) -> BoardSessionResult<Outcome> {
        let outcome = self.board.rename_column(id, title)?;
        self.persist_if_applied(outcome).await
    }

    /// Deletes a column and its tasks; see [`Board::delete_column`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the save fails.
    pub async fn delete_column(&mut self, id: &ColumnId) -> BoardSessionResult<Outcome> {
        let outcome = self.board.delete_column(id);
        self.persist_if_applied(outcome).await
    }

    /// Reorders a task within its column; see
    /// [`Board::reorder_within_column`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the save fails.
    pub async fn reorder_within_column(
        &mut self,
        column_id: &ColumnId,
        from_index: usize,
        to_index: usize,
    ) -> BoardSessionResult<Outcome> {
        let outcome = self.board.reorder_within_column(
            column_id,
            from_index,
            to_index,
            self.clock.as_ref(),
        );
        self.persist_if_applied(outcome).await
    }

    /// Moves a task into another column; see
    /// [`Board::move_across_columns`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the save fails.
    pub async fn move_across_columns(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> BoardSessionResult<Outcome> {
        let outcome = self.board.move_across_columns(
            task_id,
            target_column_id,
            target_index,
            self.clock.as_ref(),
        );
        self.persist_if_applied(outcome).await
    }

    /// Replaces the board with the default columns and no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Store`] when the save fails.
    pub async fn reset(&mut self) -> BoardSessionResult<()> {
        self.board.reset();
        self.persist().await
    }

    async fn persist_if_applied(&self, outcome: Outcome) -> BoardSessionResult<Outcome> {
        if outcome.is_applied() {
            self.persist().await?;
        }
        Ok(outcome)
    }

    async fn persist(&self) -> BoardSessionResult<()> {
        let Some(account) = self.board.owner() else {
            return Ok(());
        };
        self.store
            .save(account, self.board.snapshot())
            .await
            .map_err(|err| {
                warn!(account = %account, error = %err, "failed to save board");
                BoardSessionError::Store(err)
            })
    }
}
