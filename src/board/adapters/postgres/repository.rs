//! `PostgreSQL` board store.

use super::{
    models::{BoardRow, NewBoardRow},
    schema::boards,
};
use crate::board::{
    domain::{AccountKey, BoardSnapshot, StoredBoard},
    ports::{BoardStore, BoardStoreError, BoardStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;
use mockable::Clock;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the board store.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    pool: BoardPgPool,
    clock: Arc<C>,
}

impl<C> PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store from a connection pool; `clock` stamps each save.
    #[must_use]
    pub const fn new(pool: BoardPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardStoreError::persistence)?
    }
}

#[async_trait]
impl<C> BoardStore for PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    async fn load(&self, account: &AccountKey) -> BoardStoreResult<Option<StoredBoard>> {
        let key = account.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::account_key.eq(&key))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardStoreError::persistence)?;
            row.map(row_to_stored).transpose()
        })
        .await
    }

    async fn save(&self, account: &AccountKey, board: &BoardSnapshot) -> BoardStoreResult<()> {
        let new_row = to_new_row(account, board, self.clock.as_ref())?;
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .on_conflict(boards::account_key)
                .do_update()
                .set((
                    boards::document.eq(excluded(boards::document)),
                    boards::updated_at.eq(excluded(boards::updated_at)),
                ))
                .execute(connection)
                .map_err(BoardStoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_new_row(
    account: &AccountKey,
    board: &BoardSnapshot,
    clock: &impl Clock,
) -> BoardStoreResult<NewBoardRow> {
    let document = serde_json::to_value(StoredBoard::from(board))
        .map_err(|err| BoardStoreError::corrupt(account.as_str(), &err))?;
    Ok(NewBoardRow {
        account_key: account.as_str().to_owned(),
        document,
        updated_at: clock.utc(),
    })
}

fn row_to_stored(row: BoardRow) -> BoardStoreResult<StoredBoard> {
    let BoardRow {
        account_key,
        document,
        ..
    } = row;
    serde_json::from_value(document).map_err(|err| BoardStoreError::corrupt(account_key, &err))
}
