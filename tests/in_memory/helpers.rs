//! Shared test helpers for board integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use corkboard::board::{
    config::BoardConfig,
    domain::{AccountKey, ColumnId},
    facade::Board,
    ports::BoardStore,
    services::BoardSession,
};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;

/// Clock frozen at a chosen instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Provides a clock frozen at a fixed morning.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    )
}

/// Normalises a raw account identifier.
///
/// # Errors
///
/// Returns an error when the identifier is blank.
pub fn account(raw: &str) -> Result<AccountKey, eyre::Report> {
    Ok(AccountKey::new(raw)?)
}

/// Opens a session with the default configuration.
///
/// # Errors
///
/// Returns an error when the store fails.
pub async fn open_session<S>(
    store: &Arc<S>,
    clock: FixedClock,
    account: Option<AccountKey>,
) -> Result<BoardSession<S, FixedClock>, eyre::Report>
where
    S: BoardStore,
{
    Ok(BoardSession::open(
        Arc::clone(store),
        Arc::new(clock),
        BoardConfig::default(),
        account,
    )
    .await?)
}

/// Returns the titles of a column's tasks in display order.
#[must_use]
pub fn column_titles(board: &Board, column: &str) -> Vec<String> {
    board
        .tasks_in_column(&ColumnId::from(column))
        .into_iter()
        .map(|task| task.title().to_owned())
        .collect()
}
