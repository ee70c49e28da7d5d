//! Unit tests for the board module.


use crate::board::{
    config::{BoardConfig, ColumnSeed},
    domain::{ColumnId, Task, TaskDraft, TaskId},
    facade::Board,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at a chosen instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(crate) const fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Returns a clock `minutes` later than this one.
    pub(crate) fn later(self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn start_clock() -> FixedClock {
    FixedClock::at(
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp"),
    )
}

/// Board with columns `todo`, `doing` and `done`.
pub(crate) fn three_column_board() -> Board {
    let config = BoardConfig::default().with_default_columns([
        ColumnSeed::new("todo", "To Do"),
        ColumnSeed::new("doing", "Doing"),
        ColumnSeed::new("done", "Done"),
    ]);
    Board::with_defaults(None, config)
}

#[fixture]
pub(crate) fn fixed_clock() -> FixedClock {
    start_clock()
}

#[fixture]
pub(crate) fn board() -> Board {
    three_column_board()
}

pub(crate) fn add(board: &mut Board, title: &str, column: &str, clock: &FixedClock) -> TaskId {
    board
        .add_task(TaskDraft::new(title).in_column(column), clock)
        .expect("task should be added")
}

/// Titles of a column's tasks in display order.
pub(crate) fn titles(board: &Board, column: &str) -> Vec<String> {
    board
        .tasks_in_column(&ColumnId::from(column))
        .into_iter()
        .map(|task| task.title().to_owned())
        .collect()
}

pub(crate) fn orders(board: &Board, column: &str) -> Vec<usize> {
    board
        .tasks_in_column(&ColumnId::from(column))
        .into_iter()
        .map(Task::order)
        .collect()
}
