//! Shared world state for board ordering BDD scenarios.

use corkboard::board::{
    config::{BoardConfig, ColumnSeed},
    domain::{Outcome, StoredBoard, TaskId},
    facade::Board,
};
use rstest::fixture;
use std::collections::HashMap;

/// Scenario world for board ordering behaviour tests.
pub struct BoardWorld {
    pub board: Board,
    pub task_ids: HashMap<String, TaskId>,
    pub stored: StoredBoard,
    pub last_outcome: Option<Outcome>,
}

impl BoardWorld {
    /// Creates a world holding the default board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::with_defaults(None, BoardConfig::default()),
            task_ids: HashMap::new(),
            stored: StoredBoard::default(),
            last_outcome: None,
        }
    }

    /// Looks up the identifier of a task added by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with the title was added.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Splits a comma-separated step argument.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds a configuration whose default columns use the given identifiers.
pub fn config_with_columns(raw: &str) -> BoardConfig {
    BoardConfig::default().with_default_columns(
        split_list(raw)
            .into_iter()
            .map(|id| ColumnSeed::new(id.as_str(), id.clone())),
    )
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
