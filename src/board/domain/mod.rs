//! Domain model for the Kanban board.
//!
//! Tasks, columns and the snapshots that pair them, plus the stored shapes
//! read back from persistence. The types here carry no infrastructure
//! dependencies.

mod column;
mod error;
mod ids;
mod outcome;
mod snapshot;
mod stored;
mod task;

pub use column::Column;
pub use error::{BoardDomainError, ParsePriorityError};
pub use ids::{AccountKey, ColumnId, TaskId};
pub use outcome::{Outcome, SkipReason};
pub use snapshot::BoardSnapshot;
pub use stored::{LegacyTask, StoredBoard, StoredColumn, StoredTask};
pub use task::{PersistedTaskData, Priority, Task, TaskDraft, TaskPatch};

pub(crate) use task::validate_title;
