//! Load reconciliation.
//!
//! Turns whatever a persistence backend returned into a snapshot that
//! satisfies the board invariants. Legacy tasks keyed by a status label are
//! placed into the column whose identifier matches the label, then the
//! column the label is a configured alias for, or the first column
//! otherwise. Reconciling an already reconciled board changes nothing.

use crate::board::{
    config::BoardConfig,
    domain::{
        BoardSnapshot, Column, ColumnId, LegacyTask, PersistedTaskData, StoredBoard, StoredColumn,
        StoredTask, Task,
    },
    ordering,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashSet;
use tracing::{info, warn};

/// Summary of the repairs made while reconciling a stored board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Tasks converted from the legacy shape.
    pub legacy_tasks: usize,
    /// Tasks dropped because their column does not exist.
    pub orphaned_tasks: usize,
    /// Tasks dropped because an earlier task had the same identifier.
    pub duplicate_tasks: usize,
    /// Columns dropped because an earlier column had the same identifier.
    pub duplicate_columns: usize,
    /// Tasks whose `updated_at` was raised to `created_at`.
    pub clamped_timestamps: usize,
    /// Whether the default columns were seeded into a board without columns.
    pub seeded_columns: bool,
}

impl MigrationReport {
    /// Returns `true` when the stored board needed no repairs.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.legacy_tasks == 0
            && self.orphaned_tasks == 0
            && self.duplicate_tasks == 0
            && self.duplicate_columns == 0
            && self.clamped_timestamps == 0
            && !self.seeded_columns
    }
}

/// Reconciles a stored board into a consistent snapshot.
///
/// `clock` stamps legacy tasks that carry no creation time.
#[must_use]
pub fn reconcile(
    stored: StoredBoard,
    config: &BoardConfig,
    clock: &impl Clock,
) -> (BoardSnapshot, MigrationReport) {
    let mut report = MigrationReport::default();
    let now = clock.utc();

    let mut columns = reconcile_columns(stored.columns, &mut report);
    if columns.is_empty() {
        warn!("stored board has no columns, seeding defaults");
        columns = config.seed_columns();
        report.seeded_columns = true;
    }

    let first_column = columns
        .first()
        .map_or_else(|| config.fallback_column_id.clone(), |column| column.id().clone());
    let column_ids: HashSet<_> = columns.iter().map(|column| column.id().clone()).collect();
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(stored.tasks.len());
    for stored_task in stored.tasks {
        let mut task = match stored_task {
            StoredTask::Current(task) => task,
            StoredTask::Legacy(legacy) => {
                report.legacy_tasks = report.legacy_tasks.saturating_add(1);
                from_legacy(legacy, &columns, config, &first_column, now)
            }
        };
        if !seen.insert(task.id().clone()) {
            warn!(task_id = %task.id(), "dropping task with duplicate identifier");
            report.duplicate_tasks = report.duplicate_tasks.saturating_add(1);
            continue;
        }
        if !column_ids.contains(task.column_id()) {
            warn!(
                task_id = %task.id(),
                column_id = %task.column_id(),
                "dropping task whose column no longer exists"
            );
            report.orphaned_tasks = report.orphaned_tasks.saturating_add(1);
            continue;
        }
        if task.clamp_timestamps() {
            report.clamped_timestamps = report.clamped_timestamps.saturating_add(1);
        }
        tasks.push(task);
    }

    if report.legacy_tasks > 0 {
        info!(count = report.legacy_tasks, "migrated legacy tasks to columns");
    }

    let snapshot = BoardSnapshot::new(columns, ordering::normalize(&tasks));
    debug_assert_eq!(ordering::check_invariants(&snapshot), Ok(()));
    (snapshot, report)
}

fn reconcile_columns(stored: Vec<StoredColumn>, report: &mut MigrationReport) -> Vec<Column> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(stored.len());
    for column in stored {
        if !seen.insert(column.id.clone()) {
            warn!(column_id = %column.id, "dropping column with duplicate identifier");
            report.duplicate_columns = report.duplicate_columns.saturating_add(1);
            continue;
        }
        let order = column.order.unwrap_or(usize::MAX);
        columns.push(Column::new(column.id, column.title, order));
    }
    ordering::normalize_columns(&columns)
}

/// Converts a legacy record, resolving its column against `columns`.
fn from_legacy(
    legacy: LegacyTask,
    columns: &[Column],
    config: &BoardConfig,
    first_column: &ColumnId,
    now: DateTime<Utc>,
) -> Task {
    let column_id = legacy.column_id.clone().unwrap_or_else(|| {
        legacy
            .status
            .as_deref()
            .and_then(|status| resolve_status(status, columns, config))
            .unwrap_or_else(|| first_column.clone())
    });
    let created_at = legacy.created_at.unwrap_or(now);

    Task::from_persisted(PersistedTaskData {
        priority: legacy.parsed_priority(),
        order: legacy.numeric_order().unwrap_or(0),
        due_date: legacy.parsed_due_date(),
        owner: legacy.parsed_owner(),
        column_id,
        created_at,
        updated_at: legacy.updated_at.unwrap_or(created_at),
        id: legacy.id,
        title: legacy.title,
        description: legacy.description,
    })
}

/// Finds the column for a legacy status: exact identifier first, then alias.
fn resolve_status(status: &str, columns: &[Column], config: &BoardConfig) -> Option<ColumnId> {
    let exists = |id: &str| columns.iter().any(|column| column.id().as_str() == id);
    if exists(status) {
        return Some(ColumnId::from(status));
    }
    config
        .legacy_status_alias(status)
        .filter(|alias| exists(alias.as_str()))
        .cloned()
}
