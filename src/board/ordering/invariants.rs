//! Structural checks for board snapshots.

use crate::board::domain::{BoardSnapshot, ColumnId, TaskId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A broken board invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Task orders within a column are not exactly `0..k`.
    #[error("task orders in column {column_id} are not dense: {orders:?}")]
    SparseTaskOrder {
        /// Affected column.
        column_id: ColumnId,
        /// Orders found, sorted.
        orders: Vec<usize>,
    },

    /// Column orders are not exactly `0..m`.
    #[error("column orders are not dense: {orders:?}")]
    SparseColumnOrder {
        /// Orders found, sorted.
        orders: Vec<usize>,
    },

    /// A task references a column that does not exist.
    #[error("task {task_id} references missing column {column_id}")]
    OrphanedTask {
        /// Affected task.
        task_id: TaskId,
        /// Referenced column.
        column_id: ColumnId,
    },

    /// Two tasks share an identifier.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Two columns share an identifier.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task was modified before it was created.
    #[error("task {0} has updated_at earlier than created_at")]
    TimestampRegression(TaskId),
}

/// Verifies every board invariant, reporting the first violation found.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] encountered.
pub fn check_invariants(snapshot: &BoardSnapshot) -> Result<(), InvariantViolation> {
    let mut column_ids = HashSet::new();
    for column in snapshot.columns() {
        if !column_ids.insert(column.id()) {
            return Err(InvariantViolation::DuplicateColumn(column.id().clone()));
        }
    }
    let column_orders: Vec<usize> = snapshot.columns().iter().map(|c| c.order()).collect();
    if !is_dense(column_orders.clone()) {
        return Err(InvariantViolation::SparseColumnOrder {
            orders: sorted(column_orders),
        });
    }

    let mut task_ids = HashSet::new();
    let mut orders_by_column: HashMap<&ColumnId, Vec<usize>> = HashMap::new();
    for task in snapshot.tasks() {
        if !task_ids.insert(task.id()) {
            return Err(InvariantViolation::DuplicateTask(task.id().clone()));
        }
        if !column_ids.contains(task.column_id()) {
            return Err(InvariantViolation::OrphanedTask {
                task_id: task.id().clone(),
                column_id: task.column_id().clone(),
            });
        }
        if task.updated_at() < task.created_at() {
            return Err(InvariantViolation::TimestampRegression(task.id().clone()));
        }
        orders_by_column
            .entry(task.column_id())
            .or_default()
            .push(task.order());
    }

    for (column_id, orders) in orders_by_column {
        if !is_dense(orders.clone()) {
            return Err(InvariantViolation::SparseTaskOrder {
                column_id: column_id.clone(),
                orders: sorted(orders),
            });
        }
    }
    Ok(())
}

fn is_dense(orders: Vec<usize>) -> bool {
    sorted(orders)
        .into_iter()
        .enumerate()
        .all(|(index, order)| index == order)
}

fn sorted(mut orders: Vec<usize>) -> Vec<usize> {
    orders.sort_unstable();
    orders
}
