//! Ordering engine.
//!
//! Pure transformations over task and column lists. Every function takes a
//! consistent list and returns a new one; nothing is mutated in place. After
//! any engine call the tasks of each column carry the orders `0..k` and the
//! columns carry `0..m`.
//!
//! Operations that cannot apply return the [`SkipReason`] instead of a new
//! list, and the caller keeps its previous state.

mod invariants;

pub use invariants::{InvariantViolation, check_invariants};

use crate::board::domain::{Column, ColumnId, SkipReason, Task, TaskId};
use mockable::Clock;
use std::collections::HashMap;

/// Result of an engine operation that may be a no-op.
pub type Reordering = Result<Vec<Task>, SkipReason>;

/// Renumbers every column's tasks densely.
///
/// Tasks are grouped by column in order of first appearance and sorted by
/// their current order; ties keep their relative position. Normalising an
/// already normalised list returns it unchanged.
#[must_use]
pub fn normalize(tasks: &[Task]) -> Vec<Task> {
    let mut groups: Vec<Vec<Task>> = Vec::new();
    let mut slots: HashMap<&ColumnId, usize> = HashMap::new();
    for task in tasks {
        let slot = *slots.entry(task.column_id()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len().saturating_sub(1)
        });
        if let Some(group) = groups.get_mut(slot) {
            group.push(task.clone());
        }
    }

    groups
        .into_iter()
        .flat_map(|mut group| {
            group.sort_by_key(Task::order);
            renumber(&mut group);
            group
        })
        .collect()
}

/// Renumbers columns densely by their previous order.
#[must_use]
pub fn normalize_columns(columns: &[Column]) -> Vec<Column> {
    let mut ordered = columns.to_vec();
    ordered.sort_by_key(Column::order);
    for (order, column) in ordered.iter_mut().enumerate() {
        column.set_order(order);
    }
    ordered
}

/// Returns the tasks of one column sorted by order.
#[must_use]
pub fn tasks_in_column<'a>(tasks: &'a [Task], column_id: &ColumnId) -> Vec<&'a Task> {
    let mut column: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.column_id() == column_id)
        .collect();
    column.sort_by_key(|task| task.order());
    column
}

/// Returns the order a task appended to the column would receive.
#[must_use]
pub fn next_order_for_column(tasks: &[Task], column_id: &ColumnId) -> usize {
    tasks
        .iter()
        .filter(|task| task.column_id() == column_id)
        .map(|task| task.order().saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Moves the task at `from_index` of a column to `to_index`.
///
/// `from_index` must address an existing task and `to_index` may be at most
/// the column length (meaning "last"). Equal indices and out-of-range
/// indices are rejected without touching the list, which filters out stale or
/// duplicated drag events. Other columns are left as they are.
///
/// # Errors
///
/// Returns [`SkipReason::SameIndex`] or [`SkipReason::IndexOutOfRange`] when
/// the reorder does not apply.
pub fn reorder_within_column(
    tasks: &[Task],
    column_id: &ColumnId,
    from_index: usize,
    to_index: usize,
    clock: &impl Clock,
) -> Reordering {
    let mut column = ordered_column(tasks, column_id);
    let len = column.len();
    if from_index == to_index {
        return Err(SkipReason::SameIndex { index: from_index });
    }
    if from_index >= len || to_index > len {
        return Err(SkipReason::IndexOutOfRange {
            column_id: column_id.clone(),
            from_index,
            to_index,
            len,
        });
    }

    let mut moved = column.remove(from_index);
    moved.touch(clock);
    let insert_at = to_index.min(column.len());
    column.insert(insert_at, moved);
    renumber(&mut column);

    Ok(merge(tasks, &[column_id], column))
}

/// Moves a task into `target_column_id` at `target_index`.
///
/// The index is clamped to the target column length, so stale client state
/// still lands the task somewhere sensible. The source column is renumbered
/// to close the gap. Moving within the same column degrades to
/// [`reorder_within_column`]. The caller is responsible for checking that
/// the target column exists.
///
/// # Errors
///
/// Returns [`SkipReason::UnknownTask`] when no task has the identifier, or
/// the reorder skip reason for a same-column move that changes nothing.
pub fn move_across_columns(
    tasks: &[Task],
    task_id: &TaskId,
    target_column_id: &ColumnId,
    target_index: usize,
    clock: &impl Clock,
) -> Reordering {
    let task = tasks
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| SkipReason::UnknownTask(task_id.clone()))?;
    let source_column_id = task.column_id().clone();

    if source_column_id == *target_column_id {
        let column = ordered_column(tasks, &source_column_id);
        let from_index = column
            .iter()
            .position(|candidate| candidate.id() == task_id)
            .ok_or_else(|| SkipReason::UnknownTask(task_id.clone()))?;
        let to_index = target_index.min(column.len().saturating_sub(1));
        return reorder_within_column(tasks, &source_column_id, from_index, to_index, clock);
    }

    let mut source = ordered_column(tasks, &source_column_id);
    source.retain(|candidate| candidate.id() != task_id);
    renumber(&mut source);

    let mut target = ordered_column(tasks, target_column_id);
    let mut moved = task.clone();
    moved.relocate(target_column_id.clone(), clock);
    let insert_at = target_index.min(target.len());
    target.insert(insert_at, moved);
    renumber(&mut target);

    source.extend(target);
    Ok(merge(
        tasks,
        &[&source_column_id, target_column_id],
        source,
    ))
}

/// Clones a column's tasks sorted by order, ties by list position.
fn ordered_column(tasks: &[Task], column_id: &ColumnId) -> Vec<Task> {
    tasks_in_column(tasks, column_id)
        .into_iter()
        .cloned()
        .collect()
}

fn renumber(column: &mut [Task]) {
    for (order, task) in column.iter_mut().enumerate() {
        task.set_order(order);
    }
}

/// Replaces the tasks of `affected` columns with `replacement`.
fn merge(tasks: &[Task], affected: &[&ColumnId], replacement: Vec<Task>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| !affected.contains(&task.column_id()))
        .cloned()
        .chain(replacement)
        .collect()
}
