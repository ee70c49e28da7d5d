//! Read-only dashboard views over a board.
//!
//! A task is completed when it sits in one of the configured completed
//! columns; every other task is open. Dates are compared against the UTC
//! calendar day of the supplied clock.

use crate::board::{
    domain::{ColumnId, Priority, Task},
    facade::Board,
};
use chrono::NaiveDate;
use mockable::Clock;

/// Number of tasks held by one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCount {
    /// Column identifier.
    pub column_id: ColumnId,
    /// Column title.
    pub title: String,
    /// Number of tasks in the column.
    pub count: usize,
}

/// Aggregate statistics for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// All tasks.
    pub total: usize,
    /// Tasks in a completed column.
    pub completed: usize,
    /// Tasks not yet completed.
    pub open: usize,
    /// Open tasks whose due date has passed.
    pub overdue: usize,
    /// Open tasks due today.
    pub due_today: usize,
    /// Open high-priority tasks.
    pub high_priority: usize,
    /// Open medium-priority tasks.
    pub medium_priority: usize,
    /// Open low-priority tasks.
    pub low_priority: usize,
    /// Completed share of all tasks as a rounded percentage.
    pub completion_rate: usize,
    /// Task counts per column, in column order.
    pub per_column: Vec<ColumnCount>,
    /// Most recently created tasks, newest first.
    pub recent: Vec<Task>,
}

/// Selection of tasks shown in a dashboard drill-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardFilter {
    /// Every task.
    All,
    /// Tasks in a completed column.
    Completed,
    /// Tasks not yet completed.
    Open,
    /// Open tasks whose due date has passed.
    Overdue,
    /// Open tasks due today.
    DueToday,
    /// Open tasks with the given priority.
    Priority(Priority),
    /// Tasks in one column.
    Column(ColumnId),
}

/// Computes dashboard statistics for a board.
#[must_use]
pub fn stats(board: &Board, clock: &impl Clock) -> DashboardStats {
    let today = clock.utc().date_naive();
    let tasks = board.tasks();
    let completed = tasks.iter().filter(|task| is_completed(board, task)).count();
    let open: Vec<&Task> = tasks
        .iter()
        .filter(|task| !is_completed(board, task))
        .collect();
    let count_priority =
        |priority: Priority| open.iter().filter(|task| task.priority() == priority).count();

    let per_column = board
        .columns()
        .iter()
        .map(|column| ColumnCount {
            column_id: column.id().clone(),
            title: column.title().to_owned(),
            count: tasks
                .iter()
                .filter(|task| task.column_id() == column.id())
                .count(),
        })
        .collect();

    let mut recent: Vec<Task> = tasks.to_vec();
    recent.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
    recent.truncate(board.config().recent_task_limit);

    DashboardStats {
        total: tasks.len(),
        completed,
        open: open.len(),
        overdue: open.iter().filter(|task| is_overdue(task, today)).count(),
        due_today: open
            .iter()
            .filter(|task| task.due_date() == Some(today))
            .count(),
        high_priority: count_priority(Priority::High),
        medium_priority: count_priority(Priority::Medium),
        low_priority: count_priority(Priority::Low),
        completion_rate: completion_rate(completed, tasks.len()),
        per_column,
        recent,
    }
}

/// Lists the tasks matching a dashboard filter, in board order.
#[must_use]
pub fn filter<'a>(
    board: &'a Board,
    selection: &DashboardFilter,
    clock: &impl Clock,
) -> Vec<&'a Task> {
    let today = clock.utc().date_naive();
    board
        .columns()
        .iter()
        .flat_map(|column| board.tasks_in_column(column.id()))
        .filter(|task| matches_filter(board, task, selection, today))
        .collect()
}

fn matches_filter(
    board: &Board,
    task: &Task,
    selection: &DashboardFilter,
    today: NaiveDate,
) -> bool {
    let open = !is_completed(board, task);
    match selection {
        DashboardFilter::All => true,
        DashboardFilter::Completed => !open,
        DashboardFilter::Open => open,
        DashboardFilter::Overdue => open && is_overdue(task, today),
        DashboardFilter::DueToday => open && task.due_date() == Some(today),
        DashboardFilter::Priority(priority) => open && task.priority() == *priority,
        DashboardFilter::Column(column_id) => task.column_id() == column_id,
    }
}

fn is_completed(board: &Board, task: &Task) -> bool {
    board.config().is_completed_column(task.column_id())
}

fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date().is_some_and(|due| due < today)
}

/// Rounds `completed / total` to the nearest whole percent.
fn completion_rate(completed: usize, total: usize) -> usize {
    completed
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .unwrap_or(0)
}
