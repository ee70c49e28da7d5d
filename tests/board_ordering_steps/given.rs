//! Given steps for board ordering BDD scenarios.

use super::world::{BoardWorld, config_with_columns, split_list};
use corkboard::board::{
    domain::{LegacyTask, StoredColumn, StoredTask, TaskDraft},
    facade::Board,
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a board with columns "{columns}""#)]
fn board_with_columns(world: &mut BoardWorld, columns: String) {
    world.board = Board::with_defaults(None, config_with_columns(&columns));
}

#[given(r#"tasks "{titles}" in column "{column}""#)]
fn tasks_in_column(
    world: &mut BoardWorld,
    titles: String,
    column: String,
) -> Result<(), eyre::Report> {
    for title in split_list(&titles) {
        let id = world
            .board
            .add_task(TaskDraft::new(title.as_str()).in_column(column.as_str()), &DefaultClock)
            .wrap_err_with(|| format!("add task {title} to {column}"))?;
        world.task_ids.insert(title, id);
    }
    Ok(())
}

#[given(r#"stored columns "{columns}""#)]
fn stored_columns(world: &mut BoardWorld, columns: String) {
    world.stored.columns = split_list(&columns)
        .into_iter()
        .enumerate()
        .map(|(order, id)| StoredColumn {
            id: id.as_str().into(),
            title: id.clone(),
            order: Some(order),
        })
        .collect();
}

#[given(r#"a stored legacy task "{title}" with status "{status}""#)]
fn stored_legacy_task(world: &mut BoardWorld, title: String, status: String) {
    let id = format!("legacy-{}", world.stored.tasks.len());
    world
        .stored
        .tasks
        .push(StoredTask::Legacy(LegacyTask::with_status(
            id.as_str(),
            title,
            status,
        )));
}
