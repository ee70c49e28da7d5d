//! When steps for board ordering BDD scenarios.

use super::world::{BoardWorld, run_async};
use corkboard::board::{
    adapters::memory::InMemoryBoardStore,
    config::BoardConfig,
    domain::{AccountKey, ColumnId},
    services::BoardSession,
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when(r#"the task at index {from:usize} of column "{column}" is moved to index {to:usize}"#)]
fn reorder_task(world: &mut BoardWorld, from: usize, column: String, to: usize) {
    let outcome = world.board.reorder_within_column(
        &ColumnId::from(column.as_str()),
        from,
        to,
        &DefaultClock,
    );
    world.last_outcome = Some(outcome);
}

#[when(r#"task "{title}" is moved to column "{column}" at index {index:usize}"#)]
fn move_task(
    world: &mut BoardWorld,
    title: String,
    column: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let outcome = world.board.move_across_columns(
        &task_id,
        &ColumnId::from(column.as_str()),
        index,
        &DefaultClock,
    );
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"column "{column}" is deleted"#)]
fn delete_column(world: &mut BoardWorld, column: String) {
    let outcome = world.board.delete_column(&ColumnId::from(column.as_str()));
    world.last_outcome = Some(outcome);
}

#[when("the stored board is loaded")]
fn load_stored_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let account = AccountKey::new("scenario@example.com")?;
    let store = Arc::new(InMemoryBoardStore::new());
    store
        .insert_stored(account.clone(), world.stored.clone())
        .wrap_err("seed stored board")?;
    let session = run_async(BoardSession::open(
        store,
        Arc::new(DefaultClock),
        BoardConfig::default(),
        Some(account),
    ))
    .wrap_err("open stored board")?;
    world.board = session.into_board();
    Ok(())
}
