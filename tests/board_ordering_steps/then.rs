//! Then steps for board ordering BDD scenarios.

use super::world::{BoardWorld, split_list};
use corkboard::board::{domain::ColumnId, ordering};
use rstest_bdd_macros::then;

#[then(r#"column "{column}" holds "{titles}""#)]
fn column_holds(world: &BoardWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let tasks = world.board.tasks_in_column(&ColumnId::from(column.as_str()));
    let actual: Vec<String> = tasks.iter().map(|task| task.title().to_owned()).collect();
    let expected = split_list(&titles);
    eyre::ensure!(
        actual == expected,
        "column {column} holds {actual:?}, expected {expected:?}"
    );
    let orders: Vec<usize> = tasks.iter().map(|task| task.order()).collect();
    let dense: Vec<usize> = (0..tasks.len()).collect();
    eyre::ensure!(orders == dense, "column {column} orders are {orders:?}");
    ordering::check_invariants(world.board.snapshot())?;
    Ok(())
}

#[then("the change is skipped")]
fn change_is_skipped(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no mutation recorded"))?;
    eyre::ensure!(!outcome.is_applied(), "expected a skipped change, got {outcome:?}");
    Ok(())
}

#[then(r#"column "{column}" no longer exists"#)]
fn column_no_longer_exists(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let id = ColumnId::from(column.as_str());
    eyre::ensure!(world.board.column(&id).is_none(), "column {column} still exists");
    eyre::ensure!(
        world.board.tasks().iter().all(|task| task.column_id() != &id),
        "tasks still reference column {column}"
    );
    Ok(())
}

#[then(r#"column "{column}" has order {order:usize}"#)]
fn column_has_order(world: &BoardWorld, column: String, order: usize) -> Result<(), eyre::Report> {
    let found = world
        .board
        .column(&ColumnId::from(column.as_str()))
        .ok_or_else(|| eyre::eyre!("column {column} missing"))?;
    eyre::ensure!(
        found.order() == order,
        "column {column} has order {}, expected {order}",
        found.order()
    );
    Ok(())
}

#[then("the board has {count:usize} tasks")]
fn board_has_tasks(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.board.tasks().len();
    eyre::ensure!(actual == count, "board has {actual} tasks, expected {count}");
    Ok(())
}
