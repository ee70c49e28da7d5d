//! Session flows against the in-memory board store.

use super::helpers::{FixedClock, account, clock, column_titles, open_session};
use corkboard::board::{
    adapters::memory::InMemoryBoardStore,
    dashboard::DashboardFilter,
    domain::{ColumnId, Outcome, Priority, SkipReason, TaskDraft, TaskPatch},
    ports::BoardStore,
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_are_isolated_per_account(clock: FixedClock) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryBoardStore::new());
    let mut ada = open_session(&store, clock, Some(account("ada@example.com")?)).await?;
    let mut grace = open_session(&store, clock, Some(account("grace@example.com")?)).await?;

    ada.add_task(TaskDraft::new("Analytical engine")).await?;
    grace.add_task(TaskDraft::new("Compiler")).await?;
    grace.add_task(TaskDraft::new("Debugging")).await?;

    let ada_again = open_session(&store, clock, Some(account("ADA@example.com")?)).await?;
    eyre::ensure!(
        column_titles(ada_again.board(), "todo") == vec!["Analytical engine".to_owned()],
        "ada's board should only hold her task"
    );
    eyre::ensure!(
        store.account_count()? == 2,
        "expected two stored boards"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_board_workflow_survives_reload(clock: FixedClock) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryBoardStore::new());
    let key = account("ada@example.com")?;
    let mut session = open_session(&store, clock, Some(key.clone())).await?;

    let a = session.add_task(TaskDraft::new("A")).await?;
    session.add_task(TaskDraft::new("B")).await?;
    session.add_task(TaskDraft::new("C")).await?;
    let outcomes = [
        session
            .reorder_within_column(&ColumnId::from("todo"), 0, 2)
            .await?,
        session
            .move_across_columns(&a, &ColumnId::from("in-progress"), 0)
            .await?,
        session
            .update_task(&a, TaskPatch::new().priority(Priority::High))
            .await?,
    ];
    eyre::ensure!(
        outcomes.iter().all(Outcome::is_applied),
        "every mutation should apply: {outcomes:?}"
    );
    let review = session.add_column("Review").await?;
    let renamed = session.rename_column(&review, "Peer Review").await?;
    eyre::ensure!(renamed.is_applied(), "rename should apply");

    let reloaded = open_session(&store, clock, Some(key)).await?;
    let board = reloaded.board();
    eyre::ensure!(
        column_titles(board, "todo") == vec!["B".to_owned(), "C".to_owned()],
        "todo column order lost"
    );
    eyre::ensure!(
        column_titles(board, "in-progress") == vec!["A".to_owned()],
        "moved task missing"
    );
    let moved = board
        .task(&a)
        .ok_or_else(|| eyre::eyre!("moved task not found"))?;
    eyre::ensure!(moved.priority() == Priority::High, "priority not saved");
    let renamed = board
        .column(&review)
        .ok_or_else(|| eyre::eyre!("added column not found"))?;
    eyre::ensure!(renamed.title() == "Peer Review", "rename not saved");
    eyre::ensure!(renamed.order() == 3, "added column should be last");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guest_boards_are_never_stored(clock: FixedClock) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryBoardStore::new());
    let mut guest = open_session(&store, clock, None).await?;

    guest.add_task(TaskDraft::new("Scratch")).await?;
    guest.reset().await?;

    eyre::ensure!(guest.is_guest(), "session should be a guest session");
    eyre::ensure!(store.account_count()? == 0, "guest board was stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_drag_events_are_reported_and_ignored(
    clock: FixedClock,
) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryBoardStore::new());
    let key = account("ada@example.com")?;
    let mut session = open_session(&store, clock, Some(key.clone())).await?;
    session.add_task(TaskDraft::new("Only")).await?;

    let outcome = session
        .reorder_within_column(&ColumnId::from("todo"), 3, 0)
        .await?;

    eyre::ensure!(
        matches!(
            outcome.skip_reason(),
            Some(SkipReason::IndexOutOfRange { len: 1, .. })
        ),
        "unexpected outcome {outcome:?}"
    );
    let stored = store
        .load(&key)
        .await?
        .ok_or_else(|| eyre::eyre!("board should be stored"))?;
    eyre::ensure!(stored.tasks.len() == 1, "stored board changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_reflects_session_state(clock: FixedClock) -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryBoardStore::new());
    let mut session = open_session(&store, clock, Some(account("ada@example.com")?)).await?;
    session
        .add_task(TaskDraft::new("Ship").with_priority(Priority::High))
        .await?;
    let done = session.add_task(TaskDraft::new("Plan")).await?;
    let moved = session
        .move_across_columns(&done, &ColumnId::from("done"), 0)
        .await?;
    eyre::ensure!(moved.is_applied(), "move should apply");

    let stats = session.dashboard();
    eyre::ensure!(stats.total == 2, "expected two tasks");
    eyre::ensure!(stats.completion_rate == 50, "expected half completed");
    eyre::ensure!(stats.high_priority == 1, "expected one open high task");
    let open: Vec<&str> = session
        .filter(&DashboardFilter::Open)
        .into_iter()
        .map(|task| task.title())
        .collect();
    eyre::ensure!(open == vec!["Ship"], "unexpected open tasks {open:?}");
    Ok(())
}
