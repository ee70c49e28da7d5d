//! Sessions over the consolidated key-value document.

use super::helpers::{FixedClock, account, clock, column_titles, open_session};
use corkboard::board::{
    adapters::{keyvalue::KeyValueBoardStore, memory::InMemoryKeyValueStore},
    config::StorageKeys,
    domain::{ColumnId, TaskDraft, TaskId},
    ports::KeyValueStore,
};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn legacy_backend() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::with_entries([
        (
            "kanban-tasks::Ada@Example.com".to_owned(),
            json!([
                { "id": "t1", "title": "Write notes", "status": "done", "priority": "high" },
                { "id": "t2", "title": "Draft outline", "status": "todo", "order": 1 },
                { "id": "t3", "title": "Pick topic", "status": "todo", "order": 0 },
                { "id": "t4", "title": "Mystery", "status": "blocked" }
            ]),
        ),
        (
            "kanban-columns::Ada@Example.com".to_owned(),
            json!([
                { "id": "todo", "title": "To Do", "order": 0 },
                { "id": "in-progress", "title": "In Progress", "order": 1 },
                { "id": "done", "title": "Done", "order": 2 }
            ]),
        ),
    ]))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_storage_opens_as_a_consistent_board(
    clock: FixedClock,
) -> Result<(), eyre::Report> {
    let backend = legacy_backend();
    let store =
        Arc::new(KeyValueBoardStore::open(Arc::clone(&backend), StorageKeys::default()).await?);

    let session = open_session(&store, clock, Some(account("ada@example.com")?)).await?;

    let board = session.board();
    eyre::ensure!(
        column_titles(board, "todo")
            == vec![
                "Pick topic".to_owned(),
                "Mystery".to_owned(),
                "Draft outline".to_owned()
            ],
        "unexpected todo order {:?}",
        column_titles(board, "todo")
    );
    eyre::ensure!(
        column_titles(board, "done") == vec!["Write notes".to_owned()],
        "legacy done task not placed in done column"
    );
    eyre::ensure!(
        session.migration_report().legacy_tasks == 4,
        "expected four legacy tasks"
    );
    eyre::ensure!(
        backend.keys().await? == vec!["kanban-db".to_owned()],
        "legacy keys should be removed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_save_rewrites_legacy_tasks_in_current_shape(
    clock: FixedClock,
) -> Result<(), eyre::Report> {
    let backend = legacy_backend();
    let store =
        Arc::new(KeyValueBoardStore::open(Arc::clone(&backend), StorageKeys::default()).await?);
    let mut session = open_session(&store, clock, Some(account("ada@example.com")?)).await?;

    session.add_task(TaskDraft::new("New work")).await?;

    let document = backend
        .get("kanban-db")
        .await?
        .ok_or_else(|| eyre::eyre!("document missing"))?;
    let tasks = document
        .pointer("/users/ada@example.com/tasks")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| eyre::eyre!("tasks missing from document"))?;
    eyre::ensure!(tasks.len() == 5, "expected five stored tasks");
    eyre::ensure!(
        tasks
            .iter()
            .all(|task| task.get("columnId").is_some() && task.get("status").is_none()),
        "stored tasks should use the current shape"
    );

    let reopened = open_session(&store, clock, Some(account("ada@example.com")?)).await?;
    eyre::ensure!(
        reopened.migration_report().is_clean(),
        "second load should need no repairs"
    );
    let done = reopened
        .board()
        .task(&TaskId::from("t1"))
        .ok_or_else(|| eyre::eyre!("task t1 missing"))?;
    eyre::ensure!(
        done.column_id() == &ColumnId::from("done"),
        "task t1 should stay in done"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accounts_share_one_document(clock: FixedClock) -> Result<(), eyre::Report> {
    let backend = Arc::new(InMemoryKeyValueStore::new());
    let store =
        Arc::new(KeyValueBoardStore::open(Arc::clone(&backend), StorageKeys::default()).await?);

    let mut ada = open_session(&store, clock, Some(account("ada@example.com")?)).await?;
    let mut grace = open_session(&store, clock, Some(account("grace@example.com")?)).await?;
    ada.add_task(TaskDraft::new("Ada's task")).await?;
    grace.add_task(TaskDraft::new("Grace's task")).await?;

    let document = backend
        .get("kanban-db")
        .await?
        .ok_or_else(|| eyre::eyre!("document missing"))?;
    eyre::ensure!(
        document.get("version") == Some(&json!(1)),
        "document version missing"
    );
    for user in ["ada@example.com", "grace@example.com"] {
        let tasks = document
            .pointer(&format!("/users/{user}/tasks"))
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| eyre::eyre!("tasks missing for {user}"))?;
        eyre::ensure!(tasks.len() == 1, "expected one task for {user}");
    }
    Ok(())
}
