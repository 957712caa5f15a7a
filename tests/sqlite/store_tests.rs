//! `SQLite` task store tests.

use channel_todo::todo::{
    adapters::sqlite::SqliteTaskStore,
    domain::TaskId,
    ports::{TaskStore, TaskStoreError},
};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{SqliteFixture, channel, content, message, sqlite};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_are_assigned_in_insert_order(
    sqlite: SqliteFixture,
) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    let first = sqlite
        .store
        .insert_task(&channel_id, &message("m-1")?, &content("buy milk")?)
        .await?;
    let second = sqlite
        .store
        .insert_task(&channel_id, &message("m-2")?, &content("call mum")?)
        .await?;

    ensure!(first.value() >= 1);
    ensure!(second.value() > first.value());

    let stored = sqlite
        .store
        .find_task(first)
        .await?
        .ok_or_else(|| eyre::eyre!("inserted task not found"))?;
    ensure!(stored.content().as_str() == "buy milk");
    ensure!(stored.message_id().as_str() == "m-1");
    ensure!(stored.channel_id() == &channel_id);
    ensure!(!stored.is_completed());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_is_idempotent(sqlite: SqliteFixture) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    let task_id = sqlite
        .store
        .insert_task(&channel_id, &message("m-1")?, &content("buy milk")?)
        .await?;

    let first = sqlite.store.set_completed(task_id).await?;
    let second = sqlite.store.set_completed(task_id).await?;

    ensure!(first == 1, "first completion changed {first} rows");
    ensure!(second == 0, "repeat completion changed {second} rows");
    let stored = sqlite
        .store
        .find_task(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task not found"))?;
    ensure!(stored.is_completed());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_missing_task_is_not_found(sqlite: SqliteFixture) -> Result<(), eyre::Report> {
    let missing = TaskId::new(999)?;

    let result = sqlite.store.set_completed(missing).await;

    ensure!(
        matches!(result, Err(TaskStoreError::NotFound(id)) if id == missing),
        "unexpected result {result:?}"
    );
    ensure!(sqlite.store.find_task(missing).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_list_newest_first_within_their_channel(
    sqlite: SqliteFixture,
) -> Result<(), eyre::Report> {
    let kitchen = channel("kitchen")?;
    let garden = channel("garden")?;
    sqlite
        .store
        .insert_task(&kitchen, &message("m-1")?, &content("buy milk")?)
        .await?;
    sqlite
        .store
        .insert_task(&garden, &message("m-2")?, &content("mow lawn")?)
        .await?;
    sqlite
        .store
        .insert_task(&kitchen, &message("m-3")?, &content("wash up")?)
        .await?;

    let tasks = sqlite.store.list_tasks(&kitchen).await?;
    let contents: Vec<&str> = tasks.iter().map(|task| task.content().as_str()).collect();
    ensure!(contents == ["wash up", "buy milk"], "unexpected order {contents:?}");

    let mut message_ids: Vec<String> = sqlite
        .store
        .list_task_message_ids(&kitchen)
        .await?
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect();
    message_ids.sort();
    ensure!(message_ids == ["m-1", "m-3"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshots_list_oldest_first(sqlite: SqliteFixture) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    sqlite
        .store
        .insert_list_snapshot(&channel_id, &message("list-1")?)
        .await?;
    sqlite
        .store
        .insert_list_snapshot(&channel_id, &message("list-2")?)
        .await?;

    let snapshots = sqlite.store.list_snapshots(&channel_id).await?;
    let ids: Vec<&str> = snapshots
        .iter()
        .map(|snapshot| snapshot.message_id().as_str())
        .collect();
    ensure!(ids == ["list-1", "list-2"], "unexpected order {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purges_are_scoped_to_one_channel(sqlite: SqliteFixture) -> Result<(), eyre::Report> {
    let kitchen = channel("kitchen")?;
    let garden = channel("garden")?;
    sqlite
        .store
        .insert_task(&kitchen, &message("m-1")?, &content("buy milk")?)
        .await?;
    sqlite
        .store
        .insert_task(&garden, &message("m-2")?, &content("mow lawn")?)
        .await?;
    sqlite
        .store
        .insert_list_snapshot(&kitchen, &message("list-1")?)
        .await?;
    sqlite
        .store
        .insert_list_snapshot(&garden, &message("list-2")?)
        .await?;

    ensure!(sqlite.store.delete_all_tasks(&kitchen).await? == 1);
    ensure!(sqlite.store.delete_all_snapshots(&kitchen).await? == 1);
    ensure!(sqlite.store.delete_all_tasks(&kitchen).await? == 0);

    ensure!(sqlite.store.list_tasks(&kitchen).await?.is_empty());
    ensure!(sqlite.store.list_tasks(&garden).await?.len() == 1);
    ensure!(sqlite.store.list_snapshots(&garden).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_survive_reopening_the_database(
    sqlite: SqliteFixture,
) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    let task_id = sqlite
        .store
        .insert_task(&channel_id, &message("m-1")?, &content("buy milk")?)
        .await?;
    sqlite.store.set_completed(task_id).await?;

    let reopened = sqlite.reopen()?;
    let tasks = reopened.list_tasks(&channel_id).await?;

    let task = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("task lost after reopening"))?;
    ensure!(task.id() == task_id);
    ensure!(task.is_completed());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_memory_database_keeps_state_across_calls() -> Result<(), eyre::Report> {
    let store = SqliteTaskStore::open(":memory:", 4)?;
    let channel_id = channel("42")?;

    let task_id = store
        .insert_task(&channel_id, &message("m-1")?, &content("buy milk")?)
        .await?;

    ensure!(store.find_task(task_id).await?.is_some());
    ensure!(store.list_tasks(&channel_id).await?.len() == 1);
    Ok(())
}

#[rstest]
fn zero_pool_size_is_rejected() {
    let result = SqliteTaskStore::open(":memory:", 0);
    assert!(matches!(result, Err(TaskStoreError::Persistence(_))));
}
