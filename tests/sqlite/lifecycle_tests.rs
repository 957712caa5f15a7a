//! Dispatcher flows backed by a `SQLite` database file.

use std::sync::Arc;

use channel_todo::todo::{
    adapters::{
        memory::{InMemoryMessagingSurface, RecordingSyncObserver},
        sqlite::SqliteTaskStore,
    },
    domain::TodoCommand,
    ports::TaskStore,
    services::{Acknowledgment, InteractionDispatcher},
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{SqliteFixture, channel, content, sqlite, surface};

type SqliteDispatcher =
    InteractionDispatcher<SqliteTaskStore, InMemoryMessagingSurface, DefaultClock>;

fn build_dispatcher(
    store: &Arc<SqliteTaskStore>,
    surface: &Arc<InMemoryMessagingSurface>,
) -> SqliteDispatcher {
    InteractionDispatcher::new(
        Arc::clone(store),
        Arc::clone(surface),
        Arc::new(DefaultClock),
        Arc::new(RecordingSyncObserver::new()),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_complete_list_and_reset(
    sqlite: SqliteFixture,
    surface: Arc<InMemoryMessagingSurface>,
) -> Result<(), eyre::Report> {
    let dispatcher = build_dispatcher(&sqlite.store, &surface);
    let channel_id = channel("42")?;

    let Acknowledgment::Artifact { message_id } = dispatcher
        .handle_command(
            &channel_id,
            TodoCommand::Add {
                task: content("buy milk")?,
            },
        )
        .await
    else {
        return Err(eyre::eyre!("add was not acknowledged with an artifact"));
    };

    let trigger = surface
        .message(&message_id)?
        .and_then(|stored| stored.body.completion_trigger())
        .ok_or_else(|| eyre::eyre!("creation artifact has no control"))?;
    ensure!(trigger.is_bound(), "trigger left provisional");

    let completed = dispatcher.handle_component(&trigger.to_string()).await;
    ensure!(
        completed
            == Acknowledgment::Updated {
                message_id: message_id.clone()
            }
    );

    let Acknowledgment::Artifact {
        message_id: list_id,
    } = dispatcher
        .handle_command(&channel_id, TodoCommand::List)
        .await
    else {
        return Err(eyre::eyre!("list was not published"));
    };
    let list = surface
        .message(&list_id)?
        .ok_or_else(|| eyre::eyre!("list artifact missing"))?;
    ensure!(list.body.description == "✅ ~~buy milk~~");

    let reset = dispatcher
        .handle_command(&channel_id, TodoCommand::Reset)
        .await;
    ensure!(matches!(reset, Acknowledgment::Embed { .. }), "got {reset:?}");
    ensure!(surface.channel_messages(&channel_id)?.is_empty());
    ensure!(sqlite.store.list_tasks(&channel_id).await?.is_empty());
    ensure!(sqlite.store.list_snapshots(&channel_id).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_outlive_the_dispatcher(
    sqlite: SqliteFixture,
    surface: Arc<InMemoryMessagingSurface>,
) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    {
        let first = build_dispatcher(&sqlite.store, &surface);
        let acknowledgment = first
            .handle_command(
                &channel_id,
                TodoCommand::Add {
                    task: content("buy milk")?,
                },
            )
            .await;
        ensure!(matches!(acknowledgment, Acknowledgment::Artifact { .. }));
    }

    let reopened = Arc::new(sqlite.reopen()?);
    let second = build_dispatcher(&reopened, &surface);
    let summary = second.lifecycle().reset(&channel_id).await?;

    ensure!(summary.records_removed == 1);
    ensure!(summary.messages_removed == 1);
    Ok(())
}
