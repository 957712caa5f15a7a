//! In-memory integration tests for channel scoping.

use channel_todo::todo::{ports::TaskStore, services::Acknowledgment};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{TodoHarness, add_task, channel, description_of, harness, list_tasks};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_only_shows_the_invoking_channel(harness: TodoHarness) -> Result<(), eyre::Report> {
    let kitchen = channel("kitchen")?;
    let garden = channel("garden")?;
    add_task(&harness, &kitchen, "buy milk").await?;
    add_task(&harness, &garden, "mow lawn").await?;

    let Acknowledgment::Artifact { message_id } = list_tasks(&harness, &garden).await else {
        return Err(eyre::eyre!("garden list was not published"));
    };

    ensure!(description_of(&harness, &message_id)? == "❌ mow lawn");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_leaves_other_channels_untouched(harness: TodoHarness) -> Result<(), eyre::Report> {
    let kitchen = channel("kitchen")?;
    let garden = channel("garden")?;
    let kept = add_task(&harness, &kitchen, "buy milk").await?;
    add_task(&harness, &garden, "mow lawn").await?;
    ensure!(matches!(
        list_tasks(&harness, &kitchen).await,
        Acknowledgment::Artifact { .. }
    ));

    let summary = harness.dispatcher.lifecycle().reset(&garden).await?;

    ensure!(summary.records_removed == 1);
    ensure!(harness.surface.message(&kept)?.is_some());
    ensure!(harness.store.list_tasks(&kitchen).await?.len() == 1);
    ensure!(harness.store.list_snapshots(&kitchen).await?.len() == 1);
    ensure!(harness.surface.channel_messages(&kitchen)?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_is_resolved_by_task_identifier_alone(
    harness: TodoHarness,
) -> Result<(), eyre::Report> {
    let kitchen = channel("kitchen")?;
    let message_id = add_task(&harness, &kitchen, "buy milk").await?;
    let trigger = harness
        .surface
        .message(&message_id)?
        .and_then(|stored| stored.body.completion_trigger())
        .ok_or_else(|| eyre::eyre!("creation artifact has no control"))?;

    let acknowledgment = harness
        .dispatcher
        .handle_component(&trigger.to_string())
        .await;

    ensure!(acknowledgment == Acknowledgment::Updated { message_id });
    Ok(())
}
