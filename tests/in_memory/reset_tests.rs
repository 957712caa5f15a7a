//! In-memory integration tests for channel reset.

use channel_todo::todo::{
    domain::TodoCommand,
    ports::{SyncIncident, TaskStore},
    services::{Acknowledgment, RESET_COLOUR, RESET_FAILED_NOTICE, ResetSummary, reset_message},
};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{TodoHarness, add_task, channel, harness, list_tasks};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_tolerates_artifacts_removed_by_others(
    harness: TodoHarness,
) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    let removed = add_task(&harness, &channel_id, "buy milk").await?;
    add_task(&harness, &channel_id, "call mum").await?;
    ensure!(matches!(
        list_tasks(&harness, &channel_id).await,
        Acknowledgment::Artifact { .. }
    ));
    ensure!(harness.surface.remove_externally(&removed)?);

    let summary = harness.dispatcher.lifecycle().reset(&channel_id).await?;

    ensure!(
        summary
            == ResetSummary {
                records_removed: 2,
                messages_removed: 2,
                already_gone: 1,
                failed: 0,
            },
        "unexpected summary {summary:?}"
    );
    ensure!(harness.surface.channel_messages(&channel_id)?.is_empty());
    ensure!(harness.store.list_tasks(&channel_id).await?.is_empty());
    ensure!(harness.store.list_snapshots(&channel_id).await?.is_empty());
    ensure!(
        harness.observer.incidents().iter().any(|incident| matches!(
            incident,
            SyncIncident::ArtifactAlreadyGone { message_id, .. } if *message_id == removed
        )),
        "missing already-gone incident"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_deletions_do_not_stop_the_record_purge(
    harness: TodoHarness,
) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    add_task(&harness, &channel_id, "buy milk").await?;
    let stuck = add_task(&harness, &channel_id, "call mum").await?;
    harness.surface.fail_delete_of(stuck.clone())?;

    let summary = harness.dispatcher.lifecycle().reset(&channel_id).await?;

    ensure!(summary.records_removed == 2);
    ensure!(summary.messages_removed == 1);
    ensure!(summary.failed == 1);
    ensure!(harness.surface.message(&stuck)?.is_some());
    ensure!(harness.store.list_tasks(&channel_id).await?.is_empty());
    ensure!(matches!(
        harness.observer.incidents().as_slice(),
        [SyncIncident::ArtifactDeleteFailed { .. }]
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_replies_with_a_summary_embed(harness: TodoHarness) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    add_task(&harness, &channel_id, "buy milk").await?;

    let acknowledgment = harness
        .dispatcher
        .handle_command(&channel_id, TodoCommand::Reset)
        .await;

    let Acknowledgment::Embed { body } = acknowledgment else {
        return Err(eyre::eyre!("expected embed, got {acknowledgment:?}"));
    };
    ensure!(body.colour == RESET_COLOUR);
    ensure!(
        body.description
            == reset_message(&ResetSummary {
                records_removed: 1,
                messages_removed: 1,
                ..ResetSummary::default()
            })
    );
    ensure!(body.controls.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resetting_an_empty_channel_reports_zero(harness: TodoHarness) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;

    let summary = harness.dispatcher.lifecycle().reset(&channel_id).await?;

    ensure!(summary == ResetSummary::default());
    ensure!(
        reset_message(&summary)
            == "Removed 0 tasks from the database and 0 messages from the channel."
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_store_fails_the_reset(harness: TodoHarness) -> Result<(), eyre::Report> {
    let channel_id = channel("42")?;
    let message_id = add_task(&harness, &channel_id, "buy milk").await?;
    harness.store.set_unavailable(true)?;

    let acknowledgment = harness
        .dispatcher
        .handle_command(&channel_id, TodoCommand::Reset)
        .await;

    ensure!(
        acknowledgment
            == Acknowledgment::Notice {
                content: RESET_FAILED_NOTICE.to_owned(),
                ephemeral: true,
            }
    );
    ensure!(harness.surface.message(&message_id)?.is_some());
    harness.store.set_unavailable(false)?;
    ensure!(harness.store.list_tasks(&channel_id).await?.len() == 1);
    Ok(())
}
