//! Then steps for channel TODO lifecycle BDD scenarios.

use super::world::{TodoWorld, run_async};
use channel_todo::todo::{ports::TaskStore, services::Acknowledgment};
use rstest_bdd_macros::then;

#[then(r#"the list shows "{expected}""#)]
fn list_shows(world: &TodoWorld, expected: String) -> Result<(), eyre::Report> {
    let Acknowledgment::Artifact { message_id } = world.acknowledgment()? else {
        return Err(eyre::eyre!("expected a published list"));
    };
    let list = world
        .surface
        .message(message_id)?
        .ok_or_else(|| eyre::eyre!("list artifact missing"))?;

    if list.body.description != expected {
        return Err(eyre::eyre!(
            "expected list {expected:?}, found {:?}",
            list.body.description
        ));
    }
    Ok(())
}

#[then("the interaction is ignored")]
fn interaction_is_ignored(world: &TodoWorld) -> Result<(), eyre::Report> {
    let acknowledgment = world.acknowledgment()?;
    if *acknowledgment != Acknowledgment::Silent {
        return Err(eyre::eyre!("expected silence, got {acknowledgment:?}"));
    }
    Ok(())
}

#[then(r#"the task "{content}" is still pending"#)]
fn task_still_pending(world: &TodoWorld, content: String) -> Result<(), eyre::Report> {
    let channel_id = world.channel()?;
    let tasks = run_async(world.store.list_tasks(&channel_id))?;
    let task = tasks
        .iter()
        .find(|task| task.content().as_str() == content)
        .ok_or_else(|| eyre::eyre!("task {content:?} not stored"))?;
    if task.is_completed() {
        return Err(eyre::eyre!("task {content:?} was completed"));
    }

    let message_id = world
        .artifacts
        .get(&content)
        .ok_or_else(|| eyre::eyre!("no artifact recorded for task {content:?}"))?;
    let stored = world
        .surface
        .message(message_id)?
        .ok_or_else(|| eyre::eyre!("artifact for {content:?} missing"))?;
    if stored.body.controls.is_empty() {
        return Err(eyre::eyre!("artifact for {content:?} lost its control"));
    }
    Ok(())
}

#[then(r#"the reply is the private notice "{expected}""#)]
fn reply_is_private_notice(world: &TodoWorld, expected: String) -> Result<(), eyre::Report> {
    match world.acknowledgment()? {
        Acknowledgment::Notice {
            content,
            ephemeral: true,
        } if *content == expected => Ok(()),
        other => Err(eyre::eyre!("expected private notice, got {other:?}")),
    }
}

#[then(r#"the reset summary reads "{expected}""#)]
fn reset_summary_reads(world: &TodoWorld, expected: String) -> Result<(), eyre::Report> {
    let Acknowledgment::Embed { body } = world.acknowledgment()? else {
        return Err(eyre::eyre!("expected a reset summary embed"));
    };
    if body.description != expected {
        return Err(eyre::eyre!(
            "expected summary {expected:?}, found {:?}",
            body.description
        ));
    }
    Ok(())
}

#[then("the channel shows no messages")]
fn channel_shows_no_messages(world: &TodoWorld) -> Result<(), eyre::Report> {
    let channel_id = world.channel()?;
    let remaining = world.surface.channel_messages(&channel_id)?;
    if !remaining.is_empty() {
        return Err(eyre::eyre!("{} messages remain", remaining.len()));
    }
    Ok(())
}
