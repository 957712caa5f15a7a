//! Given steps for channel TODO lifecycle BDD scenarios.

use super::when::add_task;
use super::world::TodoWorld;
use channel_todo::todo::domain::ChannelId;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a TODO engine for channel "{channel}""#)]
fn engine_for_channel(world: &mut TodoWorld, channel: String) -> Result<(), eyre::Report> {
    let channel_id = ChannelId::new(channel).wrap_err("invalid scenario channel")?;
    world.channel_id = Some(channel_id);
    Ok(())
}

#[given(r#"the task "{content}" has been added"#)]
fn task_has_been_added(world: &mut TodoWorld, content: String) -> Result<(), eyre::Report> {
    add_task(world, content).wrap_err("add task in scenario setup")
}

#[given(r#"the message of task "{content}" was deleted by a member"#)]
fn message_deleted_by_member(world: &mut TodoWorld, content: String) -> Result<(), eyre::Report> {
    let message_id = world
        .artifacts
        .get(&content)
        .ok_or_else(|| eyre::eyre!("no artifact recorded for task {content:?}"))?;
    let removed = world.surface.remove_externally(message_id)?;
    eyre::ensure!(removed, "artifact for {content:?} was already gone");
    Ok(())
}
