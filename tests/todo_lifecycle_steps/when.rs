//! When steps for channel TODO lifecycle BDD scenarios.

use super::world::{TodoWorld, run_async};
use channel_todo::todo::{
    domain::{TaskContent, TodoCommand},
    services::Acknowledgment,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

/// Dispatches `/todo add` and records the published artifact.
///
/// # Errors
///
/// Returns an error if the content is invalid or no artifact was published.
pub fn add_task(world: &mut TodoWorld, content: String) -> Result<(), eyre::Report> {
    let channel_id = world.channel()?;
    let task = TaskContent::new(content.as_str()).wrap_err("invalid scenario task content")?;
    let acknowledgment = run_async(
        world
            .dispatcher
            .handle_command(&channel_id, TodoCommand::Add { task }),
    );
    let Acknowledgment::Artifact { message_id } = &acknowledgment else {
        return Err(eyre::eyre!("add was acknowledged with {acknowledgment:?}"));
    };
    world.artifacts.insert(content, message_id.clone());
    world.last_added = Some(message_id.clone());
    world.last_acknowledgment = Some(acknowledgment);
    Ok(())
}

#[when(r#"the task "{content}" is added"#)]
fn task_is_added(world: &mut TodoWorld, content: String) -> Result<(), eyre::Report> {
    add_task(world, content)
}

#[when("the completion control of the last added task is activated")]
fn last_completion_control_activated(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let message_id = world
        .last_added
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was added in this scenario"))?;
    let trigger = world
        .surface
        .message(message_id)?
        .and_then(|stored| stored.body.completion_trigger())
        .ok_or_else(|| eyre::eyre!("creation artifact has no completion control"))?;

    let acknowledgment = run_async(world.dispatcher.handle_component(&trigger.to_string()));
    world.last_acknowledgment = Some(acknowledgment);
    Ok(())
}

#[when(r#"the control "{custom_id}" is activated"#)]
fn control_activated(world: &mut TodoWorld, custom_id: String) {
    let acknowledgment = run_async(world.dispatcher.handle_component(&custom_id));
    world.last_acknowledgment = Some(acknowledgment);
}

#[when("the tasks are listed")]
fn tasks_are_listed(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let channel_id = world.channel()?;
    let acknowledgment = run_async(
        world
            .dispatcher
            .handle_command(&channel_id, TodoCommand::List),
    );
    world.last_acknowledgment = Some(acknowledgment);
    Ok(())
}

#[when("the channel is reset")]
fn channel_is_reset(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let channel_id = world.channel()?;
    let acknowledgment = run_async(
        world
            .dispatcher
            .handle_command(&channel_id, TodoCommand::Reset),
    );
    world.last_acknowledgment = Some(acknowledgment);
    Ok(())
}
