//! Artifact body rendering.

use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

use super::RenderError;
use crate::todo::domain::{ArtifactBody, CompletionControl, CompletionTrigger, Task, TaskContent};

/// Accent colour of creation artifacts.
pub const CREATION_COLOUR: u32 = 0x0099_ff;
/// Accent colour of list artifacts.
pub const LIST_COLOUR: u32 = 0x00ae_86;
/// Accent colour of completed task artifacts.
pub const COMPLETED_COLOUR: u32 = 0x90ee_90;
/// Accent colour of reset summaries.
pub const RESET_COLOUR: u32 = 0xff6b_6b;

const CREATION_TITLE: &str = "📝 New TODO";
const COMPLETION_LABEL: &str = "✅ Mark as done";
const LIST_TITLE: &str = "📋 TODO list";
const COMPLETED_TITLE: &str = "✅ TODO - Done";
const RESET_TITLE: &str = "🗑️ TODO reset";

const LIST_TEMPLATE_NAME: &str = "list";
const LIST_TEMPLATE: &str = "{% for task in tasks %}\
{% if task.completed %}✅ ~~{{ task.content }}~~{% else %}❌ {{ task.content }}{% endif %}
{% endfor %}";

const COMPLETED_TEMPLATE_NAME: &str = "completed";
const COMPLETED_TEMPLATE: &str = "~~{{ content }}~~";

#[derive(Debug, Serialize)]
struct ListRow<'a> {
    content: &'a str,
    completed: bool,
}

/// Counts reported by a channel reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    /// Task records removed from the store.
    pub records_removed: u64,
    /// Artifacts deleted from the channel.
    pub messages_removed: u64,
    /// Artifacts that had already been removed by someone else.
    pub already_gone: u64,
    /// Artifacts whose deletion failed.
    pub failed: u64,
}

/// Renders artifact bodies stamped by an injected clock.
pub struct ArtifactRenderer<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
}

impl<C> Clone for ArtifactRenderer<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> ArtifactRenderer<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a renderer.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Returns the current render time.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Creation artifact carrying a completion control.
    ///
    /// The timestamp is passed in so the bind patch keeps the original
    /// publish time.
    #[must_use]
    pub fn creation(
        &self,
        content: &TaskContent,
        trigger: CompletionTrigger,
        timestamp: DateTime<Utc>,
    ) -> ArtifactBody {
        ArtifactBody::new(CREATION_TITLE, content.as_str(), CREATION_COLOUR, timestamp).with_control(
            CompletionControl {
                trigger,
                label: COMPLETION_LABEL.to_owned(),
            },
        )
    }

    /// List artifact, one row per task in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the list template fails to render.
    pub fn list(&self, tasks: &[Task]) -> Result<ArtifactBody, RenderError> {
        let rows: Vec<ListRow<'_>> = tasks
            .iter()
            .map(|task| ListRow {
                content: task.content().as_str(),
                completed: task.is_completed(),
            })
            .collect();
        let description = render(LIST_TEMPLATE_NAME, LIST_TEMPLATE, context! { tasks => rows })?;
        Ok(ArtifactBody::new(
            LIST_TITLE,
            description.trim_end(),
            LIST_COLOUR,
            self.now(),
        ))
    }

    /// Terminal view of a completed task, without controls.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the completion template fails to render.
    pub fn completed(&self, task: &Task) -> Result<ArtifactBody, RenderError> {
        let description = render(
            COMPLETED_TEMPLATE_NAME,
            COMPLETED_TEMPLATE,
            context! { content => task.content().as_str() },
        )?;
        Ok(ArtifactBody::new(
            COMPLETED_TITLE,
            description,
            COMPLETED_COLOUR,
            self.now(),
        ))
    }

    /// Reset acknowledgment.
    #[must_use]
    pub fn reset_summary(&self, summary: &ResetSummary) -> ArtifactBody {
        ArtifactBody::new(
            RESET_TITLE,
            reset_message(summary),
            RESET_COLOUR,
            self.now(),
        )
    }
}

/// Human-readable reset result.
#[must_use]
pub fn reset_message(summary: &ResetSummary) -> String {
    format!(
        "Removed {} tasks from the database and {} messages from the channel.",
        summary.records_removed, summary.messages_removed
    )
}

fn render(
    template: &'static str,
    source: &str,
    ctx: minijinja::Value,
) -> Result<String, RenderError> {
    let environment = Environment::new();
    environment
        .render_str(source, ctx)
        .map_err(|error| RenderError {
            template,
            reason: error.to_string(),
        })
}
