//! Services coordinating task records with their chat artifacts.

mod binder;
mod completion;
mod dispatch;
mod error;
mod lifecycle;
mod render;

pub use binder::{ArtifactRemoval, MessageBinder};
pub use completion::{CompletionOutcome, CompletionRouter, IgnoreReason};
pub use dispatch::{
    ADD_FAILED_NOTICE, Acknowledgment, EMPTY_LIST_NOTICE, Interaction, InteractionDispatcher,
    LIST_FAILED_NOTICE, RESET_FAILED_NOTICE,
};
pub use error::{RenderError, TodoLifecycleError, TodoLifecycleResult};
pub use lifecycle::{AddOutcome, LifecycleOrchestrator, ListOutcome};
pub use render::{
    ArtifactRenderer, COMPLETED_COLOUR, CREATION_COLOUR, LIST_COLOUR, RESET_COLOUR, ResetSummary,
    reset_message,
};
