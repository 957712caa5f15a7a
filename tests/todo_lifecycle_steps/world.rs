//! Shared world state for channel TODO lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use channel_todo::todo::{
    adapters::memory::{InMemoryMessagingSurface, InMemoryTaskStore, RecordingSyncObserver},
    domain::{ChannelId, MessageId},
    services::{Acknowledgment, InteractionDispatcher},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher type used by the BDD world.
pub type TestDispatcher =
    InteractionDispatcher<InMemoryTaskStore, InMemoryMessagingSurface, DefaultClock>;

/// Scenario world for channel TODO behaviour tests.
pub struct TodoWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub surface: Arc<InMemoryMessagingSurface>,
    pub dispatcher: TestDispatcher,
    pub channel_id: Option<ChannelId>,
    pub artifacts: HashMap<String, MessageId>,
    pub last_added: Option<MessageId>,
    pub last_acknowledgment: Option<Acknowledgment>,
}

impl TodoWorld {
    /// Creates a world over empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let surface = Arc::new(InMemoryMessagingSurface::new());
        let dispatcher = InteractionDispatcher::new(
            Arc::clone(&store),
            Arc::clone(&surface),
            Arc::new(DefaultClock),
            Arc::new(RecordingSyncObserver::new()),
        );

        Self {
            store,
            surface,
            dispatcher,
            channel_id: None,
            artifacts: HashMap::new(),
            last_added: None,
            last_acknowledgment: None,
        }
    }

    /// Returns the scenario channel.
    ///
    /// # Errors
    ///
    /// Returns an error if no channel was configured.
    pub fn channel(&self) -> Result<ChannelId, eyre::Report> {
        self.channel_id
            .clone()
            .ok_or_else(|| eyre::eyre!("missing channel in scenario world"))
    }

    /// Returns the last acknowledgment received.
    ///
    /// # Errors
    ///
    /// Returns an error if no interaction has been dispatched.
    pub fn acknowledgment(&self) -> Result<&Acknowledgment, eyre::Report> {
        self.last_acknowledgment
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing acknowledgment in scenario world"))
    }
}

impl Default for TodoWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoWorld {
    TodoWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
