//! Drives the TODO engine from standard input.
//!
//! Usage:
//!
//! ```text
//! todo-console [--config <path>] [--database <file>] [--channel <id>]
//! ```
//!
//! Each input line is either a `/todo` command issued in the configured
//! channel or `!complete <custom_id>` to activate a completion control:
//!
//! ```text
//! /todo add task="buy milk"
//! !complete complete_todo_1
//! /todo list
//! /todo reset
//! ```
//!
//! Artifact changes and acknowledgments are written to standard output as
//! JSON lines; logs go to standard error.

use channel_todo::config::{TodoCliArgs, TodoConfig};
use channel_todo::todo::{
    adapters::{
        TracingSyncObserver,
        console::{ConsoleMessagingSurface, parse_console_line},
        sqlite::SqliteTaskStore,
    },
    domain::{ChannelId, CommandDefinition},
    ports::{MessagingSurface, TaskStore},
    services::InteractionDispatcher,
};
use clap::Parser;
use mockable::{Clock, DefaultClock};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Counters for one console session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SessionStats {
    dispatched: usize,
    rejected: usize,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = TodoCliArgs::parse();
    let config = TodoConfig::load(&cli)?;

    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::try_new(config.log_filter(env_directives))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let definition = CommandDefinition::todo();
    definition.validate_schema()?;
    if cli.print_schema {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &definition)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let channel_id = ChannelId::new(config.channel_id.as_str())?;
    let store = Arc::new(SqliteTaskStore::open(
        &config.database_path,
        config.pool_size,
    )?);
    tracing::info!(
        database = %config.database_path.display(),
        %channel_id,
        "todo console ready"
    );

    let surface = Arc::new(ConsoleMessagingSurface::new(std::io::stdout()));
    let dispatcher = InteractionDispatcher::new(
        store,
        surface,
        Arc::new(DefaultClock),
        Arc::new(TracingSyncObserver),
    );

    let input = BufReader::new(tokio::io::stdin());
    let stats = run_session(
        &dispatcher,
        &definition,
        &channel_id,
        input,
        &mut std::io::stdout(),
    )
    .await?;
    tracing::info!(
        dispatched = stats.dispatched,
        rejected = stats.rejected,
        "input closed"
    );
    Ok(())
}

/// Dispatches every input line in order and writes one acknowledgment per
/// dispatched interaction.
async fn run_session<S, M, C, R, W>(
    dispatcher: &InteractionDispatcher<S, M, C>,
    definition: &CommandDefinition,
    channel_id: &ChannelId,
    input: R,
    output: &mut W,
) -> Result<SessionStats, BoxError>
where
    S: TaskStore,
    M: MessagingSurface,
    C: Clock + Send + Sync,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut stats = SessionStats::default();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_console_line(&line, channel_id, definition) {
            Ok(Some(interaction)) => {
                let acknowledgment = dispatcher.dispatch(interaction).await;
                serde_json::to_writer(&mut *output, &acknowledgment)?;
                writeln!(output)?;
                output.flush()?;
                stats.dispatched += 1;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(input = %line, error = %err, "rejected console input");
                stats.rejected += 1;
            }
        }
    }
    Ok(stats)
}
