//! # printhouse-console
//!
//! Command-line front end for print house accounting.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Console Startup                                 │
//! │                                                                         │
//! │  1. Parse Arguments ──────────────────────────────────────────────────► │
//! │     • clap derive, `--help` for every subcommand                        │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • PRINTHOUSE_DB_PATH / PRINTHOUSE_LOG / PRINTHOUSE_CURRENCY_SYMBOL  │
//! │     • `--db` overrides the database path                                │
//! │                                                                         │
//! │  3. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │                                                                         │
//! │  4. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  5. Dispatch the Command ─────────────────────────────────────────────► │
//! │     • output to stdout, errors to stderr, non-zero exit on failure      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::AppError;
use state::{ConsoleConfig, DbState, Registry};

/// Runs one parsed command line and returns what to print.
pub async fn run(cli: Cli, config: &ConsoleConfig) -> Result<String, AppError> {
    info!(db_path = %config.database_path.display(), "Starting printhouse");

    let db = DbState::open(&config.database_path).await?;
    let result = commands::dispatch(Registry::new(db.inner()), config, cli.command).await;
    db.close().await;

    debug!(ok = result.is_ok(), "Command finished");
    result
}

/// Loads configuration, applying the `--db` flag on top of the environment.
pub fn load_config(cli: &Cli) -> Result<ConsoleConfig, AppError> {
    match &cli.db {
        // The flag wins, so no data directory lookup is needed
        Some(path) => Ok(ConsoleConfig::from_lookup(|key| match key {
            "PRINTHOUSE_DB_PATH" => Some(path.display().to_string()),
            _ => std::env::var(key).ok(),
        })?
        .with_database_path(path.clone())),
        None => Ok(ConsoleConfig::load()?),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `PRINTHOUSE_LOG=debug` - Show debug messages
/// - `PRINTHOUSE_LOG=printhouse_db=trace` - Trace the database layer only
/// - Default: warnings, plus info from the console
pub fn init_tracing(config: &ConsoleConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
