//! # Configuration State
//!
//! Console configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`)
//! 2. Environment variables (`PRINTHOUSE_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after loading.

use std::path::PathBuf;

use directories::ProjectDirs;
use printhouse_core::Money;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log filter used when neither `PRINTHOUSE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,printhouse=info,sqlx=warn";

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "printhouse.db";

const MAX_CURRENCY_SYMBOL_CHARS: usize = 8;

/// Errors raised while reading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    EmptyValue { var: &'static str },

    #[error("{var} is too long (max {max} characters)")]
    TooLong { var: &'static str, max: usize },

    #[error("invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },

    #[error("could not determine a data directory; set PRINTHOUSE_DB_PATH or pass --db")]
    NoDataDir,
}

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl ConsoleConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `PRINTHOUSE_DB_PATH`: Database file (default: platform data dir)
    /// - `PRINTHOUSE_LOG`: Log filter, falls back to `RUST_LOG`
    /// - `PRINTHOUSE_CURRENCY_SYMBOL`: Symbol printed before amounts
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match non_empty(&lookup, "PRINTHOUSE_DB_PATH")? {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let log_filter = match non_empty(&lookup, "PRINTHOUSE_LOG")? {
            Some(filter) => filter,
            None => lookup("RUST_LOG")
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        EnvFilter::try_new(&log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: log_filter.clone(),
            reason: e.to_string(),
        })?;

        let currency_symbol = match lookup("PRINTHOUSE_CURRENCY_SYMBOL") {
            Some(symbol) if symbol.chars().count() > MAX_CURRENCY_SYMBOL_CHARS => {
                return Err(ConfigError::TooLong {
                    var: "PRINTHOUSE_CURRENCY_SYMBOL",
                    max: MAX_CURRENCY_SYMBOL_CHARS,
                })
            }
            Some(symbol) => symbol,
            None => String::new(),
        };

        Ok(ConsoleConfig {
            database_path,
            log_filter,
            currency_symbol,
        })
    }

    /// Overrides the database path (from `--db`).
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// config.format_money(Money::from_cents(-1234)) // "-$12.34" with symbol "$"
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.major().unsigned_abs(),
            amount.minor_part()
        )
    }
}

fn non_empty<F>(lookup: &F, var: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue { var }),
        other => Ok(other),
    }
}

/// Platform data directory for the database.
///
/// - macOS: `~/Library/Application Support/com.printhouse.printhouse/printhouse.db`
/// - Windows: `%APPDATA%\printhouse\printhouse\data\printhouse.db`
/// - Linux: `~/.local/share/printhouse/printhouse.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "printhouse", "printhouse").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
}
