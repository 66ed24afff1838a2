//! # Database State
//!
//! Opens the database file the console works against.

use std::path::Path;

use printhouse_db::{Database, DbConfig};
use tracing::{debug, info};

use crate::error::AppError;

/// Wrapper around `Database` owned by a console session.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (creating if needed) the database at `path` and applies
    /// pending migrations.
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            debug!(dir = %parent.display(), "Ensuring data directory exists");
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::internal(format!(
                    "cannot create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // One command per process: a small pool is enough
        let db = Database::new(DbConfig::new(path).max_connections(2)).await?;
        info!(path = %path.display(), "Database opened");
        Ok(DbState::new(db))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Closes the pool, flushing the WAL.
    pub async fn close(self) {
        self.db.close().await;
    }
}
