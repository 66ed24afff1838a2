//! # Console State
//!
//! State shared by the commands of one console session.
//!
//! ## State Types
//! - [`ConsoleConfig`]: Read-only configuration (environment + flags)
//! - [`DbState`]: The opened database
//! - [`Registry`]: Print house lookup and the load → change → save cycle

mod config;
mod db;
mod registry;

pub use config::{ConfigError, ConsoleConfig, DATABASE_FILE_NAME, DEFAULT_LOG_FILTER};
pub use db::DbState;
pub use registry::{HouseArchive, Registry};
