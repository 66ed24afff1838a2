//! # Console Commands
//!
//! One module per command group.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── house.rs     ◄─── Print houses and their accounting rules
//! ├── press.rs     ◄─── Presses, paper loading, printing
//! ├── employee.rs  ◄─── Staff
//! ├── edition.rs   ◄─── Edition catalog
//! ├── report.rs    ◄─── Cost / revenue / payroll / profit
//! ├── archive.rs   ◄─── JSON export / import of everything
//! └── demo.rs      ◄─── Sample data
//! ```
//!
//! ## How Commands Work
//! ```text
//! printhouse press load-paper "Main Street" 0 500
//!         │
//!         ▼
//! dispatch(Commands::Press { .. })
//!         │
//!         ▼
//! press::load_paper(registry, "Main Street", 0, 500)
//!         │   Registry::modify_house: load → PrintingPress::load_paper → save
//!         ▼
//! Ok("Loaded 500 of 500 sheets into press #0 (500/1000)")  ──► stdout
//! ```
//!
//! Every command returns the text to print, so it can be tested without a
//! process.

pub mod archive;
pub mod demo;
pub mod edition;
pub mod employee;
pub mod house;
pub mod press;
pub mod report;

use crate::cli::Commands;
use crate::error::AppError;
use crate::state::{ConsoleConfig, Registry};

/// Runs one parsed command against the database.
pub async fn dispatch(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    command: Commands,
) -> Result<String, AppError> {
    match command {
        Commands::House { action } => house::run(registry, config, action).await,
        Commands::Press { action } => press::run(registry, config, action).await,
        Commands::Employee { action } => employee::run(registry, action).await,
        Commands::Edition { action } => edition::run(registry, action).await,
        Commands::Report { house, json } => report::run(registry, config, &house, json).await,
        Commands::Demo { name } => demo::run(registry, config, &name).await,
        Commands::Export { file } => archive::export(registry, &file).await,
        Commands::Import { file } => archive::import(registry, &file).await,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use printhouse_core::{HouseSettings, PrintHouse};
    use printhouse_db::{Database, DbConfig};

    use crate::state::{ConsoleConfig, Registry};

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn test_config() -> ConsoleConfig {
        ConsoleConfig::from_lookup(|key| match key {
            "PRINTHOUSE_DB_PATH" => Some(":memory:".to_string()),
            "PRINTHOUSE_CURRENCY_SYMBOL" => Some("$".to_string()),
            _ => None,
        })
        .unwrap()
    }

    /// Registry over `db` holding an empty "Main Street" house.
    pub async fn registry_with_house(db: &Database) -> Registry<'_> {
        let registry = Registry::new(db);
        let house = PrintHouse::new(HouseSettings::default()).unwrap();
        registry.create_house("Main Street", &house).await.unwrap();
        registry
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::test_support::{test_config, test_db};
    use super::*;
    use crate::cli::Cli;

    async fn exec(registry: Registry<'_>, args: &[&str]) -> Result<String, AppError> {
        let cli = Cli::try_parse_from(std::iter::once("printhouse").chain(args.iter().copied()))
            .unwrap();
        dispatch(registry, &test_config(), cli.command).await
    }

    #[tokio::test]
    async fn test_end_to_end_session() {
        let db = test_db().await;
        let registry = Registry::new(&db);

        exec(registry, &["house", "create", "Main", "--base-salary", "500", "--revenue-target", "10"])
            .await
            .unwrap();
        exec(registry, &["press", "add", "Main", "--max-load", "1000", "--ppm", "60"])
            .await
            .unwrap();
        exec(registry, &["press", "load-paper", "Main", "0", "500"])
            .await
            .unwrap();
        exec(registry, &["edition", "add", "Main", "Pocket Guide", "--pages", "12", "--size", "a5"])
            .await
            .unwrap();
        exec(registry, &["employee", "add", "Main", "7501020018", "operator"])
            .await
            .unwrap();
        exec(
            registry,
            &[
                "press", "print", "Main", "0", "--edition", "0", "--paper", "newspaper", "--price",
                "3", "--copies", "10",
            ],
        )
        .await
        .unwrap();

        assert_eq!(exec(registry, &["press", "pages", "Main", "0"]).await.unwrap(), "120");

        // revising the catalog does not touch what was already printed
        exec(registry, &["edition", "update", "Main", "0", "--pages", "16"])
            .await
            .unwrap();
        let listing = exec(registry, &["edition", "list", "Main"]).await.unwrap();
        assert!(listing.contains("16 pages"));
        assert_eq!(exec(registry, &["press", "pages", "Main", "0"]).await.unwrap(), "120");

        // 10 copies at 3.00, default discount threshold 0 at 100% → full price
        let out = exec(registry, &["report", "Main", "--json"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"]["revenue"], serde_json::json!(3000));
        assert_eq!(value["payroll"][0]["incremented"], false);
    }
}
