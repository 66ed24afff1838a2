//! # House Commands
//!
//! Create, inspect, reconfigure and delete print houses.

use std::fmt::Write as _;

use printhouse_core::{HouseSettings, PaperCostTable, PaperType, PrintHouse};
use tracing::{info, warn};

use crate::cli::{HouseCommands, SettingsArgs};
use crate::error::AppError;
use crate::state::{ConsoleConfig, Registry};

pub async fn run(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    action: HouseCommands,
) -> Result<String, AppError> {
    match action {
        HouseCommands::Create { name, settings } => create(registry, &name, &settings).await,
        HouseCommands::List => list(registry).await,
        HouseCommands::Show { house, json } => show(registry, config, &house, json).await,
        HouseCommands::Update { house, settings } => update(registry, &house, &settings).await,
        HouseCommands::Remove { house } => remove(registry, &house).await,
    }
}

/// Creates a house from the default rules with `settings` applied on top.
pub async fn create(
    registry: Registry<'_>,
    name: &str,
    settings: &SettingsArgs,
) -> Result<String, AppError> {
    let mut house = PrintHouse::new(HouseSettings::default())?;
    house.update_settings(settings.to_update(PaperCostTable::default()))?;

    let stored = registry.create_house(name, &house).await?;
    Ok(format!("Created print house '{}' ({})", stored.name, stored.id))
}

pub async fn list(registry: Registry<'_>) -> Result<String, AppError> {
    let houses = registry.houses().await?;
    if houses.is_empty() {
        return Ok("No print houses".to_string());
    }

    let mut out = String::new();
    for stored in houses {
        let _ = writeln!(
            out,
            "{:<30} {}  presses: {}  employees: {}",
            stored.name,
            stored.id,
            stored.house.presses().len(),
            stored.house.employees().len()
        );
    }
    Ok(out.trim_end().to_string())
}

pub async fn show(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    key: &str,
    json: bool,
) -> Result<String, AppError> {
    let stored = registry.find_house(key).await?;
    if json {
        return serde_json::to_string_pretty(&stored.house)
            .map_err(|e| AppError::internal(e.to_string()));
    }

    let settings = stored.house.settings();
    let roles: Vec<&str> = settings
        .increment_eligible_roles
        .iter()
        .map(|r| r.as_str())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", stored.name, stored.id);
    let _ = writeln!(out, "  base salary:        {}", config.format_money(settings.base_salary));
    let _ = writeln!(out, "  salary increment:   {}", settings.salary_increment);
    let _ = writeln!(
        out,
        "  eligible roles:     {}",
        if roles.is_empty() { "-".to_string() } else { roles.join(", ") }
    );
    let _ = writeln!(out, "  revenue target:     {}", config.format_money(settings.revenue_target));
    let _ = writeln!(
        out,
        "  discount:           {} of list above {} copies",
        settings.discount, settings.discount_threshold
    );
    let _ = writeln!(out, "  paper increment:    {} per size tier", settings.paper_cost_increment);
    for paper in PaperType::ALL {
        let _ = writeln!(
            out,
            "  {:<19} {}",
            format!("{} paper:", paper),
            config.format_money(settings.paper_costs.cost(paper))
        );
    }
    let _ = writeln!(
        out,
        "  presses: {}  employees: {}",
        stored.house.presses().len(),
        stored.house.employees().len()
    );
    Ok(out.trim_end().to_string())
}

pub async fn update(
    registry: Registry<'_>,
    key: &str,
    settings: &SettingsArgs,
) -> Result<String, AppError> {
    if settings.to_update(PaperCostTable::default()).is_empty() {
        return Err(AppError::validation("nothing to update"));
    }

    registry
        .modify_house(key, |house| {
            let update = settings.to_update(house.settings().paper_costs);
            house.update_settings(update)?;
            Ok(())
        })
        .await?;

    info!(house = %key, "Print house settings updated");
    Ok(format!("Updated print house '{}'", key))
}

pub async fn remove(registry: Registry<'_>, key: &str) -> Result<String, AppError> {
    if registry.remove_house(key).await? {
        Ok(format!("Removed print house '{}'", key))
    } else {
        warn!(house = %key, "Nothing removed");
        Ok(format!("No print house '{}'", key))
    }
}
