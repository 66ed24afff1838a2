//! # Press Commands
//!
//! Press management and the two press operations that change state:
//! loading paper and printing.
//!
//! ```text
//! press load-paper main 0 500      press print main 0 --edition 2 ...
//!        │                                │
//!        ▼                                ▼
//!  PrintingPress::load_paper        PrintingPress::print_item
//!  (clamped to capacity)            (all-or-nothing)
//! ```

use std::fmt::Write as _;

use printhouse_core::{Money, PaperType, PressSettings, PrintHouse, PrintingPress};
use tracing::{info, warn};

use crate::cli::PressCommands;
use crate::error::AppError;
use crate::state::{ConsoleConfig, Registry};

pub async fn run(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    action: PressCommands,
) -> Result<String, AppError> {
    match action {
        PressCommands::Add {
            house,
            max_load,
            load,
            colour,
            ppm,
        } => add(registry, &house, max_load, load, colour, ppm).await,
        PressCommands::List { house } => list(registry, config, &house).await,
        PressCommands::Update {
            house,
            index,
            max_load,
            load,
            colour,
            ppm,
        } => {
            let settings = PressSettings {
                max_paper_load: max_load,
                current_paper_load: load,
                colour,
                max_pages_per_minute: ppm,
            };
            update(registry, &house, index, settings).await
        }
        PressCommands::Remove { house, index } => remove(registry, &house, index).await,
        PressCommands::LoadPaper {
            house,
            index,
            sheets,
        } => load_paper(registry, &house, index, sheets).await,
        PressCommands::Print {
            house,
            index,
            edition,
            paper,
            price,
            copies,
            colour,
        } => {
            let job = PrintJob {
                edition,
                paper,
                price,
                copies,
                colour,
            };
            print(registry, &house, index, &job).await
        }
        PressCommands::Pages { house, index } => pages(registry, &house, index).await,
    }
}

/// One `press print` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintJob {
    /// Catalog position of the edition.
    pub edition: usize,
    pub paper: PaperType,
    pub price: Money,
    pub copies: u32,
    pub colour: bool,
}

fn press_mut(house: &mut PrintHouse, index: usize) -> Result<&mut PrintingPress, AppError> {
    house
        .press_mut(index)
        .ok_or_else(|| AppError::not_found("Press", &index.to_string()))
}

pub async fn add(
    registry: Registry<'_>,
    key: &str,
    max_load: u32,
    load: u32,
    colour: bool,
    ppm: u32,
) -> Result<String, AppError> {
    let press = PrintingPress::new(max_load, load, colour, ppm)?;
    let index = registry
        .modify_house(key, |house| Ok(house.add_press(press)))
        .await?;

    info!(house = %key, index, colour, "Press added");
    Ok(format!("Added press #{} to '{}'", index, key))
}

pub async fn list(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    key: &str,
) -> Result<String, AppError> {
    let stored = registry.find_house(key).await?;
    let presses = stored.house.presses();
    if presses.is_empty() {
        return Ok(format!("'{}' has no presses", stored.name));
    }

    let mut out = String::new();
    for (index, press) in presses.iter().enumerate() {
        let _ = writeln!(
            out,
            "#{:<3} {:<6} paper {}/{}  {} ppm  {} pages printed",
            index,
            if press.is_colour() { "colour" } else { "bw" },
            press.current_paper_load(),
            press.max_paper_load(),
            press.max_pages_per_minute(),
            press.total_printed_pages()
        );
        for (item, copies) in press.printed_items_sorted() {
            let _ = writeln!(
                out,
                "       {} ({}, {} pages) on {}: {} × {}",
                item.edition().title(),
                item.edition().size(),
                item.edition().page_count(),
                item.paper_type(),
                copies,
                config.format_money(item.price_per_copy())
            );
        }
    }
    Ok(out.trim_end().to_string())
}

pub async fn update(
    registry: Registry<'_>,
    key: &str,
    index: usize,
    settings: PressSettings,
) -> Result<String, AppError> {
    if settings == PressSettings::default() {
        return Err(AppError::validation("nothing to update"));
    }

    registry
        .modify_house(key, |house| house.update_press(index, settings).map_err(AppError::from))
        .await?;

    info!(house = %key, index, "Press reconfigured");
    Ok(format!("Updated press #{}", index))
}

/// Removes a press. A missing index is logged, not an error.
pub async fn remove(registry: Registry<'_>, key: &str, index: usize) -> Result<String, AppError> {
    let removed = registry
        .modify_house(key, |house| Ok(house.remove_press(index)))
        .await?;

    match removed {
        Some(_) => {
            info!(house = %key, index, "Press removed");
            Ok(format!("Removed press #{}", index))
        }
        None => {
            warn!(house = %key, index, "Press not found for removal");
            Ok(format!("No press #{}", index))
        }
    }
}

pub async fn load_paper(
    registry: Registry<'_>,
    key: &str,
    index: usize,
    sheets: u32,
) -> Result<String, AppError> {
    let (taken, current, max) = registry
        .modify_house(key, |house| {
            let press = press_mut(house, index)?;
            let taken = press.load_paper(sheets)?;
            Ok((taken, press.current_paper_load(), press.max_paper_load()))
        })
        .await?;

    if taken < sheets {
        warn!(index, offered = sheets, taken, "Press filled to capacity");
    }
    info!(house = %key, index, taken, "Paper loaded");
    Ok(format!(
        "Loaded {} of {} sheets into press #{} ({}/{})",
        taken, sheets, index, current, max
    ))
}

pub async fn print(
    registry: Registry<'_>,
    key: &str,
    index: usize,
    job: &PrintJob,
) -> Result<String, AppError> {
    let edition = registry.edition(key, job.edition).await?;

    let remaining = registry
        .modify_house(key, |house| {
            let press = press_mut(house, index)?;
            press.print_item(job.colour, &edition, job.paper, job.price, job.copies)?;
            Ok(press.current_paper_load())
        })
        .await?;

    info!(
        house = %key,
        index,
        title = %edition.title(),
        copies = job.copies,
        remaining,
        "Printed"
    );
    Ok(format!(
        "Printed {} × '{}' on press #{} ({} sheets left)",
        job.copies,
        edition.title(),
        index,
        remaining
    ))
}

pub async fn pages(registry: Registry<'_>, key: &str, index: usize) -> Result<String, AppError> {
    let stored = registry.find_house(key).await?;
    let press = stored
        .house
        .press(index)
        .ok_or_else(|| AppError::not_found("Press", &index.to_string()))?;
    Ok(press.total_printed_pages().to_string())
}
