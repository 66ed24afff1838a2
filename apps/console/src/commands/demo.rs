//! # Demo Command
//!
//! Seeds a complete sample print house and prints its report:
//!
//! - a black-and-white and a colour press
//! - an operator and a manager (only managers get the raise)
//! - two catalog editions, each printed above the bulk threshold

use std::collections::BTreeSet;

use printhouse_core::{
    Edition, Employee, HouseSettings, Money, PaperCostTable, PaperType, Percentage, PrintHouse,
    PrintingPress, Role, SizeTier,
};
use tracing::info;

use crate::commands::report::Report;
use crate::error::AppError;
use crate::state::{ConsoleConfig, Registry};

fn demo_settings() -> HouseSettings {
    HouseSettings {
        salary_increment: Percentage::from_whole(15),
        paper_cost_increment: Percentage::from_whole(10),
        base_salary: Money::from_major(1000),
        increment_eligible_roles: BTreeSet::from([Role::Manager]),
        revenue_target: Money::from_major(100),
        discount_threshold: 15,
        discount: Percentage::from_whole(90),
        // per page
        paper_costs: PaperCostTable::default()
            .with_cost(PaperType::Standard, Money::from_cents(2))
            .with_cost(PaperType::Glossy, Money::from_cents(5))
            .with_cost(PaperType::Newspaper, Money::from_cents(1)),
    }
}

fn demo_catalog() -> Result<Vec<Edition>, AppError> {
    Ok(vec![
        Edition::new("The Lord of the Rings", 40, SizeTier::A5)?,
        Edition::new("Harry Potter", 10, SizeTier::A3)?,
    ])
}

/// Builds the sample house with its print runs already made.
pub fn demo_house(catalog: &[Edition]) -> Result<PrintHouse, AppError> {
    let [lotr, potter] = catalog else {
        return Err(AppError::internal("demo catalog must hold two editions"));
    };

    let mut house = PrintHouse::new(demo_settings())?;
    house.add_employee(Employee::new("7501020018", Role::Operator)?)?;
    house.add_employee(Employee::new("8003050020", Role::Manager)?)?;

    let mut bw = PrintingPress::new(5000, 5000, false, 250)?;
    bw.print_item(false, lotr, PaperType::Standard, Money::from_major(25), 100)?;
    house.add_press(bw);

    let mut colour = PrintingPress::new(2000, 2000, true, 250)?;
    colour.print_item(true, potter, PaperType::Glossy, Money::from_cents(1250), 20)?;
    house.add_press(colour);

    Ok(house)
}

pub async fn run(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    name: &str,
) -> Result<String, AppError> {
    let catalog = demo_catalog()?;
    let house = demo_house(&catalog)?;

    let stored = registry.create_house(name, &house).await?;
    for edition in &catalog {
        registry.add_edition(&stored.id, edition).await?;
    }
    info!(house = %stored.name, "Demo print house seeded");

    let report = Report::for_house(&stored.name, &stored.house)?;
    Ok(report.render(config))
}
