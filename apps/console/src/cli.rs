//! Command line definition.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use printhouse_core::{
    Money, PaperCostTable, PaperType, Percentage, Role, SettingsUpdate, SizeTier, ValidationError,
};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    name = "printhouse",
    about = "Print house accounting: presses, pricing, revenue and payroll",
    version
)]
pub struct Cli {
    /// Database file (overrides PRINTHOUSE_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage print houses and their accounting rules
    House {
        #[command(subcommand)]
        action: HouseCommands,
    },
    /// Manage a print house's presses
    Press {
        #[command(subcommand)]
        action: PressCommands,
    },
    /// Manage a print house's staff
    Employee {
        #[command(subcommand)]
        action: EmployeeCommands,
    },
    /// Manage a print house's edition catalog
    Edition {
        #[command(subcommand)]
        action: EditionCommands,
    },
    /// Print cost, revenue, payroll and profit of a print house
    Report {
        /// Print house name or id
        house: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a sample print house with presses, staff and print runs
    Demo {
        #[arg(long, default_value = "Demo Print House")]
        name: String,
    },
    /// Write every print house and catalog to a JSON file
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Replace every stored print house with the contents of a JSON file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum HouseCommands {
    /// Register a new print house
    Create {
        name: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List print houses
    List,
    /// Show a print house's settings, presses and staff
    Show {
        house: String,
        #[arg(long)]
        json: bool,
    },
    /// Change accounting rules; omitted options keep their value
    Update {
        house: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Delete a print house and its catalog
    Remove { house: String },
}

/// Accounting rule options shared by `house create` and `house update`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsArgs {
    /// Raise for eligible roles once the revenue target is met, in percent
    #[arg(long, value_parser = parse_percentage)]
    pub salary_increment: Option<Percentage>,

    /// Paper cost growth per size tier, in percent
    #[arg(long, value_parser = parse_percentage)]
    pub paper_increment: Option<Percentage>,

    #[arg(long, value_parser = parse_money)]
    pub base_salary: Option<Money>,

    /// Roles receiving the raise (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub eligible: Option<Vec<Role>>,

    /// No role receives the raise
    #[arg(long, conflicts_with = "eligible")]
    pub no_eligible: bool,

    #[arg(long, value_parser = parse_money)]
    pub revenue_target: Option<Money>,

    /// Copies above this count are discounted
    #[arg(long)]
    pub discount_threshold: Option<u32>,

    /// Share of the list price charged on discounted lines, in percent
    #[arg(long, value_parser = parse_percentage)]
    pub discount: Option<Percentage>,

    /// Base cost override, e.g. `glossy=1.30` (repeatable)
    #[arg(long = "paper-cost", value_name = "TYPE=AMOUNT", value_parser = parse_paper_cost)]
    pub paper_costs: Vec<(PaperType, Money)>,
}

impl SettingsArgs {
    /// Builds the settings change, applying paper cost overrides on top of
    /// `current_costs`.
    pub fn to_update(&self, current_costs: PaperCostTable) -> SettingsUpdate {
        let increment_eligible_roles = if self.no_eligible {
            Some(BTreeSet::new())
        } else {
            self.eligible
                .as_ref()
                .map(|roles| roles.iter().copied().collect())
        };

        let paper_costs = (!self.paper_costs.is_empty()).then(|| {
            self.paper_costs
                .iter()
                .fold(current_costs, |table, (paper, cost)| {
                    table.with_cost(*paper, *cost)
                })
        });

        SettingsUpdate {
            salary_increment: self.salary_increment,
            paper_cost_increment: self.paper_increment,
            base_salary: self.base_salary,
            increment_eligible_roles,
            revenue_target: self.revenue_target,
            discount_threshold: self.discount_threshold,
            discount: self.discount,
            paper_costs,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PressCommands {
    /// Add a press
    Add {
        house: String,
        /// Sheet capacity
        #[arg(long)]
        max_load: u32,
        /// Sheets loaded initially
        #[arg(long, default_value_t = 0)]
        load: u32,
        /// Colour press (black-and-white otherwise)
        #[arg(long)]
        colour: bool,
        /// Rated speed in pages per minute
        #[arg(long)]
        ppm: u32,
    },
    /// List presses with their paper and printed pages
    List { house: String },
    /// Reconfigure a press; omitted options keep their value
    Update {
        house: String,
        index: usize,
        #[arg(long)]
        max_load: Option<u32>,
        #[arg(long)]
        load: Option<u32>,
        #[arg(long)]
        colour: Option<bool>,
        #[arg(long)]
        ppm: Option<u32>,
    },
    /// Remove a press
    Remove { house: String, index: usize },
    /// Load sheets into a press (clamped to its capacity)
    LoadPaper {
        house: String,
        index: usize,
        sheets: u32,
    },
    /// Print copies of a catalog edition
    Print {
        house: String,
        index: usize,
        /// Catalog position of the edition
        #[arg(long)]
        edition: usize,
        #[arg(long)]
        paper: PaperType,
        /// Selling price per copy
        #[arg(long, value_parser = parse_money)]
        price: Money,
        #[arg(long)]
        copies: u32,
        /// Print in colour (must match the press)
        #[arg(long)]
        colour: bool,
    },
    /// Total pages a press has printed
    Pages { house: String, index: usize },
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// Hire an employee identified by EGN
    Add { house: String, egn: String, role: Role },
    List { house: String },
    /// Change an employee's role
    Update { house: String, egn: String, role: Role },
    Remove { house: String, egn: String },
}

#[derive(Subcommand, Debug)]
pub enum EditionCommands {
    /// Add an edition to the catalog
    Add {
        house: String,
        title: String,
        #[arg(long)]
        pages: u32,
        #[arg(long)]
        size: SizeTier,
    },
    List { house: String },
    /// Change an edition in place; omitted options keep their value
    Update {
        house: String,
        position: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        pages: Option<u32>,
        #[arg(long)]
        size: Option<SizeTier>,
    },
    /// Remove the edition at a catalog position
    Remove { house: String, position: usize },
}

// =============================================================================
// Value Parsers
// =============================================================================

fn parse_decimal(field: &str, s: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(s.trim()).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Parses an amount such as `12`, `12.5` or `12.50`.
///
/// More than two decimal places is an error rather than a silent rounding.
pub fn parse_money(s: &str) -> Result<Money, ValidationError> {
    let value = parse_decimal("amount", s)?.normalize();
    if value.scale() > 2 {
        return Err(ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "at most two decimal places".to_string(),
        });
    }
    Money::from_decimal(value).map_err(|e| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: e.to_string(),
    })
}

/// Parses a non-negative percentage such as `10` or `12.5`.
pub fn parse_percentage(s: &str) -> Result<Percentage, ValidationError> {
    let value = parse_decimal("percentage", s)?;
    Percentage::new(value).map_err(|_| ValidationError::OutOfRange {
        field: "percentage".to_string(),
        min: 0,
        max: i64::MAX,
    })
}

/// Parses `TYPE=AMOUNT` with a strictly positive amount.
pub fn parse_paper_cost(s: &str) -> Result<(PaperType, Money), ValidationError> {
    let (paper, amount) = s.split_once('=').ok_or_else(|| ValidationError::InvalidFormat {
        field: "paper cost".to_string(),
        reason: "expected TYPE=AMOUNT".to_string(),
    })?;
    let paper = PaperType::from_str(paper.trim())?;
    let cost = parse_money(amount)?;
    if !cost.is_positive() {
        return Err(ValidationError::InvalidFormat {
            field: "paper cost".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok((paper, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("printhouse").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("12").unwrap(), Money::from_cents(1200));
        assert_eq!(parse_money("12.5").unwrap(), Money::from_cents(1250));
        assert_eq!(parse_money("0.10").unwrap(), Money::from_cents(10));
        assert_eq!(parse_money("1.500").unwrap(), Money::from_cents(150));
        assert!(parse_money("1.005").is_err());
        assert!(parse_money("ten").is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("12.5").unwrap().value(), dec!(12.5));
        assert!(parse_percentage("-1").is_err());
    }

    #[test]
    fn test_parse_paper_cost() {
        assert_eq!(
            parse_paper_cost("glossy=1.30").unwrap(),
            (PaperType::Glossy, Money::from_cents(130))
        );
        assert!(parse_paper_cost("glossy").is_err());
        assert!(parse_paper_cost("velvet=1").is_err());
        assert!(parse_paper_cost("standard=0").is_err());
    }

    #[test]
    fn test_house_create_settings() {
        let cli = parse(&[
            "house",
            "create",
            "Main Street",
            "--salary-increment",
            "15",
            "--base-salary",
            "1000",
            "--eligible",
            "manager,operator",
            "--paper-cost",
            "glossy=1.30",
        ]);

        let Commands::House {
            action: HouseCommands::Create { name, settings },
        } = cli.command
        else {
            panic!("expected house create");
        };
        assert_eq!(name, "Main Street");

        let update = settings.to_update(PaperCostTable::default());
        assert_eq!(update.salary_increment, Some(Percentage::from_whole(15)));
        assert_eq!(update.base_salary, Some(Money::from_major(1000)));
        assert_eq!(
            update.increment_eligible_roles,
            Some([Role::Operator, Role::Manager].into_iter().collect())
        );
        let costs = update.paper_costs.unwrap();
        assert_eq!(costs.cost(PaperType::Glossy), Money::from_cents(130));
        assert_eq!(costs.cost(PaperType::Standard), PaperType::Standard.base_cost());
        assert_eq!(update.revenue_target, None);
    }

    #[test]
    fn test_no_eligible_clears_roles() {
        let cli = parse(&["house", "update", "Main Street", "--no-eligible"]);
        let Commands::House {
            action: HouseCommands::Update { settings, .. },
        } = cli.command
        else {
            panic!("expected house update");
        };
        assert_eq!(
            settings.to_update(PaperCostTable::default()).increment_eligible_roles,
            Some(BTreeSet::new())
        );
    }

    #[test]
    fn test_empty_update_is_empty() {
        let cli = parse(&["house", "update", "Main Street"]);
        let Commands::House {
            action: HouseCommands::Update { settings, .. },
        } = cli.command
        else {
            panic!("expected house update");
        };
        assert!(settings.to_update(PaperCostTable::default()).is_empty());
    }

    #[test]
    fn test_press_print() {
        let cli = parse(&[
            "--db", "/tmp/x.db", "press", "print", "Main Street", "1", "--edition", "0", "--paper",
            "glossy", "--price", "2.50", "--copies", "40", "--colour",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Commands::Press {
                action:
                    PressCommands::Print {
                        index,
                        edition,
                        paper,
                        price,
                        copies,
                        colour,
                        ..
                    },
            } => {
                assert_eq!(index, 1);
                assert_eq!(edition, 0);
                assert_eq!(paper, PaperType::Glossy);
                assert_eq!(price, Money::from_cents(250));
                assert_eq!(copies, 40);
                assert!(colour);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_edition_update_options_are_optional() {
        match parse(&["edition", "update", "Main", "2", "--size", "a3"]).command {
            Commands::Edition {
                action:
                    EditionCommands::Update {
                        position,
                        title,
                        pages,
                        size,
                        ..
                    },
            } => {
                assert_eq!(position, 2);
                assert_eq!(title, None);
                assert_eq!(pages, None);
                assert_eq!(size, Some(SizeTier::A3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_and_import_take_a_file() {
        match parse(&["export", "backup.json"]).command {
            Commands::Export { file } => assert_eq!(file, PathBuf::from("backup.json")),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["printhouse", "import"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_enum_values() {
        let args = ["printhouse", "edition", "add", "Main", "Atlas", "--pages", "40", "--size", "A9"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["printhouse", "employee", "add", "Main", "7501020018", "janitor"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_eligible_conflicts_with_no_eligible() {
        let args = [
            "printhouse",
            "house",
            "update",
            "Main",
            "--eligible",
            "manager",
            "--no-eligible",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
