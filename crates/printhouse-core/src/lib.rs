//! # printhouse-core: Pure Accounting Engine for PrintHouse
//!
//! This crate is the **heart** of PrintHouse. It contains the paper-load
//! state machine and the pricing, revenue and payroll engines as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintHouse Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (`printhouse`)                       │   │
//! │  │    house ──► press ──► employee ──► edition ──► report          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ printhouse-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   press   │  │  pricing  │  │  payroll  │  │   │
//! │  │   │  Edition  │  │  Printing │  │  revenue  │  │  summary  │  │   │
//! │  │   │  Employee │  │  Press    │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 printhouse-db (Database Layer)                  │   │
//! │  │            SQLite tables, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (PaperType, SizeTier, Edition, Employee, etc.)
//! - [`money`] - Money type with integer cents
//! - [`press`] - Printing press and its paper load
//! - [`pricing`] - Print cost
//! - [`revenue`] - Sales revenue with the bulk discount
//! - [`payroll`] - Employee cost with the revenue-gated increment
//! - [`house`] - The print house aggregate
//! - [`summary`] - Headline figures of a house
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation (title, page count, EGN)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every engine is deterministic over `&PrintHouse`
//! 2. **No I/O**: database, network, file system and logging are FORBIDDEN here
//! 3. **Exact Money**: cents in `i64`, compound math in `Decimal`, one rounding
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use printhouse_core::{
//!     Edition, FinancialSummary, HouseSettings, Money, PaperType, Percentage, PrintHouse,
//!     PrintingPress, SizeTier,
//! };
//!
//! let mut house = PrintHouse::new(HouseSettings {
//!     paper_cost_increment: Percentage::from_whole(10),
//!     ..HouseSettings::default()
//! })
//! .unwrap();
//!
//! let index = house.add_press(PrintingPress::new(1000, 0, false, 120).unwrap());
//! let press = house.press_mut(index).unwrap();
//! press.load_paper(500).unwrap();
//!
//! let edition = Edition::new("Quarterly Report", 50, SizeTier::A4).unwrap();
//! press
//!     .print_item(false, &edition, PaperType::Standard, Money::from_major(20), 2)
//!     .unwrap();
//!
//! let summary = FinancialSummary::for_house(&house).unwrap();
//! assert_eq!(summary.print_cost, Money::from_major(11_000));
//! assert_eq!(summary.revenue, Money::from_major(40));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod house;
pub mod money;
pub mod payroll;
pub mod press;
pub mod pricing;
pub mod revenue;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use printhouse_core::Money` instead of
// `use printhouse_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use house::{HouseSettings, PrintHouse, SettingsUpdate};
pub use money::Money;
pub use payroll::{payroll_breakdown, total_employee_cost, PayrollLine};
pub use press::{PressSettings, PrintedItem, PrintingPress};
pub use pricing::{total_print_cost, unit_cost, PaperCostTable, PricingConfig};
pub use revenue::{total_revenue, DiscountRule};
pub use summary::FinancialSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest paper capacity a press may be configured with, in sheets.
pub const MAX_PAPER_LOAD: u32 = 100_000;

/// Largest rated speed of a press. Informational only.
pub const MAX_PAGES_PER_MINUTE: u32 = 1_000;

/// Highest price per copy a printed item may carry.
pub const MAX_PRICE: Money = Money::from_major(1_000_000_000);

/// Edition title length bounds, in characters.
pub const MIN_TITLE_LENGTH: usize = 2;
pub const MAX_TITLE_LENGTH: usize = 150;

/// Edition page count bounds.
pub const MIN_PAGE_COUNT: u32 = 3;
pub const MAX_PAGE_COUNT: u32 = 1_000;
