//! # Pricing Engine
//!
//! Print cost of the paper a house has consumed.
//!
//! ## Cost Formula
//! ```text
//! unit_cost = base(paper) × (1 + pct/100)^ordinal(size) × pages
//!
//!   Standard, 50 pages, 10 %:
//!     A5  100 × 1.0   × 50 = 5000.00
//!     A4  100 × 1.1   × 50 = 5500.00
//!     A3  100 × 1.21  × 50 = 6050.00
//!     A2  100 × 1.331 × 50 = 6655.00
//!
//! total_print_cost = Σ presses Σ items  unit_cost(item) × copies(item)
//! ```
//!
//! The product runs in `Decimal` at full precision and is rounded half-up to
//! the cent once, at the end of `unit_cost`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::house::PrintHouse;
use crate::money::Money;
use crate::press::PrintingPress;
use crate::types::{PaperType, Percentage, SizeTier};

// =============================================================================
// Configuration
// =============================================================================

/// Per-house base cost of each paper type.
///
/// Defaults to the catalog costs in [`PaperType::base_cost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperCostTable {
    standard: Money,
    glossy: Money,
    newspaper: Money,
}

impl PaperCostTable {
    pub fn cost(&self, paper_type: PaperType) -> Money {
        match paper_type {
            PaperType::Standard => self.standard,
            PaperType::Glossy => self.glossy,
            PaperType::Newspaper => self.newspaper,
        }
    }

    /// Overrides one paper type's base cost.
    ///
    /// Any value is accepted here; a non-positive cost is reported by
    /// [`unit_cost`] when it is used.
    pub fn set(&mut self, paper_type: PaperType, cost: Money) {
        match paper_type {
            PaperType::Standard => self.standard = cost,
            PaperType::Glossy => self.glossy = cost,
            PaperType::Newspaper => self.newspaper = cost,
        }
    }

    pub fn with_cost(mut self, paper_type: PaperType, cost: Money) -> Self {
        self.set(paper_type, cost);
        self
    }
}

impl Default for PaperCostTable {
    fn default() -> Self {
        PaperCostTable {
            standard: PaperType::Standard.base_cost(),
            glossy: PaperType::Glossy.base_cost(),
            newspaper: PaperType::Newspaper.base_cost(),
        }
    }
}

/// Inputs of the cost formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingConfig {
    pub paper_costs: PaperCostTable,
    pub paper_cost_increment: Percentage,
}

// =============================================================================
// Operations
// =============================================================================

/// Cost of printing one copy of `page_count` pages.
///
/// ## Example
/// ```rust
/// use printhouse_core::pricing::{unit_cost, PricingConfig};
/// use printhouse_core::{Money, PaperType, Percentage, SizeTier};
///
/// let config = PricingConfig {
///     paper_cost_increment: Percentage::from_whole(10),
///     ..Default::default()
/// };
/// let cost = unit_cost(&config, PaperType::Standard, SizeTier::A3, 50).unwrap();
/// assert_eq!(cost, Money::from_major(6050));
/// ```
pub fn unit_cost(
    config: &PricingConfig,
    paper_type: PaperType,
    size: SizeTier,
    page_count: u32,
) -> CoreResult<Money> {
    if page_count == 0 {
        return Err(CoreError::InvalidPageCount { page_count });
    }

    let base = config.paper_costs.cost(paper_type);
    if !base.is_positive() {
        return Err(CoreError::InvalidPaperCost {
            paper_type,
            cost: base,
        });
    }

    let overflow = || CoreError::AmountOverflow {
        context: "unit cost",
    };

    let growth = config.paper_cost_increment.growth_factor();
    let mut factor = Decimal::ONE;
    for _ in 0..size.ordinal() {
        factor = factor.checked_mul(growth).ok_or_else(overflow)?;
    }

    let cost = base
        .to_decimal()
        .checked_mul(factor)
        .and_then(|c| c.checked_mul(Decimal::from(page_count)))
        .ok_or_else(overflow)?;

    Money::from_decimal(cost)
}

/// Print cost of everything one press has printed.
pub fn press_print_cost(config: &PricingConfig, press: &PrintingPress) -> CoreResult<Money> {
    let mut total = Money::zero();

    for (item, copies) in press.printed_items() {
        let edition = item.edition();
        let unit = unit_cost(config, item.paper_type(), edition.size(), edition.page_count())?;
        let line = unit
            .checked_mul_quantity(*copies)
            .ok_or(CoreError::AmountOverflow {
                context: "print cost",
            })?;
        total = total.checked_add(line).ok_or(CoreError::AmountOverflow {
            context: "print cost",
        })?;
    }

    Ok(total)
}

/// Print cost across all of a house's presses.
pub fn total_print_cost(house: &PrintHouse) -> CoreResult<Money> {
    let config = house.pricing();
    let mut total = Money::zero();

    for press in house.presses() {
        total = total
            .checked_add(press_print_cost(&config, press)?)
            .ok_or(CoreError::AmountOverflow {
                context: "print cost",
            })?;
    }

    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
