//! # Revenue Engine
//!
//! Sales revenue of everything a house has printed, with the bulk discount.
//!
//! ```text
//! per item:  copies ≤ threshold  →  price × copies
//!            copies > threshold  →  price × (discount/100) × copies
//! ```
//!
//! A discounted line is charged at `discount %` of the list price, it does
//! not take `discount %` off. Lines are summed at full precision and the
//! total is rounded half-up to the cent.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::house::PrintHouse;
use crate::money::Money;
use crate::types::Percentage;

/// Bulk discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountRule {
    /// Copies strictly above this count are discounted.
    pub threshold: u32,
    pub discount: Percentage,
}

impl DiscountRule {
    /// Exact revenue of one printed item.
    pub fn line_revenue(&self, price_per_copy: Money, copies: u32) -> CoreResult<Decimal> {
        let list = price_per_copy
            .to_decimal()
            .checked_mul(Decimal::from(copies))
            .ok_or(CoreError::AmountOverflow { context: "revenue" })?;

        if copies > self.threshold {
            list.checked_mul(self.discount.fraction())
                .ok_or(CoreError::AmountOverflow { context: "revenue" })
        } else {
            Ok(list)
        }
    }
}

/// Total revenue across all of a house's presses.
pub fn total_revenue(house: &PrintHouse) -> CoreResult<Money> {
    let rule = house.discount_rule();
    let mut total = Decimal::ZERO;

    for press in house.presses() {
        for (item, copies) in press.printed_items() {
            let line = rule.line_revenue(item.price_per_copy(), *copies)?;
            total = total
                .checked_add(line)
                .ok_or(CoreError::AmountOverflow { context: "revenue" })?;
        }
    }

    Money::from_decimal(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
