//! # Payroll Engine
//!
//! Employee cost, with a salary increment gated on revenue.
//!
//! ## Increment Gate
//! ```text
//! revenue = total_revenue(house)
//!      │
//!      ├── revenue ≥ target ──► eligible roles: base × (1 + pct/100)
//!      │                        other roles:    base
//!      │
//!      └── revenue < target ──► everyone:       base
//! ```
//!
//! Salaries are summed unrounded; only the total is rounded half-up to the
//! cent. Each [`PayrollLine`] shows its own salary rounded for display.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::house::PrintHouse;
use crate::money::Money;
use crate::revenue::total_revenue;
use crate::types::{Employee, Role};

/// One employee's contribution to the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollLine {
    pub employee_id: String,
    pub role: Role,
    pub cost: Money,
    pub incremented: bool,
}

struct Salary<'a> {
    employee: &'a Employee,
    amount: Decimal,
    incremented: bool,
}

/// Unrounded salary of every employee, in employee order.
fn salaries(house: &PrintHouse) -> CoreResult<Vec<Salary<'_>>> {
    let revenue = total_revenue(house)?;
    let target_met = revenue >= house.revenue_target();

    let base = house.base_salary().to_decimal();
    let increased = base
        .checked_mul(house.salary_increment().growth_factor())
        .ok_or(CoreError::AmountOverflow { context: "salary" })?;

    Ok(house
        .employees()
        .iter()
        .map(|employee| {
            let incremented = target_met && house.is_increment_eligible(employee.role());
            Salary {
                employee,
                amount: if incremented { increased } else { base },
                incremented,
            }
        })
        .collect())
}

/// Per-employee payroll, in employee order.
pub fn payroll_breakdown(house: &PrintHouse) -> CoreResult<Vec<PayrollLine>> {
    salaries(house)?
        .into_iter()
        .map(|salary| {
            Ok(PayrollLine {
                employee_id: salary.employee.id().to_string(),
                role: salary.employee.role(),
                cost: Money::from_decimal(salary.amount)?,
                incremented: salary.incremented,
            })
        })
        .collect()
}

/// Total employee cost.
///
/// ## Example
/// ```rust
/// use printhouse_core::payroll::total_employee_cost;
/// use printhouse_core::{Employee, HouseSettings, Money, PrintHouse, Role};
///
/// let mut house = PrintHouse::new(HouseSettings {
///     base_salary: Money::from_major(1000),
///     revenue_target: Money::from_major(500),
///     ..HouseSettings::default()
/// })
/// .unwrap();
/// house.add_employee(Employee::new("7501020018", Role::Operator).unwrap()).unwrap();
///
/// // no revenue yet, target missed
/// assert_eq!(total_employee_cost(&house).unwrap(), Money::from_major(1000));
/// ```
pub fn total_employee_cost(house: &PrintHouse) -> CoreResult<Money> {
    let total = salaries(house)?
        .iter()
        .try_fold(Decimal::ZERO, |total, salary| total.checked_add(salary.amount))
        .ok_or(CoreError::AmountOverflow {
            context: "employee cost",
        })?;
    Money::from_decimal(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
