//! Financial summary of a print house.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::house::PrintHouse;
use crate::money::Money;
use crate::payroll::total_employee_cost;
use crate::pricing::total_print_cost;
use crate::revenue::total_revenue;

/// The four headline figures of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub print_cost: Money,
    pub revenue: Money,
    pub employee_cost: Money,
    /// `revenue − print_cost − employee_cost`; negative for a loss.
    pub profit: Money,
}

impl FinancialSummary {
    pub fn for_house(house: &PrintHouse) -> CoreResult<Self> {
        let print_cost = total_print_cost(house)?;
        let revenue = total_revenue(house)?;
        let employee_cost = total_employee_cost(house)?;

        let profit = revenue
            .checked_sub(print_cost)
            .and_then(|p| p.checked_sub(employee_cost))
            .ok_or(CoreError::AmountOverflow { context: "profit" })?;

        Ok(FinancialSummary {
            print_cost,
            revenue,
            employee_cost,
            profit,
        })
    }

    pub fn is_loss(&self) -> bool {
        self.profit.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::HouseSettings;
    use crate::press::PrintingPress;
    use crate::types::{Edition, Employee, PaperType, Percentage, Role, SizeTier};
    use std::collections::BTreeSet;

    #[test]
    fn test_summary_of_a_working_house() {
        let mut house = PrintHouse::new(HouseSettings {
            salary_increment: Percentage::from_whole(15),
            paper_cost_increment: Percentage::from_whole(10),
            base_salary: Money::from_major(1000),
            increment_eligible_roles: BTreeSet::from([Role::Manager]),
            revenue_target: Money::from_major(100),
            discount_threshold: 15,
            discount: Percentage::from_whole(10),
            ..HouseSettings::default()
        })
        .unwrap();
        house
            .add_employee(Employee::new("7501020018", Role::Operator).unwrap())
            .unwrap();
        house
            .add_employee(Employee::new("8003050020", Role::Manager).unwrap())
            .unwrap();

        let mut press = PrintingPress::new(2000, 2000, true, 250).unwrap();
        let ed = Edition::new("Harry Potter", 10, SizeTier::A3).unwrap();
        press
            .print_item(true, &ed, PaperType::Glossy, Money::from_major(10), 20)
            .unwrap();
        house.add_press(press);

        let summary = FinancialSummary::for_house(&house).unwrap();

        // 120 × 1.21 × 10 = 1452.00 per copy, 20 copies
        assert_eq!(summary.print_cost, Money::from_major(29_040));
        // 20 copies > 15: 10 × 0.10 × 20
        assert_eq!(summary.revenue, Money::from_major(20));
        // target 100 missed
        assert_eq!(summary.employee_cost, Money::from_major(2000));
        assert_eq!(summary.profit, Money::from_major(20 - 29_040 - 2000));
        assert!(summary.is_loss());
    }

    #[test]
    fn test_empty_house_breaks_even() {
        let house = PrintHouse::new(HouseSettings::default()).unwrap();
        let summary = FinancialSummary::for_house(&house).unwrap();
        assert_eq!(summary.profit, Money::zero());
        assert!(!summary.is_loss());
    }
}
