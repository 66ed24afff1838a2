//! # Print House
//!
//! The aggregate the engines read: pricing, discount and payroll settings,
//! the staff list and the presses.
//!
//! ## Ownership
//! ```text
//! PrintHouse
//! ├── HouseSettings      (validated as a whole on every change)
//! ├── Vec<Employee>      (ids unique)
//! └── Vec<PrintingPress> (addressed by position)
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::press::{PressSettings, PrintingPress};
use crate::pricing::{PaperCostTable, PricingConfig};
use crate::revenue::DiscountRule;
use crate::types::{Employee, Percentage, Role};

// =============================================================================
// Settings
// =============================================================================

/// Accounting rules of a print house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseSettings {
    /// Raise granted to eligible roles when the revenue target is met.
    pub salary_increment: Percentage,
    /// Cost growth per size tier.
    pub paper_cost_increment: Percentage,
    pub base_salary: Money,
    pub increment_eligible_roles: BTreeSet<Role>,
    /// Must be greater than zero.
    pub revenue_target: Money,
    /// Copies strictly above this count are discounted.
    pub discount_threshold: u32,
    /// Share of the list price charged on a discounted line.
    pub discount: Percentage,
    #[serde(default)]
    pub paper_costs: PaperCostTable,
}

impl HouseSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_salary.is_negative() {
            return Err(CoreError::InvalidSalary {
                reason: format!("base salary cannot be negative, got {}", self.base_salary),
            });
        }
        if !self.revenue_target.is_positive() {
            return Err(CoreError::InvalidRevenueTarget {
                target: self.revenue_target,
            });
        }
        Ok(())
    }
}

/// No increments, no salary, catalog paper costs and every copy charged in
/// full (100 % of list above a zero threshold).
impl Default for HouseSettings {
    fn default() -> Self {
        HouseSettings {
            salary_increment: Percentage::zero(),
            paper_cost_increment: Percentage::zero(),
            base_salary: Money::zero(),
            increment_eligible_roles: BTreeSet::new(),
            revenue_target: Money::from_major(1),
            discount_threshold: 0,
            discount: Percentage::from_whole(100),
            paper_costs: PaperCostTable::default(),
        }
    }
}

/// Partial settings change. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub salary_increment: Option<Percentage>,
    pub paper_cost_increment: Option<Percentage>,
    pub base_salary: Option<Money>,
    pub increment_eligible_roles: Option<BTreeSet<Role>>,
    pub revenue_target: Option<Money>,
    pub discount_threshold: Option<u32>,
    pub discount: Option<Percentage>,
    pub paper_costs: Option<PaperCostTable>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SettingsUpdate::default()
    }
}

// =============================================================================
// Print House
// =============================================================================

/// A print house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HouseRecord", into = "HouseRecord")]
pub struct PrintHouse {
    settings: HouseSettings,
    employees: Vec<Employee>,
    presses: Vec<PrintingPress>,
}

impl PrintHouse {
    /// Creates a house with no staff and no presses.
    pub fn new(settings: HouseSettings) -> CoreResult<Self> {
        settings.validate()?;
        Ok(PrintHouse {
            settings,
            employees: Vec::new(),
            presses: Vec::new(),
        })
    }

    pub fn settings(&self) -> &HouseSettings {
        &self.settings
    }

    /// Applies a settings change. Either every field is applied or none is.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> CoreResult<()> {
        let mut next = self.settings.clone();

        if let Some(v) = update.salary_increment {
            next.salary_increment = v;
        }
        if let Some(v) = update.paper_cost_increment {
            next.paper_cost_increment = v;
        }
        if let Some(v) = update.base_salary {
            next.base_salary = v;
        }
        if let Some(v) = update.increment_eligible_roles {
            next.increment_eligible_roles = v;
        }
        if let Some(v) = update.revenue_target {
            next.revenue_target = v;
        }
        if let Some(v) = update.discount_threshold {
            next.discount_threshold = v;
        }
        if let Some(v) = update.discount {
            next.discount = v;
        }
        if let Some(v) = update.paper_costs {
            next.paper_costs = v;
        }

        next.validate()?;
        self.settings = next;
        Ok(())
    }

    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            paper_costs: self.settings.paper_costs,
            paper_cost_increment: self.settings.paper_cost_increment,
        }
    }

    pub fn discount_rule(&self) -> DiscountRule {
        DiscountRule {
            threshold: self.settings.discount_threshold,
            discount: self.settings.discount,
        }
    }

    pub fn revenue_target(&self) -> Money {
        self.settings.revenue_target
    }

    pub fn base_salary(&self) -> Money {
        self.settings.base_salary
    }

    pub fn salary_increment(&self) -> Percentage {
        self.settings.salary_increment
    }

    pub fn is_increment_eligible(&self, role: Role) -> bool {
        self.settings.increment_eligible_roles.contains(&role)
    }

    // -------------------------------------------------------------------------
    // Employees
    // -------------------------------------------------------------------------

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    /// Adds an employee. Ids are unique within a house.
    pub fn add_employee(&mut self, employee: Employee) -> CoreResult<()> {
        if self.employee(employee.id()).is_some() {
            return Err(CoreError::DuplicateEmployee {
                id: employee.id().to_string(),
            });
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Changes an employee's role. Returns false when no such employee exists.
    pub fn update_employee_role(&mut self, id: &str, role: Role) -> bool {
        match self.employees.iter_mut().find(|e| e.id() == id) {
            Some(employee) => {
                employee.set_role(role);
                true
            }
            None => false,
        }
    }

    pub fn remove_employee(&mut self, id: &str) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id() == id)?;
        Some(self.employees.remove(index))
    }

    // -------------------------------------------------------------------------
    // Presses
    // -------------------------------------------------------------------------

    pub fn presses(&self) -> &[PrintingPress] {
        &self.presses
    }

    pub fn press(&self, index: usize) -> Option<&PrintingPress> {
        self.presses.get(index)
    }

    pub fn press_mut(&mut self, index: usize) -> Option<&mut PrintingPress> {
        self.presses.get_mut(index)
    }

    /// Adds a press and returns its position.
    pub fn add_press(&mut self, press: PrintingPress) -> usize {
        self.presses.push(press);
        self.presses.len() - 1
    }

    /// Reconfigures the press at `index`.
    pub fn update_press(&mut self, index: usize, settings: PressSettings) -> CoreResult<()> {
        let len = self.presses.len();
        self.presses
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange {
                entity: "press",
                index,
                len,
            })?
            .apply_settings(settings)
    }

    /// Removes the press at `index`; later presses shift down by one.
    pub fn remove_press(&mut self, index: usize) -> Option<PrintingPress> {
        (index < self.presses.len()).then(|| self.presses.remove(index))
    }
}

// =============================================================================
// Stored Shape
// =============================================================================

#[derive(Serialize, Deserialize)]
struct HouseRecord {
    settings: HouseSettings,
    #[serde(default)]
    employees: Vec<Employee>,
    #[serde(default)]
    presses: Vec<PrintingPress>,
}

impl From<PrintHouse> for HouseRecord {
    fn from(house: PrintHouse) -> Self {
        HouseRecord {
            settings: house.settings,
            employees: house.employees,
            presses: house.presses,
        }
    }
}

impl TryFrom<HouseRecord> for PrintHouse {
    type Error = CoreError;

    fn try_from(record: HouseRecord) -> Result<Self, Self::Error> {
        let mut house = PrintHouse::new(record.settings)?;
        for employee in record.employees {
            house.add_employee(employee)?;
        }
        house.presses = record.presses;
        Ok(house)
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A house with the given tier growth and bulk discount, nothing else set.
    pub fn house_with(paper_pct: u32, discount_threshold: u32, discount_pct: u32) -> PrintHouse {
        PrintHouse::new(HouseSettings {
            paper_cost_increment: Percentage::from_whole(paper_pct),
            discount_threshold,
            discount: Percentage::from_whole(discount_pct),
            ..HouseSettings::default()
        })
        .unwrap()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
