//! # Report Command
//!
//! The financial summary of a print house: what printing cost, what it sold
//! for, what the staff are paid and what is left.
//!
//! ```text
//!   print cost      Σ unit_cost × copies
//!   revenue         Σ price × copies (bulk discount above threshold)
//!   employee cost   Σ salary (raise once revenue ≥ target)
//!   ─────────────
//!   profit          revenue − print cost − employee cost
//! ```

use std::fmt::Write as _;

use printhouse_core::{payroll_breakdown, FinancialSummary, PayrollLine, PrintHouse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::{ConsoleConfig, Registry};

/// JSON shape of `report --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub house: String,
    pub summary: FinancialSummary,
    pub payroll: Vec<PayrollLine>,
}

impl Report {
    pub fn for_house(name: &str, house: &PrintHouse) -> Result<Self, AppError> {
        Ok(Report {
            house: name.to_string(),
            summary: FinancialSummary::for_house(house)?,
            payroll: payroll_breakdown(house)?,
        })
    }

    pub fn render(&self, config: &ConsoleConfig) -> String {
        let money = |m| config.format_money(m);
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.house);
        let _ = writeln!(out, "  print cost      {:>14}", money(self.summary.print_cost));
        let _ = writeln!(out, "  revenue         {:>14}", money(self.summary.revenue));
        let _ = writeln!(out, "  employee cost   {:>14}", money(self.summary.employee_cost));
        let _ = writeln!(
            out,
            "  {:<15} {:>14}",
            if self.summary.is_loss() { "loss" } else { "profit" },
            money(self.summary.profit)
        );

        if !self.payroll.is_empty() {
            let _ = writeln!(out, "  payroll:");
            for line in &self.payroll {
                let _ = writeln!(
                    out,
                    "    {}  {:<8} {:>12}{}",
                    line.employee_id,
                    line.role.as_str(),
                    money(line.cost),
                    if line.incremented { "  (raised)" } else { "" }
                );
            }
        }
        out.trim_end().to_string()
    }
}

pub async fn run(
    registry: Registry<'_>,
    config: &ConsoleConfig,
    key: &str,
    json: bool,
) -> Result<String, AppError> {
    let stored = registry.find_house(key).await?;
    let report = Report::for_house(&stored.name, &stored.house)?;

    if json {
        serde_json::to_string_pretty(&report).map_err(|e| AppError::internal(e.to_string()))
    } else {
        Ok(report.render(config))
    }
}
