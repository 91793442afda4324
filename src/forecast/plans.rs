//! Per-month aggregation of planned entries.

use std::collections::BTreeSet;

use crate::{
    config::{Config, ConfigError},
    ledger::TransactionKind,
};

use super::month::MonthArray;

/// Planned entries falling into one calendar month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedMonth {
    pub income: f64,
    /// Magnitude of planned expenses.
    pub expenses: f64,
    pub income_tags: BTreeSet<String>,
    pub expense_tags: BTreeSet<String>,
}

impl PlannedMonth {
    pub fn delta(&self) -> f64 {
        self.income - self.expenses
    }

    /// Income tags prefixed `+`, then expense tags prefixed `-`.
    pub fn description(&self) -> String {
        let income = self.income_tags.iter().map(|tag| format!("+{tag}"));
        let expenses = self.expense_tags.iter().map(|tag| format!("-{tag}"));
        income.chain(expenses).collect::<Vec<_>>().join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.income_tags.is_empty()
            && self.expense_tags.is_empty()
            && self.income == 0.0
            && self.expenses == 0.0
    }
}

/// Groups `plans.income` and `plans.expenses` by the month of their date.
pub fn planned_months(config: &Config) -> Result<MonthArray<PlannedMonth>, ConfigError> {
    let mut months: MonthArray<PlannedMonth> = MonthArray::default();
    for kind in TransactionKind::ALL {
        for entry in config.plans.get(kind) {
            let slot = &mut months[entry.month(kind)?];
            match kind {
                TransactionKind::Income => {
                    slot.income += entry.value;
                    slot.income_tags.extend(entry.tags.iter().cloned());
                }
                // Expense plans may be written with either sign.
                TransactionKind::Expense => {
                    slot.expenses += entry.value.abs();
                    slot.expense_tags.extend(entry.tags.iter().cloned());
                }
            }
        }
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannedEntry;

    #[test]
    fn entries_in_the_same_month_accumulate() {
        let mut config = Config::default();
        config.plans.income = vec![
            PlannedEntry::new(["bonus"], 1000.0, "2024-12-01"),
            PlannedEntry::new(["gift"], 200.0, "2019-12-24"),
        ];
        config.plans.expenses = vec![PlannedEntry::new(["presents"], 300.0, "2024-12-10")];

        let months = planned_months(&config).unwrap();
        let december = &months[12];
        assert_eq!(december.delta(), 900.0);
        assert_eq!(december.description(), "+bonus, +gift, -presents");
        assert!(months[11].is_empty());
    }

    #[test]
    fn malformed_dates_are_errors() {
        let mut config = Config::default();
        config.plans.expenses = vec![PlannedEntry::new(["rent"], 800.0, "March")];
        assert!(matches!(
            planned_months(&config),
            Err(ConfigError::InvalidPlanDate { .. })
        ));
    }
}
