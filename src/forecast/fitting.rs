//! Greedy search for monthly income/expense levels that keep the running
//! balance above the configured floor.

use crate::errors::Result;

use super::{month::MONTHS, plans::planned_months, Forecaster};

/// Backstop against factors that never move the search.
pub const MAX_CORRECTIONS_PER_MONTH: usize = 1_000;

/// Income and expenses every predicted month would need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedBudget {
    pub income: f64,
    pub expenses: f64,
}

/// One iteration of the correction loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub month: u32,
    pub overall_before: f64,
    pub overall_after: f64,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub year: i32,
    /// `None` when the bounds cannot keep the balance above the floor.
    pub outcome: Option<FittedBudget>,
    pub corrections: Vec<Correction>,
}

#[derive(Debug, Clone, Copy)]
struct FitParameters {
    min_balance: f64,
    max_income: f64,
    min_expenses: f64,
    income_factor: f64,
    expenses_factor: f64,
}

impl Forecaster<'_> {
    /// Returns the fitted income/expenses pair, or `None` when infeasible.
    pub fn fit_year(&self, year: i32) -> Result<Option<FittedBudget>> {
        Ok(self.fit_year_report(year)?.outcome)
    }

    /// Scans the months of `year` in order, starting from the configured
    /// income and expenses. Whenever the cumulative balance would drop below
    /// `min_balance`, income is raised (up to `max_income`) and expenses are
    /// moved toward `min_expenses` in proportion to the gap, and the change
    /// is credited back to the predicted months already scanned. Months are
    /// never revisited.
    pub fn fit_year_report(&self, year: i32) -> Result<FitReport> {
        let params = FitParameters {
            min_balance: self.config.min_balance,
            max_income: self.config.max_income(),
            min_expenses: self.config.min_expenses(),
            income_factor: self.config.income_factor,
            expenses_factor: self.config.expenses_factor,
        };
        let planned = planned_months(self.config)?;
        let realized = self.realized_months(year)?;

        let mut income = self.config.income.unwrap_or(0.0);
        let mut expenses = self.config.expenses.unwrap_or(0.0);
        let mut overall = 0.0;
        let mut last_real_month = 0u32;
        let mut corrections = Vec::new();
        let infeasible = |corrections| FitReport {
            year,
            outcome: None,
            corrections,
        };

        for month in MONTHS {
            overall += planned[month].delta();
            let values = &realized[month];
            let mut budget = if values.is_empty() {
                income + expenses
            } else {
                last_real_month = month;
                values.iter().sum()
            };

            let mut attempts = 0;
            while overall + budget < params.min_balance {
                if expenses == params.min_expenses && income == params.max_income {
                    tracing::warn!(year, month, income, expenses, "fit bounds exhausted");
                    return Ok(infeasible(corrections));
                }

                let goal = overall - params.min_balance;
                let new_income =
                    (income + (params.income_factor * goal).abs()).min(params.max_income);
                let new_expenses = params
                    .min_expenses
                    .min(expenses + (params.expenses_factor * goal).abs());
                if (new_income == income && new_expenses == expenses)
                    || attempts == MAX_CORRECTIONS_PER_MONTH
                {
                    tracing::warn!(year, month, income, expenses, goal, "fit stalled");
                    return Ok(infeasible(corrections));
                }
                attempts += 1;

                let overall_before = overall;
                let elapsed = f64::from(month - last_real_month);
                overall += (new_income - income) * elapsed;
                overall += (expenses.abs() - new_expenses.abs()) * (elapsed - 1.0);
                income = new_income;
                expenses = new_expenses;
                budget = income + expenses;

                tracing::debug!(year, month, income, expenses, overall, "fit correction");
                corrections.push(Correction {
                    month,
                    overall_before,
                    overall_after: overall,
                    income,
                    expenses,
                });
            }
            overall += budget;
        }

        tracing::info!(year, income, expenses, corrections = corrections.len(), "fit complete");
        Ok(FitReport {
            year,
            outcome: Some(FittedBudget { income, expenses }),
            corrections,
        })
    }
}
