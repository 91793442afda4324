use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::{
    errors::{ForecastError, Result},
    ledger::Transaction,
    utils::months_before,
};

use super::{
    first_of_month,
    month::{MonthArray, MONTHS},
    plans::{planned_months, PlannedMonth},
    Forecaster,
};

/// Predicted totals for a month without realized transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub total: f64,
    pub income: f64,
    /// Negative (or zero) sum of expenses.
    pub expenses: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthProjection {
    pub month: u32,
    /// Signed values of the month's transactions; empty when predicted.
    pub realized: Vec<f64>,
    pub prediction: Option<Prediction>,
    pub total: f64,
    pub income: f64,
    pub expenses: f64,
    pub planned: PlannedMonth,
    /// Running balance at the end of the month, planned entries included.
    pub balance: f64,
}

impl MonthProjection {
    pub fn is_realized(&self) -> bool {
        !self.realized.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearProjection {
    pub year: i32,
    pub months: MonthArray<MonthProjection>,
}

impl YearProjection {
    pub fn realized(&self) -> BTreeMap<u32, Vec<f64>> {
        self.months
            .iter()
            .filter(|(_, month)| month.is_realized())
            .map(|(m, month)| (m, month.realized.clone()))
            .collect()
    }

    pub fn predicted(&self) -> BTreeMap<u32, Prediction> {
        self.months
            .iter()
            .filter_map(|(m, month)| month.prediction.map(|p| (m, p)))
            .collect()
    }

    pub fn final_balance(&self) -> f64 {
        self.months[12].balance
    }
}

/// Sums of historical values keyed by calendar month; the same month of
/// different years shares one bucket.
#[derive(Debug, Default)]
struct History {
    months: BTreeMap<u32, MonthSums>,
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthSums {
    total: f64,
    income: f64,
    expenses: f64,
}

impl History {
    fn collect<'t>(transactions: impl Iterator<Item = &'t Transaction>) -> Self {
        let mut history = History::default();
        for txn in transactions {
            let value = txn.signed_value();
            let sums = history.months.entry(txn.date.month()).or_default();
            sums.total += value;
            if value > 0.0 {
                sums.income += value;
            } else if value < 0.0 {
                sums.expenses += value;
            }
        }
        history
    }

    fn mean(&self, pick: impl Fn(&MonthSums) -> f64) -> Option<f64> {
        if self.months.is_empty() {
            return None;
        }
        let sum: f64 = self.months.values().map(pick).sum();
        Some(sum / self.months.len() as f64)
    }
}

impl Forecaster<'_> {
    /// Projects the running balance of `year`.
    ///
    /// Months with transactions use their real totals. Other months are
    /// predicted from the visible, non-ignored history starting at the first
    /// day of the month `months_ago` months before the reference date (or
    /// January 1 of `year` when absent or zero). `income` / `expenses`
    /// replace the corresponding historical means; when absent they fall back
    /// to the configured values.
    pub fn project_year(
        &self,
        year: i32,
        months_ago: Option<u32>,
        income: Option<f64>,
        expenses: Option<f64>,
    ) -> Result<YearProjection> {
        let lookback = match months_ago.filter(|n| *n > 0) {
            Some(n) => months_before(self.reference_date, n),
            None => first_of_month(year, 1)?,
        };
        let income = income.or(self.config.income);
        let expenses = expenses.or(self.config.expenses);
        let realized = self.realized_months(year)?;
        let planned = planned_months(self.config)?;

        let mut balance = 0.0;
        let mut months: MonthArray<MonthProjection> = MonthArray::default();
        for month in MONTHS {
            let values = &realized[month];
            let mut projection = MonthProjection {
                month,
                realized: values.clone(),
                planned: planned[month].clone(),
                ..MonthProjection::default()
            };
            if values.is_empty() {
                let prediction = self.predict(year, month, lookback, income, expenses)?;
                projection.total = prediction.total;
                projection.income = prediction.income;
                projection.expenses = prediction.expenses;
                projection.prediction = Some(prediction);
            } else {
                projection.total = values.iter().sum();
                projection.income = values.iter().filter(|v| **v > 0.0).sum();
                projection.expenses = values.iter().filter(|v| **v < 0.0).sum();
            }
            balance += projection.total + projection.planned.delta();
            projection.balance = balance;
            tracing::debug!(
                year,
                month,
                realized = projection.is_realized(),
                total = projection.total,
                balance,
                "projected month"
            );
            months[month] = projection;
        }

        tracing::info!(year, balance, "year projection complete");
        Ok(YearProjection { year, months })
    }

    fn predict(
        &self,
        year: i32,
        month: u32,
        lookback: NaiveDate,
        income: Option<f64>,
        expenses: Option<f64>,
    ) -> Result<Prediction> {
        let insufficient = || ForecastError::InsufficientHistory { year, month };
        let till = first_of_month(year, month)?;
        let history =
            || History::collect(self.table.filtered_no_ignored(Some(lookback), Some(till)));

        let (income, expenses, total) = match (income, expenses) {
            (Some(income), Some(expenses)) => (income, expenses, income + expenses),
            (Some(income), None) => {
                let expenses = history().mean(|s| s.expenses).ok_or_else(insufficient)?;
                (income, expenses, income + expenses)
            }
            (None, Some(expenses)) => {
                let income = history().mean(|s| s.income).ok_or_else(insufficient)?;
                (income, expenses, income + expenses)
            }
            (None, None) => {
                let history = history();
                (
                    history.mean(|s| s.income).ok_or_else(insufficient)?,
                    history.mean(|s| s.expenses).ok_or_else(insufficient)?,
                    history.mean(|s| s.total).ok_or_else(insufficient)?,
                )
            }
        };
        Ok(Prediction {
            total,
            income,
            expenses,
        })
    }
}
