//! Projection and fitting engine.
//!
//! A [`Forecaster`] borrows an immutable [`Config`] and [`Table`] snapshot;
//! every call is a pure function of those plus its arguments.

pub mod fitting;
pub mod month;
pub mod plans;
pub mod projection;

use chrono::{Datelike, NaiveDate, Utc};

use crate::{
    config::Config,
    errors::{ForecastError, Result},
    ledger::Table,
};

pub use fitting::{Correction, FitReport, FittedBudget};
pub use month::{MonthArray, MONTHS};
pub use plans::{planned_months, PlannedMonth};
pub use projection::{MonthProjection, Prediction, YearProjection};

#[derive(Debug, Clone, Copy)]
pub struct Forecaster<'a> {
    config: &'a Config,
    table: &'a Table,
    reference_date: NaiveDate,
}

impl<'a> Forecaster<'a> {
    pub fn new(config: &'a Config, table: &'a Table) -> Self {
        Self {
            config,
            table,
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Fixes "today" for lookback windows expressed in months ago.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Signed values dated on or after January 1 of `year`, per calendar
    /// month. Later years fold into the same month slots.
    pub(crate) fn realized_months(&self, year: i32) -> Result<MonthArray<Vec<f64>>> {
        let from = first_of_month(year, 1)?;
        let mut months: MonthArray<Vec<f64>> = MonthArray::default();
        for txn in self.table.filtered(Some(from), None) {
            months[txn.date.month()].push(txn.signed_value());
        }
        Ok(months)
    }
}

pub(crate) fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ForecastError::InvalidMonth { year, month })
}
