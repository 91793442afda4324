use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;

/// Error type that captures forecasting and ledger ingestion failures.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Invalid ledger row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("Invalid month {month} in year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Insufficient history to predict {year}-{month:02}: no earlier month has data")]
    InsufficientHistory { year: i32, month: u32 },
}

pub type Result<T> = StdResult<T, ForecastError>;
