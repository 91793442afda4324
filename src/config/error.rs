use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid planned {group} date `{date}`: expected YYYY-MM-DD")]
    InvalidPlanDate { group: String, date: String },

    #[error("Invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Unknown exception mode `{0}`")]
    UnknownExceptionMode(String),
}
