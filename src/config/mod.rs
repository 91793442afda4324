//! Forecast configuration: exception rules, savings tags, planned entries and
//! fitting parameters, plus loading helpers for JSON documents.

pub mod error;
pub mod loader;
pub mod model;

pub use error::ConfigError;
pub use loader::{load, ArgOverrides};
pub use model::{Config, ExceptionMode, ExceptionRule, Grouped, PlannedEntry, PLAN_DATE_FORMAT};
