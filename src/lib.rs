#![doc(test(attr(deny(warnings))))]

//! Budget Forecast projects a household's monthly cash balance from ledger
//! history and planned entries, and fits the monthly income/expense levels
//! that keep the balance above a configured floor.

pub mod cli;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod report;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Forecast tracing initialized.");
    });
}
