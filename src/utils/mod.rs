use std::sync::Once;

use chrono::{Datelike, Months, NaiveDate};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, logging to stderr.
/// `RUST_LOG` takes precedence over the `budget_forecast=info` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("budget_forecast=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// First day of the month `n` months before the month of `date`.
pub fn months_before(date: NaiveDate, n: u32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_before_crosses_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            months_before(today, 5),
            NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()
        );
        assert_eq!(
            months_before(today, 0),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }
}
