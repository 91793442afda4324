#![allow(dead_code)]

use budget_forecast::{
    config::Config,
    ledger::{Table, Transaction},
};
use chrono::NaiveDate;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn income(date: NaiveDate, tag: &str, amount: f64) -> Transaction {
    Transaction::income(date, [tag], amount).expect("valid income")
}

pub fn expense(date: NaiveDate, tag: &str, amount: f64) -> Transaction {
    Transaction::expense(date, [tag], amount).expect("valid expense")
}

/// Builds a table honoring the config's hidden tags.
pub fn table_with(config: &Config, transactions: impl IntoIterator<Item = Transaction>) -> Table {
    let mut table = Table::new(config);
    table.extend(transactions);
    table
}

/// Salary and rent that cancel out in each of the first three months.
pub fn balanced_quarter(year: i32) -> Vec<Transaction> {
    (1..=3)
        .flat_map(|month| {
            [
                income(day(year, month, 1), "salary", 500.0),
                expense(day(year, month, 2), "rent", 500.0),
            ]
        })
        .collect()
}
