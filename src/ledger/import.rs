//! Builds ledger transactions from tabular records (CSV exports).

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;

use crate::errors::{ForecastError, Result};

use super::{
    table::Table,
    transaction::{Transaction, TransactionKind},
};

pub const FIELD_DATE: &str = "Date";
pub const FIELD_ENTRY: &str = "Entry (tags)";
pub const FIELD_EXPENSE: &str = "Expense amount";
pub const FIELD_INCOME: &str = "Income amount";
pub const FIELD_CURRENCY: &str = "Currency";
pub const FIELD_DESCRIPTION: &str = "Description";

const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions resolved from a header record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    date: usize,
    entry: usize,
    expense: usize,
    income: usize,
    currency: Option<usize>,
    description: Option<usize>,
}

impl RowLayout {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let position = |name: &str| header.iter().position(|h| h.as_ref().trim() == name);
        let required = |name: &'static str| {
            position(name).ok_or_else(|| ForecastError::InvalidRow {
                line: 1,
                reason: format!("missing `{name}` column"),
            })
        };
        Ok(Self {
            date: required(FIELD_DATE)?,
            entry: required(FIELD_ENTRY)?,
            expense: required(FIELD_EXPENSE)?,
            income: required(FIELD_INCOME)?,
            currency: position(FIELD_CURRENCY),
            description: position(FIELD_DESCRIPTION),
        })
    }

    /// Converts one record into a transaction. The kind is decided by which
    /// amount column is filled; rows with neither amount yield `None`.
    pub fn parse_row<S: AsRef<str>>(&self, row: &[S], line: usize) -> Result<Option<Transaction>> {
        let cell = |idx: usize| row.get(idx).map(|c| c.as_ref().trim()).unwrap_or("");
        let invalid = |reason: String| ForecastError::InvalidRow { line, reason };

        let (kind, raw_amount) = match (cell(self.income), cell(self.expense)) {
            ("", "") => return Ok(None),
            ("", expense) => (TransactionKind::Expense, expense),
            (income, "") => (TransactionKind::Income, income),
            _ => return Err(invalid("both income and expense amounts are set".into())),
        };

        let date = NaiveDate::parse_from_str(cell(self.date), ROW_DATE_FORMAT)
            .map_err(|err| invalid(format!("bad date `{}`: {err}", cell(self.date))))?;
        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| invalid(format!("bad amount `{raw_amount}`")))?;
        let tags = cell(self.entry)
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty());

        let mut transaction = Transaction::new(kind, date, tags, amount)
            .map_err(|err| invalid(err.to_string()))?;
        if let Some(currency) = self.currency.map(cell).filter(|c| !c.is_empty()) {
            transaction = transaction.with_currency(currency);
        }
        if let Some(description) = self.description.map(cell).filter(|d| !d.is_empty()) {
            transaction = transaction.with_description(description);
        }
        Ok(Some(transaction))
    }
}

impl Table {
    /// Parses and appends a record; returns whether a transaction was kept.
    pub fn add_row<S: AsRef<str>>(
        &mut self,
        layout: &RowLayout,
        row: &[S],
        line: usize,
    ) -> Result<bool> {
        match layout.parse_row(row, line)? {
            Some(transaction) => Ok(self.append(transaction)),
            None => {
                tracing::warn!(line, "skipping ledger row without an amount");
                Ok(false)
            }
        }
    }
}

/// Reads CSV records with a header row into `table`, returning the number
/// of transactions kept.
pub fn read_csv<R: Read>(reader: R, table: &mut Table) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let layout = RowLayout::from_header(&header)?;

    let mut kept = 0;
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row: Vec<&str> = record.iter().collect();
        if table.add_row(&layout, &row, idx + 2)? {
            kept += 1;
        }
    }
    tracing::debug!(kept, total = table.len(), "ledger records imported");
    Ok(kept)
}

pub fn load_csv(path: &Path, table: &mut Table) -> Result<usize> {
    let file = File::open(path)?;
    read_csv(file, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ExceptionMode, ExceptionRule};

    const HEADER: [&str; 6] = [
        FIELD_DATE,
        FIELD_ENTRY,
        FIELD_EXPENSE,
        FIELD_INCOME,
        FIELD_CURRENCY,
        FIELD_DESCRIPTION,
    ];

    #[test]
    fn empty_income_column_means_expense() {
        let layout = RowLayout::from_header(&HEADER).unwrap();
        let txn = layout
            .parse_row(&["2024-01-03", "food, groceries", "42.5", "", "EUR", "market"], 2)
            .unwrap()
            .expect("row yields a transaction");
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.signed_value(), -42.5);
        assert_eq!(txn.tags.len(), 2);
        assert_eq!(txn.currency.as_deref(), Some("EUR"));
        assert_eq!(txn.description.as_deref(), Some("market"));
    }

    #[test]
    fn empty_expense_column_means_income() {
        let layout = RowLayout::from_header(&HEADER).unwrap();
        let txn = layout
            .parse_row(&["2024-01-25", "salary", "", "3000", "", ""], 2)
            .unwrap()
            .expect("row yields a transaction");
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.signed_value(), 3000.0);
        assert_eq!(txn.currency, None);
    }

    #[test]
    fn rows_with_both_amounts_are_rejected() {
        let layout = RowLayout::from_header(&HEADER).unwrap();
        let err = layout
            .parse_row(&["2024-01-25", "salary", "1", "2", "", ""], 7)
            .expect_err("ambiguous row");
        assert!(matches!(err, ForecastError::InvalidRow { line: 7, .. }));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = RowLayout::from_header(&[FIELD_DATE, FIELD_ENTRY]).expect_err("incomplete");
        assert!(err.to_string().contains(FIELD_EXPENSE));
    }

    #[test]
    fn read_csv_applies_hidden_rules() {
        let mut config = Config::default();
        config.exceptions.expenses = vec![ExceptionRule::new("car", Some(ExceptionMode::Hide))];
        let mut table = Table::new(&config);

        let data = "\
Date,Entry (tags),Expense amount,Income amount
2024-01-02,car,300,
2024-01-03,\"food, market\",25,
2024-01-28,salary,,2100
2024-02-01,note,,
";
        let kept = read_csv(data.as_bytes(), &mut table).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(table.filtered_values(None, None).sum::<f64>(), 2075.0);
    }
}
