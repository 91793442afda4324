use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use crate::errors::{ForecastError, Result};

/// Distinguishes money coming in from money going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Name of the configuration group holding rules for this kind.
    pub fn group_name(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expenses",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A single ledger entry. `amount` is always a non-negative magnitude; the
/// sign comes from `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub tags: BTreeSet<String>,
    amount: f64,
    pub currency: Option<String>,
    pub description: Option<String>,
}

impl Transaction {
    pub fn new<I, S>(kind: TransactionKind, date: NaiveDate, tags: I, amount: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ForecastError::InvalidAmount(amount));
        }
        Ok(Self {
            kind,
            date,
            tags: tags.into_iter().map(Into::into).collect(),
            amount,
            currency: None,
            description: None,
        })
    }

    pub fn income<I, S>(date: NaiveDate, tags: I, amount: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TransactionKind::Income, date, tags, amount)
    }

    pub fn expense<I, S>(date: NaiveDate, tags: I, amount: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TransactionKind::Expense, date, tags, amount)
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Positive for income, negative for expenses.
    pub fn signed_value(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        write!(
            f,
            "{}: {} ({:.2})",
            self.kind,
            tags.join(", "),
            self.signed_value()
        )
    }
}
