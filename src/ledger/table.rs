use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;

use crate::config::{Config, Grouped};

use super::transaction::{Transaction, TransactionKind};

/// Tag sets a [`Table`] needs, captured from the configuration once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRules {
    pub hidden: Grouped<BTreeSet<String>>,
    pub ignored: Grouped<BTreeSet<String>>,
    pub savings: Grouped<BTreeSet<String>>,
}

impl TagRules {
    pub fn from_config(config: &Config) -> Self {
        let mut rules = TagRules::default();
        for kind in TransactionKind::ALL {
            *rules.hidden.get_mut(kind) = config.hidden_tags(kind);
            *rules.ignored.get_mut(kind) = config.ignored_tags(kind);
            *rules.savings.get_mut(kind) = config.savings_tags(kind);
        }
        rules
    }

    pub fn is_hidden(&self, transaction: &Transaction) -> bool {
        transaction.has_any_tag(self.hidden.get(transaction.kind))
    }

    /// Whether the transaction should stay out of historical averages.
    pub fn is_excluded_from_history(&self, transaction: &Transaction) -> bool {
        transaction.has_any_tag(self.ignored.get(transaction.kind))
            || transaction.has_any_tag(self.savings.get(transaction.kind))
    }
}

/// Date-ranged collection of visible ledger transactions.
#[derive(Debug, Clone, Default)]
pub struct Table {
    transactions: Vec<Transaction>,
    start: Option<NaiveDate>,
    stop: Option<NaiveDate>,
    rules: TagRules,
}

impl Table {
    pub fn new(config: &Config) -> Self {
        Self::with_rules(TagRules::from_config(config))
    }

    pub fn with_rules(rules: TagRules) -> Self {
        Self {
            transactions: Vec::new(),
            start: None,
            stop: None,
            rules,
        }
    }

    /// Appends a transaction unless it carries a hidden tag for its kind.
    /// Returns whether the transaction was kept.
    pub fn append(&mut self, transaction: Transaction) -> bool {
        if self.rules.is_hidden(&transaction) {
            tracing::trace!(%transaction, "dropping hidden transaction");
            return false;
        }
        let date = transaction.date;
        self.start = Some(self.start.map_or(date, |start| start.min(date)));
        self.stop = Some(self.stop.map_or(date, |stop| stop.max(date)));
        self.transactions.push(transaction);
        true
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn stop(&self) -> Option<NaiveDate> {
        self.stop
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter()
    }

    /// Transactions dated within `[from, till)`; either bound may be open.
    pub fn filtered(
        &self,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(move |txn| in_range(txn.date, from, till))
    }

    pub fn filtered_values(
        &self,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    ) -> impl Iterator<Item = f64> + '_ {
        self.filtered(from, till).map(Transaction::signed_value)
    }

    /// Like [`Table::filtered`], without ignored and savings transactions.
    pub fn filtered_no_ignored(
        &self,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        self.filtered(from, till)
            .filter(move |txn| !self.rules.is_excluded_from_history(txn))
    }

    pub fn filtered_no_ignored_values(
        &self,
        from: Option<NaiveDate>,
        till: Option<NaiveDate>,
    ) -> impl Iterator<Item = f64> + '_ {
        self.filtered_no_ignored(from, till)
            .map(Transaction::signed_value)
    }

    pub fn income(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.of_kind(TransactionKind::Income)
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.of_kind(TransactionKind::Expense)
    }

    fn of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |txn| txn.kind == kind)
    }
}

impl Extend<Transaction> for Table {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for transaction in iter {
            self.append(transaction);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self
            .start
            .map_or_else(|| "-Inf".to_string(), |d| d.to_string());
        let stop = self
            .stop
            .map_or_else(|| "+Inf".to_string(), |d| d.to_string());
        write!(f, "Table(start={start}, stop={stop}, rows={})", self.len())
    }
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, till: Option<NaiveDate>) -> bool {
    from.map_or(true, |from| date >= from) && till.map_or(true, |till| date < till)
}
