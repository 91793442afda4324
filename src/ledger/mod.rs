//! Ledger transactions, the filtered transaction table, and CSV ingestion.

pub mod import;
pub mod table;
pub mod transaction;

pub use import::{load_csv, read_csv, RowLayout};
pub use table::{TagRules, Table};
pub use transaction::{Transaction, TransactionKind};
