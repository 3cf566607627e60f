//! Double-entry book: chart of accounts, transaction records, amortisation
//! expansion and the read-only queries derived from them.

mod amortization;
pub mod book;
pub mod calendar;
pub mod query;
pub mod record;
pub mod transaction;

pub use book::Book;
pub use calendar::{parse_date, DateRange, DATE_FORMAT};
pub use query::{
    AccountFilter, AccountLedgerEntry, AccountSummary, ReconstructRow, Series, SeriesEntry,
};
pub use record::{AccountRecord, AmortizationRecord, Record, TransactionRecord};
pub use transaction::{AccountPair, AmortizedTransaction, Posting, Transaction};
