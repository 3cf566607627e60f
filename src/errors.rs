use chrono::NaiveDate;
use thiserror::Error;

use crate::currency::Amount;

/// Error type covering record validation, loading and query failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown account {account}")]
    UnknownAccount { account: String },
    #[error("negative amount")]
    NegativeAmount,
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    #[error("amount overflow: adding {amount} exceeds the book's total turnover limit")]
    AmountOverflow { amount: Amount },
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid account pattern: {0}")]
    InvalidPattern(String),
    #[error("missing header in {file}")]
    MissingHeader { file: String },
    #[error("unknown header in {file}: {header:?}")]
    UnknownHeader { file: String, header: Vec<String> },
    #[error("malformed record at {file}:{line}: {reason}")]
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },
    #[error("decreasing dates: {previous} and {current} in file {file}")]
    DecreasingDates {
        file: String,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
