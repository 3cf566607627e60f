//! Command-line surface: argument parsing and operation dispatch.

pub mod output;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::config::Config;
use crate::errors::{LedgerError, Result};
use crate::ledger::{AccountFilter, Book};
use crate::loader;
use crate::utils::build_info;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// List the chart of accounts.
    Coa,
    /// Postings and running balance of one account.
    Ledger,
    /// Balances of every account matching a pattern.
    Summary,
    /// Daily combined balance of the accounts matching a pattern.
    Series,
    /// Statement-style CSV of one account.
    Reconstruct,
}

impl Operation {
    pub fn needs_account(self) -> bool {
        !matches!(self, Operation::Coa)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "luca",
    version = build_info::CLI_VERSION,
    long_version = build_info::LONG_VERSION,
    about = "Double-entry bookkeeping over a directory of CSV files"
)]
pub struct Cli {
    /// Directory containing the CSV files.
    #[arg(long = "csv-dir", env = "LUCA_CSV_DIR")]
    pub csv_dir: Option<PathBuf>,

    /// Operation to perform.
    #[arg(long, value_enum)]
    pub operation: Operation,

    /// Account to operate on; a full-match regular expression for summary and series.
    #[arg(long)]
    pub account: Option<String>,
}

/// Loads the book named by `cli` and `config`, then runs the operation.
pub fn run(cli: Cli, config: &Config) -> Result<String> {
    let csv_dir = config.resolve_csv_dir(cli.csv_dir)?;
    let account = cli.account.filter(|account| !account.is_empty());
    if cli.operation.needs_account() && account.is_none() {
        return Err(LedgerError::Usage(
            "Account not set (--account flag)".into(),
        ));
    }

    let book = loader::load_dir(&csv_dir)?;
    if book.accounts().is_empty() {
        return Err(LedgerError::Usage("loaded 0 accounts".into()));
    }

    info!(operation = ?cli.operation, dir = %csv_dir.display(), "running operation");
    execute(&book, cli.operation, account.as_deref())
}

/// Runs one operation against a built book and renders its result.
pub fn execute(book: &Book, operation: Operation, account: Option<&str>) -> Result<String> {
    let account = account.unwrap_or_default();
    match operation {
        Operation::Coa => output::to_json(&book.accounts()),
        Operation::Ledger => output::to_json(&book.account_ledger(account)),
        Operation::Summary => {
            let filter = AccountFilter::new(account)?;
            output::to_json(&book.summarise_accounts(&filter))
        }
        Operation::Series => {
            let filter = AccountFilter::new(account)?;
            output::to_json(&book.series(&filter))
        }
        Operation::Reconstruct => output::to_csv(&book.reconstruct(account)),
    }
}
