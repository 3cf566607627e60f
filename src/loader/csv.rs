use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::errors::{LedgerError, Result};
use crate::ledger::{AccountRecord, AmortizationRecord, Book, Record, TransactionRecord};

const ACCOUNTS_HEADER: &[&str] = &["Account"];
const TRANSACTIONS_HEADER: &[&str] = &["Date", "DR", "CR", "Amount", "Description"];
const TRANSACTIONS_WITH_ID_HEADER: &[&str] = &["ID", "Date", "DR", "CR", "Amount", "Description"];
const AMORTIZATIONS_HEADER: &[&str] = &[
    "TxnDate",
    "StartDate",
    "EndDate",
    "SingleDR",
    "SingleCR",
    "RepeatDR",
    "RepeatCR",
    "Amount",
    "Description",
];

/// The header layouts a CSV file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Accounts,
    Transactions,
    TransactionsWithId,
    Amortizations,
}

impl Dialect {
    /// Matches a trimmed header row exactly.
    pub fn detect(header: &StringRecord) -> Option<Self> {
        let fields: Vec<&str> = header.iter().collect();
        [
            Dialect::Accounts,
            Dialect::Transactions,
            Dialect::TransactionsWithId,
            Dialect::Amortizations,
        ]
        .into_iter()
        .find(|dialect| dialect.header() == fields.as_slice())
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Dialect::Accounts => ACCOUNTS_HEADER,
            Dialect::Transactions => TRANSACTIONS_HEADER,
            Dialect::TransactionsWithId => TRANSACTIONS_WITH_ID_HEADER,
            Dialect::Amortizations => AMORTIZATIONS_HEADER,
        }
    }
}

#[derive(Debug, Clone)]
struct FileGroup {
    file: String,
    records: Vec<Record>,
}

/// Accumulates classified records from any number of CSV files, then builds
/// a [`Book`] from them in one pass.
#[derive(Debug, Default)]
pub struct CsvLoader {
    accounts: Vec<AccountRecord>,
    transactions: Vec<FileGroup>,
    amortizations: Vec<FileGroup>,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one CSV source, classifying it by its header row.
    pub fn load_csv<R: Read>(&mut self, reader: R, file: &str) -> Result<Dialect> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut rows = rdr.records();

        let header = match rows.next() {
            Some(row) => row?,
            None => {
                return Err(LedgerError::MissingHeader {
                    file: file.to_string(),
                })
            }
        };
        let dialect = Dialect::detect(&header).ok_or_else(|| LedgerError::UnknownHeader {
            file: file.to_string(),
            header: header.iter().map(str::to_string).collect(),
        })?;

        let width = dialect.header().len();
        let mut body = Vec::new();
        for row in rows {
            let row = row?;
            if row.len() != width {
                return Err(LedgerError::MalformedRecord {
                    file: file.to_string(),
                    line: row.position().map_or(0, |pos| pos.line()),
                    reason: format!("expected {} fields, found {}", width, row.len()),
                });
            }
            body.push(row);
        }
        debug!(file, ?dialect, rows = body.len(), "loaded csv");

        let group = |records: Vec<Record>| FileGroup {
            file: file.to_string(),
            records,
        };
        match dialect {
            Dialect::Accounts => {
                self.accounts.extend(body.iter().map(|row| AccountRecord {
                    name: row[0].to_string(),
                }));
            }
            Dialect::Transactions | Dialect::TransactionsWithId => {
                let offset = usize::from(dialect == Dialect::TransactionsWithId);
                let records = body
                    .iter()
                    .map(|row| {
                        Record::Transaction(TransactionRecord {
                            id: (offset == 1).then(|| row[0].to_string()),
                            date: row[offset].to_string(),
                            debit: row[offset + 1].to_string(),
                            credit: row[offset + 2].to_string(),
                            amount: row[offset + 3].to_string(),
                            description: row[offset + 4].to_string(),
                        })
                    })
                    .collect();
                self.transactions.push(group(records));
            }
            Dialect::Amortizations => {
                let records = body
                    .iter()
                    .map(|row| {
                        Record::Amortization(AmortizationRecord {
                            recorded_date: row[0].to_string(),
                            start_date: row[1].to_string(),
                            end_date: row[2].to_string(),
                            single_debit: row[3].to_string(),
                            single_credit: row[4].to_string(),
                            repeat_debit: row[5].to_string(),
                            repeat_credit: row[6].to_string(),
                            amount: row[7].to_string(),
                            description: row[8].to_string(),
                        })
                    })
                    .collect();
                self.amortizations.push(group(records));
            }
        }
        Ok(dialect)
    }

    /// Builds the book: accounts first, then transaction files, then
    /// amortisation files, each in load order. Dates must not decrease within
    /// a file. The first failure aborts the whole build.
    pub fn into_book(self) -> Result<Book> {
        let mut book = Book::new();
        for account in self.accounts {
            book.apply(Record::Account(account))?;
        }

        for group in self.transactions.into_iter().chain(self.amortizations) {
            let mut order = DateOrder::new(&group.file);
            for record in group.records {
                if let Some(date) = record.date()? {
                    order.check(date)?;
                }
                book.apply(record)?;
            }
        }

        info!(
            accounts = book.accounts().len(),
            transactions = book.transactions().len(),
            amortizations = book.amortizations().len(),
            "book built"
        );
        Ok(book)
    }
}

/// Enforces non-decreasing dates within one source file.
struct DateOrder<'a> {
    file: &'a str,
    previous: Option<NaiveDate>,
}

impl<'a> DateOrder<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            previous: None,
        }
    }

    fn check(&mut self, current: NaiveDate) -> Result<()> {
        if let Some(previous) = self.previous {
            if current < previous {
                return Err(LedgerError::DecreasingDates {
                    file: self.file.to_string(),
                    previous,
                    current,
                });
            }
        }
        self.previous = Some(current);
        Ok(())
    }
}
