#![allow(dead_code)]

use std::fs;

use tempfile::TempDir;

pub const ACCOUNTS_CSV: &str = "Account\nAssets:Cash\nAssets:Bank\nIncome:Salary\nExpenses:Food\nExpenses:Insurance\nAssets:Prepaid\n";

pub const TRANSACTIONS_CSV: &str = "\
Date,DR,CR,Amount,Description
2024-01-02,Assets:Bank,Income:Salary,\"5,000.00\",January salary
2024-01-02,Assets:Cash,Assets:Bank,200.00,ATM
2024-01-05,Expenses:Food,Assets:Cash,45.50,Groceries
";

pub const AMORTIZATIONS_CSV: &str = "\
TxnDate,StartDate,EndDate,SingleDR,SingleCR,RepeatDR,RepeatCR,Amount,Description
2024-01-03,2024-01-03,2024-01-06,Assets:Prepaid,Assets:Bank,Expenses:Insurance,Assets:Prepaid,1.00,Insurance
";

/// Creates a temporary directory holding the given `(file name, contents)` pairs.
pub fn csv_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write fixture");
    }
    dir
}

/// The standard three-file fixture.
pub fn sample_dir() -> TempDir {
    csv_dir(&[
        ("accounts.csv", ACCOUNTS_CSV),
        ("transactions.csv", TRANSACTIONS_CSV),
        ("amortizations.csv", AMORTIZATIONS_CSV),
    ])
}
