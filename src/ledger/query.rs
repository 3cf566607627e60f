//! Read-only derivations over a book's postings: per-account ledgers,
//! filtered summaries, dense balance series and the reconstruction view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{book::Book, calendar::days_inclusive, transaction::Posting};
use crate::currency::Amount;
use crate::errors::{LedgerError, Result};

/// Regular expression over account names that must match the whole name.
#[derive(Debug, Clone)]
pub struct AccountFilter {
    regex: Regex,
}

impl AccountFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        // Compiled bare first so an unbalanced pattern cannot slip out of the anchors.
        Regex::new(pattern).map_err(|err| LedgerError::InvalidPattern(err.to_string()))?;
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|err| LedgerError::InvalidPattern(err.to_string()))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, account: &str) -> bool {
        self.regex.is_match(account)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountLedgerEntry {
    #[serde(rename = "transaction")]
    pub posting: Posting,
    pub balance: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account: String,
    pub balance: Amount,
    #[serde(rename = "lastTransactionDate")]
    pub last_transaction: NaiveDate,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Series {
    pub entries: Vec<SeriesEntry>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesEntry {
    pub date: NaiveDate,
    pub balance: Amount,
}

/// One row of the statement-style reconstruction of an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconstructRow {
    pub date: NaiveDate,
    pub amount: String,
    pub balance: String,
    pub other_account: String,
    pub description: String,
}

impl Book {
    /// Postings touching `account` with the running balance after each.
    /// Debits raise the balance, credits lower it; a self-transfer yields
    /// one entry per side.
    pub fn account_ledger(&self, account: &str) -> Vec<AccountLedgerEntry> {
        let mut entries = Vec::new();
        let mut balance = Amount::ZERO;
        for posting in self.all_postings() {
            if !posting.account.touches(account) {
                continue;
            }
            if posting.account.debit == account {
                balance += posting.amount;
                entries.push(AccountLedgerEntry {
                    posting: posting.clone(),
                    balance,
                });
            }
            if posting.account.credit == account {
                balance -= posting.amount;
                entries.push(AccountLedgerEntry { posting, balance });
            }
        }
        entries
    }

    /// One summary per matching account that appears in any posting, ordered
    /// by account name.
    pub fn summarise_accounts(&self, filter: &AccountFilter) -> Vec<AccountSummary> {
        let mut summaries: BTreeMap<String, AccountSummary> = BTreeMap::new();
        for posting in self.all_postings() {
            for (account, sign) in [
                (&posting.account.debit, 1),
                (&posting.account.credit, -1),
            ] {
                if !filter.matches(account) {
                    continue;
                }
                let summary = summaries
                    .entry(account.clone())
                    .or_insert_with(|| AccountSummary {
                        account: account.clone(),
                        balance: Amount::ZERO,
                        last_transaction: posting.date,
                        transaction_count: 0,
                    });
                if sign > 0 {
                    summary.balance += posting.amount;
                } else {
                    summary.balance -= posting.amount;
                }
                summary.last_transaction = posting.date;
                summary.transaction_count += 1;
            }
        }
        summaries.into_values().collect()
    }

    /// Combined balance of all matching accounts for every day from the first
    /// matching posting through the last posting of the book. Days without
    /// matching activity carry the previous balance forward.
    pub fn series(&self, filter: &AccountFilter) -> Series {
        let postings = self.all_postings();
        let Some(end) = postings.last().map(|posting| posting.date) else {
            return Series::default();
        };
        let Some(start) = postings
            .iter()
            .find(|posting| {
                filter.matches(&posting.account.debit) || filter.matches(&posting.account.credit)
            })
            .map(|posting| posting.date)
        else {
            return Series::default();
        };

        let mut pending = postings.iter().peekable();
        let mut balance = Amount::ZERO;
        let mut entries = Vec::with_capacity((end - start).num_days() as usize + 1);
        for date in days_inclusive(start, end) {
            while let Some(posting) = pending.next_if(|posting| posting.date <= date) {
                if filter.matches(&posting.account.debit) {
                    balance += posting.amount;
                }
                if filter.matches(&posting.account.credit) {
                    balance -= posting.amount;
                }
            }
            entries.push(SeriesEntry { date, balance });
        }
        Series { entries }
    }

    /// Statement view of one account: debits show as outflows (negative),
    /// credits as inflows, alongside the counterparty account.
    pub fn reconstruct(&self, account: &str) -> Vec<ReconstructRow> {
        let mut balance = Amount::ZERO;
        self.all_postings()
            .into_iter()
            .filter(|posting| posting.account.touches(account))
            .map(|posting| {
                let amount = if posting.account.debit == account {
                    -posting.amount
                } else {
                    posting.amount
                };
                balance += amount;
                ReconstructRow {
                    date: posting.date,
                    amount: amount.to_plain_string(),
                    balance: balance.to_plain_string(),
                    other_account: posting.account.other_side(account).to_string(),
                    description: posting.description,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::ledger::calendar::DateRange;
    use crate::ledger::transaction::{AccountPair, AmortizedTransaction, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter(pattern: &str) -> AccountFilter {
        AccountFilter::new(pattern).expect("valid pattern")
    }

    fn sample_book() -> Book {
        let mut book = Book::new();
        for account in ["Assets:Cash", "Assets:Bank", "Income:Salary", "Expenses:Food"] {
            book.add_account(account);
        }
        let mut add = |day: u32, debit: &str, credit: &str, cents: i64, description: &str| {
            book.add_single_transaction(Transaction::new(
                date(2024, 1, day),
                AccountPair::new(debit, credit),
                Amount::from_cents(cents),
                description,
            ))
            .unwrap();
        };
        add(2, "Assets:Bank", "Income:Salary", 500_000, "salary");
        add(2, "Assets:Cash", "Assets:Bank", 20_000, "withdrawal");
        add(5, "Expenses:Food", "Assets:Cash", 4_550, "groceries");
        add(7, "Expenses:Food", "Assets:Bank", 1_200, "coffee");
        book
    }

    #[test]
    fn filter_requires_full_match() {
        let assets = filter("Assets:.*");
        assert!(assets.matches("Assets:Cash"));
        assert!(!assets.matches("Old:Assets:Cash"));
        assert!(!filter("Cash").matches("Assets:Cash"));
        assert!(filter("Cash|Bank").matches("Bank"));
    }

    #[test]
    fn filter_rejects_malformed_patterns() {
        for pattern in ["(", "a)|(b", "[z-a]"] {
            let err = AccountFilter::new(pattern).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidPattern(_)), "{pattern}");
        }
    }

    #[test]
    fn ledger_tracks_running_balance() {
        let book = sample_book();
        let ledger = book.account_ledger("Assets:Bank");
        let balances: Vec<_> = ledger.iter().map(|e| e.balance.cents()).collect();
        assert_eq!(balances, vec![500_000, 480_000, 478_800]);
        assert_eq!(ledger[1].posting.description, "withdrawal");
        assert!(book.account_ledger("Nope").is_empty());
    }

    #[test]
    fn self_transfer_emits_two_cancelling_entries() {
        let mut book = Book::new();
        book.add_account("Cash");
        book.add_single_transaction(Transaction::new(
            date(2024, 1, 1),
            AccountPair::new("Cash", "Cash"),
            Amount::from_cents(250),
            "shuffle",
        ))
        .unwrap();
        let ledger = book.account_ledger("Cash");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].balance.cents(), 250);
        assert_eq!(ledger[1].balance.cents(), 0);
    }

    #[test]
    fn summaries_are_filtered_and_sorted() {
        let book = sample_book();
        let summaries = book.summarise_accounts(&filter("Assets:.*|Expenses:.*"));
        let names: Vec<_> = summaries.iter().map(|s| s.account.as_str()).collect();
        assert_eq!(names, vec!["Assets:Bank", "Assets:Cash", "Expenses:Food"]);

        let bank = &summaries[0];
        assert_eq!(bank.balance.cents(), 478_800);
        assert_eq!(bank.transaction_count, 3);
        assert_eq!(bank.last_transaction, date(2024, 1, 7));

        let cash = &summaries[1];
        assert_eq!(cash.balance.cents(), 15_450);
        assert_eq!(cash.last_transaction, date(2024, 1, 5));
    }

    #[test]
    fn summaries_skip_accounts_without_postings() {
        let mut book = sample_book();
        book.add_account("Assets:Unused");
        let summaries = book.summarise_accounts(&filter("Assets:.*"));
        assert!(summaries.iter().all(|s| s.account != "Assets:Unused"));
    }

    #[test]
    fn series_is_dense_and_carries_balances_forward() {
        let book = sample_book();
        let series = book.series(&filter("Assets:Cash"));
        let points: Vec<_> = series
            .entries
            .iter()
            .map(|e| (e.date.day0() + 1, e.balance.cents()))
            .collect();
        assert_eq!(
            points,
            vec![(2, 20_000), (3, 20_000), (4, 20_000), (5, 15_450), (6, 15_450), (7, 15_450)]
        );
    }

    #[test]
    fn series_starts_at_first_matching_posting() {
        let book = sample_book();
        let series = book.series(&filter("Expenses:.*"));
        assert_eq!(series.entries.first().unwrap().date, date(2024, 1, 5));
        assert_eq!(series.entries.last().unwrap().date, date(2024, 1, 7));
        assert_eq!(series.entries.last().unwrap().balance.cents(), 5_750);
    }

    #[test]
    fn series_nets_transfers_within_the_filter() {
        let book = sample_book();
        let series = book.series(&filter("Assets:.*"));
        assert_eq!(series.entries[0].balance.cents(), 500_000);
        assert_eq!(series.entries.last().unwrap().balance.cents(), 494_250);
    }

    #[test]
    fn series_is_empty_without_postings_or_matches() {
        assert!(Book::new().series(&filter(".*")).entries.is_empty());
        assert!(sample_book().series(&filter("Liabilities:.*")).entries.is_empty());
    }

    #[test]
    fn series_includes_amortised_days() {
        let mut book = Book::new();
        book.add_account("Expense");
        book.add_account("Prepaid");
        book.add_amortized_transaction(AmortizedTransaction {
            single_date: date(2024, 1, 1),
            date_range: DateRange::new(date(2024, 1, 1), date(2024, 1, 4)).unwrap(),
            single: AccountPair::new("Prepaid", "Expense"),
            repeat: AccountPair::new("Expense", "Prepaid"),
            amount: Amount::from_cents(100),
            description: "subscription".into(),
        })
        .unwrap();
        let series = book.series(&filter("Prepaid"));
        let balances: Vec<_> = series.entries.iter().map(|e| e.balance.cents()).collect();
        assert_eq!(balances, vec![67, 34, 0]);
    }

    #[test]
    fn reconstruct_renders_statement_rows() {
        let book = sample_book();
        let rows = book.reconstruct("Assets:Cash");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, "-200.00");
        assert_eq!(rows[0].balance, "-200.00");
        assert_eq!(rows[0].other_account, "Assets:Bank");
        assert_eq!(rows[1].amount, "45.50");
        assert_eq!(rows[1].balance, "-154.50");
        assert_eq!(rows[1].other_account, "Expenses:Food");
        assert_eq!(rows[1].description, "groceries");
    }

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let book = sample_book();
        let summaries = book.summarise_accounts(&filter("Assets:Cash"));
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json[0]["account"], "Assets:Cash");
        assert_eq!(json[0]["balance"], "154.50");
        assert_eq!(json[0]["lastTransactionDate"], "2024-01-05");
        assert_eq!(json[0]["transactionCount"], 2);
    }
}
