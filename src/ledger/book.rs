use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{
    calendar::DateRange,
    record::Record,
    transaction::{AmortizedTransaction, Posting, Transaction},
};
use crate::currency::Amount;
use crate::errors::{LedgerError, Result};

/// Chart of accounts plus every accepted transaction.
///
/// Built by successive insertions, then queried. Insertions either succeed
/// completely or leave the book untouched.
///
/// `turnover` is the sum of every posting amount. No running balance can
/// exceed it, so keeping it within `i64` keeps every query free of overflow.
#[derive(Debug, Clone, Default)]
pub struct Book {
    accounts: BTreeSet<String>,
    transactions: Vec<Transaction>,
    amortizations: Vec<AmortizedTransaction>,
    turnover: Amount,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(account = %name, "account added");
        self.accounts.insert(name);
    }

    /// Account names in lexicographic order.
    pub fn accounts(&self) -> Vec<String> {
        self.accounts.iter().cloned().collect()
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.accounts.contains(name)
    }

    pub fn add_single_transaction(&mut self, txn: Transaction) -> Result<()> {
        self.ensure_known(&txn.account.accounts())?;
        ensure_non_negative(txn.amount)?;
        let turnover = self.grow_turnover(txn.amount, 1)?;
        debug!(date = %txn.date, amount = %txn.amount, "transaction accepted");
        self.turnover = turnover;
        self.transactions.push(txn);
        Ok(())
    }

    pub fn add_amortized_transaction(&mut self, txn: AmortizedTransaction) -> Result<()> {
        self.ensure_known(&txn.accounts())?;
        ensure_non_negative(txn.amount)?;
        DateRange::new(txn.date_range.start_inclusive, txn.date_range.end_exclusive)?;
        // Posted once on the single pair and once more across the repeat shares.
        let turnover = self.grow_turnover(txn.amount, 2)?;
        debug!(
            date = %txn.single_date,
            amount = %txn.amount,
            days = txn.date_range.num_days(),
            "amortised transaction accepted"
        );
        self.turnover = turnover;
        self.amortizations.push(txn);
        Ok(())
    }

    /// Parses and inserts a loader record.
    pub fn apply(&mut self, record: Record) -> Result<()> {
        match record {
            Record::Account(account) => {
                self.add_account(account.name);
                Ok(())
            }
            Record::Transaction(raw) => self.add_single_transaction(raw.parse()?),
            Record::Amortization(raw) => self.add_amortized_transaction(raw.parse()?),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn amortizations(&self) -> &[AmortizedTransaction] {
        &self.amortizations
    }

    /// Number of postings [`Book::all_postings`] yields, without expanding.
    pub fn posting_count(&self) -> usize {
        self.transactions.len()
            + self
                .amortizations
                .iter()
                .map(|txn| 1 + txn.date_range.num_days() as usize)
                .sum::<usize>()
    }

    /// Every posting, single transactions first then amortisation expansions,
    /// stable-sorted by date so same-day postings keep insertion order.
    pub fn all_postings(&self) -> Vec<Posting> {
        let mut postings = Vec::with_capacity(self.posting_count());
        postings.extend(self.transactions.iter().map(Posting::from));
        for txn in &self.amortizations {
            postings.extend(txn.postings());
        }
        postings.sort_by_key(|posting| posting.date);
        postings
    }

    /// Sum of every posting amount in the book.
    pub fn turnover(&self) -> Amount {
        self.turnover
    }

    fn grow_turnover(&self, amount: Amount, times: usize) -> Result<Amount> {
        (0..times)
            .try_fold(self.turnover, |total, _| total.checked_add(amount))
            .ok_or_else(|| {
                warn!(amount = %amount, "rejected record overflowing book turnover");
                LedgerError::AmountOverflow { amount }
            })
    }

    fn ensure_known(&self, accounts: &[&str]) -> Result<()> {
        match accounts.iter().find(|name| !self.has_account(name)) {
            Some(unknown) => {
                warn!(account = %unknown, "rejected record referencing unknown account");
                Err(LedgerError::UnknownAccount {
                    account: unknown.to_string(),
                })
            }
            None => Ok(()),
        }
    }
}

fn ensure_non_negative(amount: Amount) -> Result<()> {
    if amount.is_negative() {
        warn!(amount = %amount, "rejected record with negative amount");
        return Err(LedgerError::NegativeAmount);
    }
    Ok(())
}
