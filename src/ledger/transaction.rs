use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::DateRange;
use crate::currency::Amount;

/// The debit and credit side of a posting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AccountPair {
    #[serde(rename = "dr")]
    pub debit: String,
    #[serde(rename = "cr")]
    pub credit: String,
}

impl AccountPair {
    pub fn new(debit: impl Into<String>, credit: impl Into<String>) -> Self {
        Self {
            debit: debit.into(),
            credit: credit.into(),
        }
    }

    pub fn touches(&self, account: &str) -> bool {
        self.debit == account || self.credit == account
    }

    /// Counterparty of `account` on this pair; the account itself for
    /// self-transfers.
    pub fn other_side(&self, account: &str) -> &str {
        if self.debit == account {
            &self.credit
        } else {
            &self.debit
        }
    }

    /// Debit first, then credit.
    pub fn accounts(&self) -> [&str; 2] {
        [&self.debit, &self.credit]
    }
}

/// A single dated movement recorded directly by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub account: AccountPair,
    pub amount: Amount,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        account: AccountPair,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            date,
            account,
            amount,
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A transaction recognised in full on `single_date` through the `single`
/// pair, and spread day by day over `date_range` through the `repeat` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmortizedTransaction {
    pub single_date: NaiveDate,
    pub date_range: DateRange,
    pub single: AccountPair,
    pub repeat: AccountPair,
    pub amount: Amount,
    pub description: String,
}

impl AmortizedTransaction {
    /// All four referenced accounts: single debit, single credit, repeat debit,
    /// repeat credit.
    pub fn accounts(&self) -> [&str; 4] {
        let [single_debit, single_credit] = self.single.accounts();
        let [repeat_debit, repeat_credit] = self.repeat.accounts();
        [single_debit, single_credit, repeat_debit, repeat_credit]
    }
}

/// The flattened, queryable unit every transaction kind reduces to.
///
/// `id` is empty for postings without an external id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Posting {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub account: AccountPair,
    pub amount: Amount,
    pub description: String,
}

impl From<&Transaction> for Posting {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.clone().unwrap_or_default(),
            date: txn.date,
            account: txn.account.clone(),
            amount: txn.amount,
            description: txn.description.clone(),
        }
    }
}
