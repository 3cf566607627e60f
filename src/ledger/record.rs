//! Raw records handed over by loaders, before parsing.

use chrono::NaiveDate;

use super::calendar::{parse_date, DateRange};
use super::transaction::{AccountPair, AmortizedTransaction, Transaction};
use crate::currency::Amount;
use crate::errors::Result;

/// One input row, already classified by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Account(AccountRecord),
    Transaction(TransactionRecord),
    Amortization(AmortizationRecord),
}

impl Record {
    /// The date a loader orders records by: the transaction date, or the
    /// recorded date of an amortisation. Account declarations have none.
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        match self {
            Record::Account(_) => Ok(None),
            Record::Transaction(raw) => parse_date(&raw.date).map(Some),
            Record::Amortization(raw) => parse_date(&raw.recorded_date).map(Some),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: Option<String>,
    pub date: String,
    pub debit: String,
    pub credit: String,
    pub amount: String,
    pub description: String,
}

impl TransactionRecord {
    pub fn parse(&self) -> Result<Transaction> {
        let txn = Transaction::new(
            parse_date(&self.date)?,
            AccountPair::new(&self.debit, &self.credit),
            self.amount.parse::<Amount>()?,
            &self.description,
        );
        Ok(match &self.id {
            Some(id) => txn.with_id(id),
            None => txn,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmortizationRecord {
    pub recorded_date: String,
    pub start_date: String,
    pub end_date: String,
    pub single_debit: String,
    pub single_credit: String,
    pub repeat_debit: String,
    pub repeat_credit: String,
    pub amount: String,
    pub description: String,
}

impl AmortizationRecord {
    pub fn parse(&self) -> Result<AmortizedTransaction> {
        let single_date: NaiveDate = parse_date(&self.recorded_date)?;
        let date_range = DateRange::new(parse_date(&self.start_date)?, parse_date(&self.end_date)?)?;
        Ok(AmortizedTransaction {
            single_date,
            date_range,
            single: AccountPair::new(&self.single_debit, &self.single_credit),
            repeat: AccountPair::new(&self.repeat_debit, &self.repeat_credit),
            amount: self.amount.parse()?,
            description: self.description.clone(),
        })
    }
}
