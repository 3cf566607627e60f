//! Rendering of query results for stdout.

use serde::Serialize;

use crate::errors::Result;
use crate::ledger::ReconstructRow;

/// Compact JSON, one document per invocation.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// CSV with a `date,amount,balance,other_account,description` header row.
pub fn to_csv(rows: &[ReconstructRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["date", "amount", "balance", "other_account", "description"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
