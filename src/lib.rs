#![doc(test(attr(deny(warnings))))]

//! Luca Core is a double-entry bookkeeping engine: it validates transactions
//! against a chart of accounts, expands amortised transactions into daily
//! postings, and derives ledgers, account summaries and balance series.

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod loader;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, preferring `RUST_LOG`, then `filter`.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Luca Core tracing initialized.");
    });
}
