//! Expansion of amortised transactions into dated postings.

use tracing::trace;

use super::transaction::{AmortizedTransaction, Posting};

impl AmortizedTransaction {
    /// Expands into `1 + days` postings: the full amount on `single_date`
    /// through the single pair, then one share per day of the range through
    /// the repeat pair.
    ///
    /// Each day's share is the amount still outstanding divided by the days
    /// still remaining, so any remainder rolls forward and the final day takes
    /// exactly what is left. The repeat shares always sum to `amount`.
    pub fn postings(&self) -> Vec<Posting> {
        let days = self.date_range.num_days();
        let mut postings = Vec::with_capacity(1 + days as usize);
        postings.push(Posting {
            id: String::new(),
            date: self.single_date,
            account: self.single.clone(),
            amount: self.amount,
            description: self.description.clone(),
        });

        let end = self.date_range.end_exclusive;
        let mut remaining = self.amount;
        for day in self.date_range.days() {
            let days_left = (end - day).num_days();
            let (share, _) = remaining.div_rem(days_left);
            remaining -= share;
            postings.push(Posting {
                id: String::new(),
                date: day,
                account: self.repeat.clone(),
                amount: share,
                description: self.description.clone(),
            });
        }

        trace!(
            description = %self.description,
            days,
            "expanded amortised transaction"
        );
        postings
    }
}
