//! Day-by-day reconciliation of source transactions against ledger entries.

mod filter;
mod matcher;

pub use filter::{filter_by_account, filter_by_date};
pub use matcher::{audit_day, entry_matches, expected_role, Role};

use chrono::{Days, NaiveDate};

use crate::error::AuditError;
use crate::model::{
    Account, AuditVerdict, ConsumptionRecord, LedgerEntry, Transaction, Truncation,
};

/// An inclusive, non-empty range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AuditError> {
        if start > end {
            return Err(AuditError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn num_days(&self) -> u64 {
        // start <= end, so this is never negative
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// Shortens the range to at most `max_days` days (at least one day is always kept).
    pub fn capped(self, max_days: usize) -> (Self, Option<Truncation>) {
        let max_days = max_days.max(1) as u64;
        if self.num_days() <= max_days {
            return (self, None);
        }
        let Some(audited_end) = self.start.checked_add_days(Days::new(max_days - 1)) else {
            return (self, None);
        };
        let truncation = Truncation {
            requested_end: self.end,
            audited_end,
        };
        (
            Self {
                start: self.start,
                end: audited_end,
            },
            Some(truncation),
        )
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}

/// Audits every date from `start` to `end` (inclusive), sharing one consumption record
/// across all days so that a ledger entry is claimed at most once in the whole range.
///
/// Ranges longer than `max_days` are audited up to the cap; the returned verdict then
/// carries a [`Truncation`].
pub fn audit_range(
    account: &Account,
    transactions: &[Transaction],
    entries: &[LedgerEntry],
    start: NaiveDate,
    end: NaiveDate,
    max_days: usize,
) -> Result<AuditVerdict, AuditError> {
    let (range, truncation) = DateRange::new(start, end)?.capped(max_days);

    let mut verdict = AuditVerdict::new();
    if let Some(truncation) = truncation {
        log::warn!(
            "Range {start} to {end} exceeds the limit of {max_days} days, only auditing until {}",
            truncation.audited_end
        );
        verdict.set_truncation(truncation);
    }

    let mut consumption = ConsumptionRecord::new();
    for date in range.days() {
        log::info!("Running audit on date: {date}");
        let day = matcher::audit_day(account, transactions, entries, date, &mut consumption);
        verdict.insert(day);
    }
    log::info!(
        "Audited {} days, {} ledger entries matched",
        verdict.len(),
        consumption.len()
    );

    Ok(verdict)
}
