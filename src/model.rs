use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Debug, Display};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Whether an account's balance grows with debits (`Asset`) or is a liability
/// that grows with credits (`Credit`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directionality {
    Credit,
    Asset,
}

impl Directionality {
    /// Maps the ledger's account type column. Anything other than `Asset` is a credit account.
    pub fn from_account_type(account_type: &str) -> Self {
        if account_type.trim() == "Asset" {
            Directionality::Asset
        } else {
            Directionality::Credit
        }
    }
}

impl Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directionality::Credit => f.write_str("Credit"),
            Directionality::Asset => f.write_str("Asset"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub id: AccountId,
    pub directionality: Directionality,
}

/// The export format a transaction was decoded from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SourceKind {
    Chase,
    Ally,
    Venmo,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Chase => f.write_str("Chase"),
            SourceKind::Ally => f.write_str("Ally"),
            SourceKind::Venmo => f.write_str("Venmo"),
        }
    }
}

/// A normalized source transaction. Negative amounts are outflows, positive amounts inflows.
#[derive(Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source: SourceKind,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

impl Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} \"{}\"",
            self.source, self.date, self.amount, self.description
        )
    }
}

/// A transfer between two accounts as recorded in the ledger. `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub debit_account_id: AccountId,
    pub credit_account_id: AccountId,
}

impl LedgerEntry {
    pub fn involves(&self, account_id: &AccountId) -> bool {
        self.debit_account_id == *account_id || self.credit_account_id == *account_id
    }
}

/// Ledger entries already claimed by a source transaction during one range audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumptionRecord {
    consumed: HashSet<EntryId>,
}

impl ConsumptionRecord {
    pub fn new() -> Self {
        Self {
            consumed: HashSet::new(),
        }
    }

    pub fn is_consumed(&self, id: &EntryId) -> bool {
        self.consumed.contains(id)
    }

    /// Returns false if the entry had already been consumed.
    pub fn consume(&mut self, id: EntryId) -> bool {
        self.consumed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

impl Default for ConsumptionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of auditing a single date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAudit {
    pub date: NaiveDate,
    pub matched: usize,
    pub missing: Vec<Transaction>,
}

impl DayAudit {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Set when the requested range was longer than the configured day cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub requested_end: NaiveDate,
    pub audited_end: NaiveDate,
}

/// Per-date results of a range audit, always iterated in ascending date order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditVerdict {
    days: BTreeMap<NaiveDate, DayAudit>,
    truncation: Option<Truncation>,
}

impl AuditVerdict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: DayAudit) {
        self.days.insert(day.date, day);
    }

    pub fn set_truncation(&mut self, truncation: Truncation) {
        self.truncation = Some(truncation);
    }

    pub fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }

    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).map(DayAudit::is_valid)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayAudit> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayAudit> {
        self.days.values()
    }

    pub fn verdicts(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.days.values().map(|day| (day.date, day.is_valid()))
    }

    pub fn failing_days(&self) -> impl Iterator<Item = &DayAudit> {
        self.days.values().filter(|day| !day.is_valid())
    }

    pub fn is_reconciled(&self) -> bool {
        self.days.values().all(DayAudit::is_valid)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
