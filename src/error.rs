use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::coda_api::FetchError;
use crate::import::LoadError;

/// Everything that aborts an audit run. An unreconciled day is not an error, see
/// [`crate::model::AuditVerdict::is_reconciled`].
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("No account found with name '{0}'")]
    AccountNotFound(String),

    #[error("Found {count} accounts with name '{name}', expected exactly one")]
    AmbiguousAccount { name: String, count: usize },

    #[error("Invalid date range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to load transactions from {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Failed to fetch from ledger")]
    Fetch(#[from] FetchError),
}
