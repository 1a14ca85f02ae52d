mod accounts;
mod client;
mod ledger;
mod retry;
#[cfg(test)]
mod test_server;

use thiserror::Error;

pub use accounts::{list_accounts, resolve_account, select_single_account};
pub use client::{Coda, Row, ValueFormat};
pub use ledger::{dedup_entries, fetch_range};
pub use retry::with_retry;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to Coda failed")]
    Http(#[from] reqwest::Error),

    #[error("Coda responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Ledger row {row_id} is malformed: {reason}")]
    MalformedRow { row_id: String, reason: String },
}

impl FetchError {
    /// Transport failures, rate limiting and server errors may succeed when retried.
    /// A response body that does not decode will not change on the next attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(err) => !err.is_decode(),
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::MalformedRow { .. } => false,
        }
    }

    pub(crate) fn malformed(row: &Row, reason: impl Into<String>) -> Self {
        FetchError::MalformedRow {
            row_id: row.id.clone(),
            reason: reason.into(),
        }
    }
}
