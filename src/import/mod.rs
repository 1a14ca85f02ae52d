//! Loading of bank and payment-service CSV exports into normalized transactions.

use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

mod ally;
mod amount;
mod chase;
mod venmo;

pub use amount::parse_amount;

use crate::error::AuditError;
use crate::model::{SourceKind, Transaction};

/// Fatal problems reading an export. The whole load is aborted.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open file")]
    Io(#[from] std::io::Error),

    #[error("Failed to read csv")]
    Csv(#[from] csv::Error),
}

/// Problems with a single row. The row is skipped and loading continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected {expected} fields but found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unable to parse amount '{0}'")]
    Amount(String),

    #[error("unable to parse date '{0}'")]
    Date(String),

    #[error("field {field} is not valid UTF-8")]
    Encoding { field: usize },
}

pub fn load(source: SourceKind, path: &Path) -> Result<Vec<Transaction>, AuditError> {
    log::info!("Loading {source} transactions from {}...", path.display());
    let transactions = File::open(path)
        .map_err(LoadError::from)
        .and_then(|file| load_from_reader(source, file))
        .map_err(|err| AuditError::Load {
            path: path.to_owned(),
            source: err,
        })?;
    log::info!(
        "Loading {source} transactions...done, found {}",
        transactions.len()
    );
    Ok(transactions)
}

pub fn load_from_reader(
    source: SourceKind,
    input_stream: impl Read,
) -> Result<Vec<Transaction>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input_stream);

    let mut transactions = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let parsed = match record {
            Ok(record) => parse_record(source, &record),
            Err(err) => match err.kind() {
                csv::ErrorKind::Utf8 { err: utf8, .. } => Err(RowError::Encoding {
                    field: utf8.field(),
                }),
                _ => return Err(err.into()),
            },
        };
        match parsed {
            Ok(transaction) => transactions.push(transaction),
            Err(err) => log::warn!("Skipping row {} of {source} export: {err}", index + 1),
        }
    }
    Ok(transactions)
}

fn parse_record(source: SourceKind, record: &StringRecord) -> Result<Transaction, RowError> {
    match source {
        SourceKind::Chase => chase::parse_record(record),
        SourceKind::Ally => ally::parse_record(record),
        SourceKind::Venmo => venmo::parse_record(record),
    }
}

fn expect_field_count(record: &StringRecord, expected: usize) -> Result<(), RowError> {
    if record.len() == expected {
        Ok(())
    } else {
        Err(RowError::FieldCount {
            expected,
            found: record.len(),
        })
    }
}
