use chrono::NaiveDateTime;
use csv::StringRecord;

use super::{amount::parse_amount, expect_field_count, RowError};
use crate::model::{SourceKind, Transaction};

/// Venmo statements have 18 columns: an empty leading column, ID, Datetime, Type, Status,
/// Note, From, To, Amount (total), followed by fee, funding and balance columns.
const FIELD_COUNT: usize = 18;
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_record(record: &StringRecord) -> Result<Transaction, RowError> {
    expect_field_count(record, FIELD_COUNT)?;
    let amount = parse_amount(&record[8])?;
    let date = NaiveDateTime::parse_from_str(record[2].trim(), DATETIME_FORMAT)
        .map_err(|_| RowError::Date(record[2].to_string()))?
        .date();
    Ok(Transaction {
        source: SourceKind::Venmo,
        date,
        amount,
        description: record[5].to_string(),
    })
}
