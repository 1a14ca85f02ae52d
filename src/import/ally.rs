use chrono::NaiveDate;
use csv::StringRecord;

use super::{amount::parse_amount, expect_field_count, RowError};
use crate::model::{SourceKind, Transaction};

/// Date, Time, Amount, Type, Description
const FIELD_COUNT: usize = 5;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_record(record: &StringRecord) -> Result<Transaction, RowError> {
    expect_field_count(record, FIELD_COUNT)?;
    let amount = parse_amount(&record[2])?;
    let date = NaiveDate::parse_from_str(record[0].trim(), DATE_FORMAT)
        .map_err(|_| RowError::Date(record[0].to_string()))?;
    Ok(Transaction {
        source: SourceKind::Ally,
        date,
        amount,
        description: record[4].to_string(),
    })
}
