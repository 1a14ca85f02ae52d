use chrono::NaiveDate;
use csv::StringRecord;

use super::{amount::parse_amount, expect_field_count, RowError};
use crate::model::{SourceKind, Transaction};

/// Transaction Date, Post Date, Description, Category, Type, Amount
const FIELD_COUNT: usize = 6;
const DATE_FORMAT: &str = "%m/%d/%Y";

pub fn parse_record(record: &StringRecord) -> Result<Transaction, RowError> {
    expect_field_count(record, FIELD_COUNT)?;
    let amount = parse_amount(&record[5])?;
    let date = NaiveDate::parse_from_str(record[0].trim(), DATE_FORMAT)
        .map_err(|_| RowError::Date(record[0].to_string()))?;
    Ok(Transaction {
        source: SourceKind::Chase,
        date,
        amount,
        description: record[2].to_string(),
    })
}
