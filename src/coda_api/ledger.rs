use chrono::NaiveDate;
use futures::future::try_join_all;
use indicatif::ProgressBar;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::collections::HashSet;

use super::client::{Coda, Row, ValueFormat};
use super::retry::with_retry;
use super::FetchError;
use crate::audit::DateRange;
use crate::config::ColumnIds;
use crate::import::parse_amount;
use crate::model::{AccountId, EntryId, LedgerEntry};

/// Fetches every ledger entry recorded on a date of `range`, regardless of account.
/// Entries returned by more than one query are only kept once.
pub async fn fetch_range(coda: &Coda, range: DateRange) -> Result<Vec<LedgerEntry>, FetchError> {
    log::info!(
        "Requesting ledger entries from {} to {}...",
        range.start(),
        range.end()
    );

    let progress = ProgressBar::new(range.num_days());
    let mut entries = Vec::new();
    for date in range.days() {
        entries.extend(fetch_day(coda, date).await?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let entries = dedup_entries(entries);
    log::info!(
        "Requesting ledger entries...done, found {}",
        entries.len()
    );
    Ok(entries)
}

async fn fetch_day(coda: &Coda, date: NaiveDate) -> Result<Vec<LedgerEntry>, FetchError> {
    let settings = coda.settings();
    let queries = date_queries(&settings.columns.date, date, &settings.query_offsets);
    let queries = &queries;
    let table_id = settings.transactions_table_id.as_str();

    let pages = with_retry(
        &settings.retry,
        &format!("Requesting ledger entries for {date}"),
        move || {
            try_join_all(queries.iter().map(move |query| {
                coda.list_rows(table_id, Some(query.as_str()), ValueFormat::Rich)
            }))
        },
    )
    .await?;

    pages
        .into_iter()
        .flatten()
        .map(|row| entry_from_row(&row, date, &settings.columns))
        .collect()
}

/// The ledger stores a calendar date as 22:00 of the previous day in a UTC offset
/// that depends on daylight saving time, so one query per candidate offset is needed.
fn date_queries(date_column: &str, date: NaiveDate, offsets: &[String]) -> Vec<String> {
    let previous_day = date.pred_opt().unwrap_or(date);
    offsets
        .iter()
        .map(|offset| {
            format!(
                "{date_column}:\"{}T22:00:00.000{offset}\"",
                previous_day.format("%Y-%m-%d")
            )
        })
        .collect()
}

fn entry_from_row(row: &Row, date: NaiveDate, columns: &ColumnIds) -> Result<LedgerEntry, FetchError> {
    let debit_account_id = lookup_row_id(row, &columns.debit)?;
    let credit_account_id = lookup_row_id(row, &columns.credit)?;
    let amount = cell_amount(row, &columns.amount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FetchError::malformed(row, format!("negative amount {amount}")));
    }
    Ok(LedgerEntry {
        id: EntryId(row.id.clone()),
        date,
        amount,
        debit_account_id,
        credit_account_id,
    })
}

fn lookup_row_id(row: &Row, column: &str) -> Result<AccountId, FetchError> {
    match row.values.get(column) {
        Some(Value::Object(lookup)) => match lookup.get("rowId") {
            Some(Value::String(row_id)) => Ok(AccountId(row_id.clone())),
            _ => Err(FetchError::malformed(
                row,
                format!("lookup in column {column} has no rowId"),
            )),
        },
        _ => Err(FetchError::malformed(
            row,
            format!("column {column} is not an account lookup"),
        )),
    }
}

fn cell_amount(row: &Row, column: &str) -> Result<Decimal, FetchError> {
    let amount = match row.values.get(column) {
        Some(Value::Object(currency)) => match currency.get("amount") {
            Some(Value::Number(number)) => number_to_decimal(number),
            _ => None,
        },
        Some(Value::Number(number)) => number_to_decimal(number),
        Some(Value::String(text)) => parse_amount(text).ok(),
        _ => None,
    };
    amount.ok_or_else(|| FetchError::malformed(row, format!("column {column} is not an amount")))
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    // Go through the shortest decimal representation so 12.1 does not become 12.0999...
    let text = number.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Removes entries whose id was already seen, keeping the first occurrence and the order.
pub fn dedup_entries(entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect()
}
