use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::filter::{filter_by_account, filter_by_date};
use crate::model::{
    Account, ConsumptionRecord, DayAudit, Directionality, LedgerEntry, Transaction,
};

/// The side of a ledger entry an account occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Debit,
    Credit,
}

/// The role the audited account must hold in a ledger entry that records a source
/// transaction of the given amount. Zero amounts have no role and can never match.
pub fn expected_role(directionality: Directionality, amount: Decimal) -> Option<Role> {
    if amount.is_zero() {
        return None;
    }
    let inflow = amount.is_sign_positive();
    let role = match (directionality, inflow) {
        // Expense on a credit account
        (Directionality::Credit, false) => Role::Credit,
        // Payment towards a credit account
        (Directionality::Credit, true) => Role::Debit,
        // Deposit into an asset account
        (Directionality::Asset, true) => Role::Debit,
        // Withdrawal from an asset account
        (Directionality::Asset, false) => Role::Credit,
    };
    Some(role)
}

pub fn entry_matches(account: &Account, transaction: &Transaction, entry: &LedgerEntry) -> bool {
    let Some(role) = expected_role(account.directionality, transaction.amount) else {
        return false;
    };
    let party = match role {
        Role::Debit => &entry.debit_account_id,
        Role::Credit => &entry.credit_account_id,
    };
    *party == account.id && transaction.amount.abs() == entry.amount
}

/// Audits a single date: every source transaction on `date` must claim its own,
/// not yet consumed, ledger entry. The first matching entry in iteration order wins.
pub fn audit_day(
    account: &Account,
    transactions: &[Transaction],
    entries: &[LedgerEntry],
    date: NaiveDate,
    consumption: &mut ConsumptionRecord,
) -> DayAudit {
    let day_transactions = filter_by_date(date, transactions);
    let account_entries = filter_by_account(account, entries);
    log::debug!(
        "Auditing {date}: {} source transactions, {} ledger entries for {}",
        day_transactions.len(),
        account_entries.len(),
        account.name,
    );

    let mut matched = 0;
    let mut missing = Vec::new();
    for transaction in day_transactions {
        let found = account_entries.iter().find(|entry| {
            !consumption.is_consumed(&entry.id) && entry_matches(account, transaction, entry)
        });
        match found {
            Some(entry) => {
                log::debug!("Matched {transaction:?} with ledger entry {}", entry.id.0);
                consumption.consume(entry.id.clone());
                matched += 1;
            }
            None => missing.push(transaction.clone()),
        }
    }

    if !missing.is_empty() {
        log::info!(
            "Had {} missing source transactions on {date}",
            missing.len()
        );
    }

    DayAudit {
        date,
        matched,
        missing,
    }
}
