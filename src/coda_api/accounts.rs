use serde_json::Value;

use super::client::{Coda, Row, ValueFormat};
use super::FetchError;
use crate::error::AuditError;
use crate::model::{Account, AccountId, Directionality};

/// Lists the accounts of the ledger, optionally only those whose name equals `search`.
pub async fn list_accounts(coda: &Coda, search: Option<&str>) -> Result<Vec<Account>, FetchError> {
    log::info!("Requesting accounts...");

    let settings = coda.settings();
    let query = search.map(|name| format!("{}:\"{}\"", settings.columns.account_name, name));
    let rows = coda
        .list_rows(
            &settings.accounts_table_id,
            query.as_deref(),
            ValueFormat::Simple,
        )
        .await?;
    let accounts: Vec<Account> = rows
        .into_iter()
        .map(|row| account_from_row(row, &settings.columns.account_type))
        .collect();

    log::info!("Requesting accounts...done, found {}", accounts.len());
    Ok(accounts)
}

/// Finds the one account with the given name.
pub async fn resolve_account(coda: &Coda, name: &str) -> Result<Account, AuditError> {
    let accounts = list_accounts(coda, Some(name)).await?;
    select_single_account(name, accounts)
}

pub fn select_single_account(name: &str, mut accounts: Vec<Account>) -> Result<Account, AuditError> {
    match accounts.len() {
        0 => Err(AuditError::AccountNotFound(name.to_string())),
        1 => Ok(accounts.remove(0)),
        count => Err(AuditError::AmbiguousAccount {
            name: name.to_string(),
            count,
        }),
    }
}

fn account_from_row(row: Row, type_column: &str) -> Account {
    let directionality = match row.values.get(type_column) {
        Some(Value::String(account_type)) => Directionality::from_account_type(account_type),
        _ => Directionality::Credit,
    };
    Account {
        name: row.name,
        id: AccountId(row.id),
        directionality,
    }
}

#[cfg(test)]
mod tests {
    use common_macros::hash_map;
    use std::collections::HashMap;

    use super::*;

    fn account(name: &str, id: &str) -> Account {
        Account {
            name: name.to_string(),
            id: AccountId::new(id),
            directionality: Directionality::Asset,
        }
    }

    #[test]
    fn selects_only_account() {
        assert_eq!(
            account("Checking", "i-1"),
            select_single_account("Checking", vec![account("Checking", "i-1")]).unwrap()
        );
    }

    #[test]
    fn no_account_is_not_found() {
        assert!(matches!(
            select_single_account("Checking", vec![]),
            Err(AuditError::AccountNotFound(name)) if name == "Checking"
        ));
    }

    #[test]
    fn several_accounts_are_ambiguous() {
        assert!(matches!(
            select_single_account(
                "Checking",
                vec![account("Checking", "i-1"), account("Checking", "i-2")]
            ),
            Err(AuditError::AmbiguousAccount { count: 2, .. })
        ));
    }

    #[test]
    fn asset_row() {
        let row = Row {
            id: "i-1".to_string(),
            name: "Checking".to_string(),
            values: hash_map! {
                "c-type".to_string() => Value::String("Asset".to_string()),
            },
        };

        assert_eq!(account("Checking", "i-1"), account_from_row(row, "c-type"));
    }

    #[test]
    fn credit_row() {
        let row = Row {
            id: "i-2".to_string(),
            name: "Visa".to_string(),
            values: hash_map! {
                "c-type".to_string() => Value::String("Credit".to_string()),
            },
        };

        assert_eq!(
            Directionality::Credit,
            account_from_row(row, "c-type").directionality
        );
    }

    #[test]
    fn row_without_type_is_credit() {
        let row = Row {
            id: "i-3".to_string(),
            name: "Unknown".to_string(),
            values: HashMap::new(),
        };

        assert_eq!(
            Directionality::Credit,
            account_from_row(row, "c-type").directionality
        );
    }
}
