use chrono::NaiveDate;

use crate::model::{Account, LedgerEntry, Transaction};

pub fn filter_by_date(date: NaiveDate, transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.date == date)
        .collect()
}

pub fn filter_by_account<'a>(account: &Account, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
    entries
        .iter()
        .filter(|entry| entry.involves(&account.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::{AccountId, Directionality, EntryId, SourceKind};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    fn transaction(day: u32, description: &str) -> Transaction {
        Transaction {
            source: SourceKind::Chase,
            date: date(day),
            amount: Decimal::new(-1000, 2),
            description: description.to_string(),
        }
    }

    fn entry(id: &str, debit: &str, credit: &str) -> LedgerEntry {
        LedgerEntry {
            id: EntryId::new(id),
            date: date(1),
            amount: Decimal::new(1000, 2),
            debit_account_id: AccountId::new(debit),
            credit_account_id: AccountId::new(credit),
        }
    }

    #[test]
    fn keeps_transactions_of_the_date_in_order() {
        let transactions = vec![
            transaction(1, "a"),
            transaction(2, "b"),
            transaction(1, "c"),
            transaction(3, "d"),
        ];

        let filtered = filter_by_date(date(1), &transactions);

        assert_eq!(
            vec!["a", "c"],
            filtered
                .iter()
                .map(|transaction| transaction.description.as_str())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_transactions_on_date() {
        let transactions = vec![transaction(1, "a")];
        assert!(filter_by_date(date(5), &transactions).is_empty());
    }

    #[test]
    fn keeps_entries_where_account_is_either_party() {
        let account = Account {
            name: "Checking".to_string(),
            id: AccountId::new("checking"),
            directionality: Directionality::Asset,
        };
        let entries = vec![
            entry("i-1", "checking", "income"),
            entry("i-2", "groceries", "credit-card"),
            entry("i-3", "groceries", "checking"),
        ];

        let filtered = filter_by_account(&account, &entries);

        assert_eq!(
            vec!["i-1", "i-3"],
            filtered
                .iter()
                .map(|entry| entry.id.0.as_str())
                .collect::<Vec<_>>()
        );
    }
}
