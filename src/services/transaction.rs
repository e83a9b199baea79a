//! Transaction service
//!
//! CRUD over the transaction collection plus filtered, date-ordered listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionKind, TransactionPatch};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Inclusive date bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Filter for listing transactions; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |kind| txn.kind == kind)
            && self
                .category
                .as_deref()
                .map_or(true, |category| txn.category == category)
            && self.date_range.map_or(true, |range| range.contains(txn.date))
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List transactions matching `query`, newest date first
    ///
    /// Ties on date are broken by creation time, newest first.
    pub fn list(&self, query: &TransactionQuery) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.find(|t| query.matches(t))?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Transaction>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }
        self.storage
            .transactions
            .find_one(|t| t.id.short() == identifier)
    }

    /// Create a new transaction
    pub fn create(&self, input: NewTransaction) -> FinanceResult<Transaction> {
        let txn = input.into_transaction();
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let txn = self.storage.transactions.insert(txn)?;
        tracing::info!(
            id = %txn.id,
            kind = %txn.kind,
            category = %txn.category,
            amount = %txn.amount,
            "transaction created"
        );
        Ok(txn)
    }

    /// Merge `patch` into a transaction; returns the modified count
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> FinanceResult<usize> {
        let Some(mut txn) = self.get(id)? else {
            tracing::debug!(%id, "update of missing transaction");
            return Ok(0);
        };

        txn.apply(patch);
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let modified = self.storage.transactions.update(id, |stored| *stored = txn)?;
        tracing::info!(%id, modified, "transaction updated");
        Ok(modified)
    }

    /// Delete a transaction; returns the removed count
    pub fn delete(&self, id: TransactionId) -> FinanceResult<usize> {
        let removed = self.storage.transactions.remove(id)?;
        tracing::info!(%id, removed, "transaction deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(
                NewTransaction::expense("  Alimentation ", Money::from_units(42), day(3))
                    .with_description("Marché"),
            )
            .unwrap();

        assert_eq!(txn.category, "Alimentation");
        let fetched = service.get(txn.id).unwrap().unwrap();
        assert_eq!(fetched, txn);
        assert!(service.find(&txn.id.to_string()).unwrap().is_some());
        assert_eq!(service.find(&txn.id.short()).unwrap().unwrap().id, txn.id);
        assert!(service.find("nonsense").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(NewTransaction::expense("Loisirs", Money::zero(), day(1)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_list_orders_newest_first() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let early = service
            .create(NewTransaction::expense("Loisirs", Money::from_units(1), day(1)))
            .unwrap();
        let late = service
            .create(NewTransaction::expense("Loisirs", Money::from_units(2), day(20)))
            .unwrap();
        let same_day_later = service
            .create(NewTransaction::expense("Loisirs", Money::from_units(3), day(20)))
            .unwrap();

        let ids: Vec<_> = service
            .list(&TransactionQuery::new())
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![same_day_later.id, late.id, early.id]);
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .create(NewTransaction::expense("Logement", Money::from_units(900), day(1)))
            .unwrap();
        service
            .create(NewTransaction::expense("Loisirs", Money::from_units(120), day(15)))
            .unwrap();
        service
            .create(NewTransaction::income("Salaire", Money::from_units(2500), day(28)))
            .unwrap();

        let expenses = service
            .list(&TransactionQuery::new().kind(TransactionKind::Expense))
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let loisirs = service
            .list(&TransactionQuery::new().category("Loisirs"))
            .unwrap();
        assert_eq!(loisirs.len(), 1);

        let first_half = service
            .list(&TransactionQuery::new().date_range(DateRange::between(day(1), day(15))))
            .unwrap();
        assert_eq!(first_half.len(), 2);

        let open_start = service
            .list(&TransactionQuery::new().date_range(DateRange {
                start: None,
                end: Some(day(1)),
            }))
            .unwrap();
        assert_eq!(open_start.len(), 1);
    }

    #[test]
    fn test_update_counts() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(NewTransaction::expense("Loisirs", Money::from_units(10), day(2)))
            .unwrap();

        let patch = TransactionPatch {
            amount: Some(Money::from_units(15)),
            ..Default::default()
        };
        assert_eq!(service.update(txn.id, patch.clone()).unwrap(), 1);
        assert_eq!(
            service.get(txn.id).unwrap().unwrap().amount,
            Money::from_units(15)
        );
        assert_eq!(service.update(TransactionId::new(), patch).unwrap(), 0);

        let invalid = TransactionPatch {
            category: Some("  ".into()),
            ..Default::default()
        };
        assert!(service.update(txn.id, invalid).unwrap_err().is_validation());
    }

    #[test]
    fn test_delete_counts() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(NewTransaction::expense("Loisirs", Money::from_units(10), day(2)))
            .unwrap();

        assert_eq!(service.delete(txn.id).unwrap(), 1);
        assert_eq!(service.delete(txn.id).unwrap(), 0);
    }
}
