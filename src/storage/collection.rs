//! Generic JSON document collection
//!
//! Each collection is one JSON array on disk, held in memory in insertion
//! order. Every mutation writes the whole file back before returning, so the
//! on-disk state never lags behind what callers observe.

use std::fmt;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetId, Goal, GoalId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// A record that can live in a [`Collection`]
pub trait Document: Clone + Serialize + DeserializeOwned {
    type Id: Copy + PartialEq + fmt::Display;

    /// Collection name, used for logging
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

impl Document for Transaction {
    type Id = TransactionId;
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> TransactionId {
        self.id
    }
}

impl Document for Budget {
    type Id = BudgetId;
    const COLLECTION: &'static str = "budgets";

    fn id(&self) -> BudgetId {
        self.id
    }
}

impl Document for Goal {
    type Id = GoalId;
    const COLLECTION: &'static str = "goals";

    fn id(&self) -> GoalId {
        self.id
    }
}

/// JSON-file-backed collection of documents
pub struct Collection<T: Document> {
    path: PathBuf,
    docs: RwLock<Vec<T>>,
}

impl<T: Document> Collection<T> {
    /// Create an empty collection backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Load documents from disk, replacing anything held in memory
    pub fn load(&self) -> FinanceResult<()> {
        let loaded: Vec<T> = read_json(&self.path)?;
        let mut docs = self.write_lock()?;
        tracing::debug!(
            collection = T::COLLECTION,
            count = loaded.len(),
            "loaded collection"
        );
        *docs = loaded;
        Ok(())
    }

    /// All documents matching `predicate`, in insertion order
    pub fn find<F>(&self, predicate: F) -> FinanceResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.read_lock()?;
        Ok(docs.iter().filter(|doc| predicate(doc)).cloned().collect())
    }

    /// First document matching `predicate`
    pub fn find_one<F>(&self, predicate: F) -> FinanceResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.read_lock()?;
        Ok(docs.iter().find(|doc| predicate(doc)).cloned())
    }

    pub fn all(&self) -> FinanceResult<Vec<T>> {
        Ok(self.read_lock()?.clone())
    }

    pub fn get(&self, id: T::Id) -> FinanceResult<Option<T>> {
        self.find_one(|doc| doc.id() == id)
    }

    /// Append a document and persist
    pub fn insert(&self, doc: T) -> FinanceResult<T> {
        let stored = doc.clone();
        self.mutate(move |docs| {
            docs.push(doc);
        })?;
        Ok(stored)
    }

    /// Apply `f` to the document with `id` and persist; returns the modified count
    pub fn update<F>(&self, id: T::Id, f: F) -> FinanceResult<usize>
    where
        F: FnOnce(&mut T),
    {
        self.mutate(move |docs| match docs.iter_mut().find(|doc| doc.id() == id) {
            Some(doc) => {
                f(doc);
                1
            }
            None => 0,
        })
    }

    /// Remove the document with `id` and persist; returns the removed count
    pub fn remove(&self, id: T::Id) -> FinanceResult<usize> {
        self.mutate(move |docs| {
            let before = docs.len();
            docs.retain(|doc| doc.id() != id);
            before - docs.len()
        })
    }

    /// Remove every document and persist; returns the removed count
    pub fn clear(&self) -> FinanceResult<usize> {
        self.mutate(|docs| {
            let removed = docs.len();
            docs.clear();
            removed
        })
    }

    pub fn count(&self) -> FinanceResult<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Run `f` on a copy of the documents, persist it, then publish it.
    /// A failed write leaves the in-memory state untouched.
    fn mutate<R, F>(&self, f: F) -> FinanceResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut docs = self.write_lock()?;
        let mut next = docs.clone();
        let result = f(&mut next);
        write_json_atomic(&self.path, &next)?;
        *docs = next;
        Ok(result)
    }

    fn read_lock(&self) -> FinanceResult<RwLockReadGuard<'_, Vec<T>>> {
        self.docs
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> FinanceResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.docs
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn collection() -> (TempDir, Collection<Budget>) {
        let temp_dir = TempDir::new().unwrap();
        let collection = Collection::new(temp_dir.path().join("budgets.json"));
        collection.load().unwrap();
        (temp_dir, collection)
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp, budgets) = collection();
        let budget = budgets
            .insert(Budget::monthly("Logement", Money::from_units(1000)))
            .unwrap();

        let fetched = budgets.get(budget.id).unwrap().unwrap();
        assert_eq!(fetched.category, "Logement");
        assert_eq!(budgets.count().unwrap(), 1);
        assert!(budgets.get(BudgetId::new()).unwrap().is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_temp, budgets) = collection();
        for category in ["Logement", "Loisirs", "Transport"] {
            budgets
                .insert(Budget::monthly(category, Money::from_units(100)))
                .unwrap();
        }

        let categories: Vec<_> = budgets
            .all()
            .unwrap()
            .into_iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(categories, vec!["Logement", "Loisirs", "Transport"]);
    }

    #[test]
    fn test_update_and_remove_counts() {
        let (_temp, budgets) = collection();
        let budget = budgets
            .insert(Budget::monthly("Loisirs", Money::from_units(100)))
            .unwrap();

        let modified = budgets
            .update(budget.id, |b| b.amount = Money::from_units(150))
            .unwrap();
        assert_eq!(modified, 1);
        assert_eq!(
            budgets.get(budget.id).unwrap().unwrap().amount,
            Money::from_units(150)
        );

        assert_eq!(budgets.update(BudgetId::new(), |_| {}).unwrap(), 0);
        assert_eq!(budgets.remove(budget.id).unwrap(), 1);
        assert_eq!(budgets.remove(budget.id).unwrap(), 0);
    }

    #[test]
    fn test_mutations_persist() {
        let (temp, budgets) = collection();
        budgets
            .insert(Budget::monthly("Logement", Money::from_units(1000)))
            .unwrap();

        let reopened: Collection<Budget> = Collection::new(temp.path().join("budgets.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 1);

        assert_eq!(reopened.clear().unwrap(), 1);
        budgets.load().unwrap();
        assert_eq!(budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_find_with_predicate() {
        let temp_dir = TempDir::new().unwrap();
        let txns: Collection<Transaction> =
            Collection::new(temp_dir.path().join("transactions.json"));
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        txns.insert(Transaction::new(
            crate::models::TransactionKind::Expense,
            "Loisirs",
            Money::from_units(20),
            date,
        ))
        .unwrap();
        txns.insert(Transaction::new(
            crate::models::TransactionKind::Income,
            "Salaire",
            Money::from_units(2000),
            date,
        ))
        .unwrap();

        let expenses = txns.find(|t| t.is_expense()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert!(txns
            .find_one(|t| t.category == "Salaire")
            .unwrap()
            .is_some());
    }
}
