//! Defines the core transaction model and the store that owns all records.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, storage::Storage};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction brought money in or paid money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. a grocery shop.
    Expense,
}

impl TransactionKind {
    /// The lowercase tag used in the persistence format and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Records are created through [TransactionStore::add], never mutated in
/// place, and destroyed only by [TransactionStore::remove].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always greater than zero, the direction of the money movement is
    /// carried by `kind`.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date: Date,
}

// ============================================================================
// STORE
// ============================================================================

/// Owns the ordered list of transactions and writes through to [Storage]
/// after every mutation.
///
/// The list is ordered newest-first by insertion, not by date. IDs are
/// assigned from a monotonic counter that is seeded past the largest stored
/// ID when the store is rehydrated.
#[derive(Debug)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    storage: Storage,
}

impl TransactionStore {
    /// Create a store by rehydrating the list persisted in `storage`.
    ///
    /// Missing or unparseable data yields an empty store, see
    /// [Storage::read].
    pub fn load(storage: Storage) -> Self {
        let transactions = storage.read();
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            transactions,
            next_id,
            storage,
        }
    }

    /// A store with no records that discards writes, for use in tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::load(Storage::in_memory())
    }

    /// Validate the input, assign the next ID, and insert the new
    /// transaction at the front of the list.
    ///
    /// The description has surrounding whitespace trimmed before it is
    /// stored.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] if `description` is empty after trimming,
    /// - or [Error::NonPositiveAmount] if `amount` is not a number greater
    ///   than zero,
    /// - or [Error::StorageError] if the list could not be persisted.
    ///
    /// The list is left untouched in all error cases except a failed write,
    /// where the in-memory list keeps the new record and the next page load
    /// will retry persisting it.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        date: Date,
    ) -> Result<Transaction, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        // The comparison is written this way round so NaN is rejected too.
        if !(amount > 0.0) {
            return Err(Error::NonPositiveAmount(amount));
        }

        let transaction = Transaction {
            id: self.next_id,
            description: description.to_owned(),
            amount,
            kind,
            date,
        };
        self.next_id += 1;
        self.transactions.insert(0, transaction.clone());

        self.storage.write(&self.transactions)?;

        Ok(transaction)
    }

    /// Remove the transaction with the given `id`.
    ///
    /// Returns `Ok(false)` without writing when no transaction has that ID.
    ///
    /// # Errors
    /// This function will return a [Error::StorageError] if the list could
    /// not be persisted.
    pub fn remove(&mut self, id: TransactionId) -> Result<bool, Error> {
        let Some(index) = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
        else {
            return Ok(false);
        };

        self.transactions.remove(index);
        self.storage.write(&self.transactions)?;

        Ok(true)
    }

    /// A read-only snapshot of the transactions, insertion order preserved
    /// (newest first).
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod store_tests {
    use std::{fs, path::PathBuf, sync::atomic::AtomicUsize};

    use time::macros::date;

    use crate::{Error, storage::Storage};

    use super::{TransactionKind, TransactionStore};

    fn temp_data_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        std::env::temp_dir().join(format!(
            "pocketbook-store-test-{}-{n}.json",
            std::process::id()
        ))
    }

    #[test]
    fn add_inserts_at_front() {
        let mut store = TransactionStore::in_memory();

        store
            .add("First", 1.0, TransactionKind::Income, date!(2024 - 01 - 01))
            .unwrap();
        let second = store
            .add(
                "Second",
                2.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 02),
            )
            .unwrap();

        assert_eq!(store.all().len(), 2);
        assert_eq!(store.all()[0], second);
    }

    #[test]
    fn add_trims_description() {
        let mut store = TransactionStore::in_memory();

        let transaction = store
            .add(
                "  Coffee  ",
                4.5,
                TransactionKind::Expense,
                date!(2024 - 03 - 08),
            )
            .unwrap();

        assert_eq!(transaction.description, "Coffee");
    }

    #[test]
    fn add_rejects_blank_description() {
        let mut store = TransactionStore::in_memory();

        let result = store.add("   ", 1.0, TransactionKind::Income, date!(2024 - 01 - 01));

        assert_eq!(result, Err(Error::EmptyDescription));
        assert!(store.all().is_empty());
    }

    #[test]
    fn add_rejects_non_positive_amounts() {
        let mut store = TransactionStore::in_memory();

        for amount in [0.0, -12.34, f64::NAN] {
            let result = store.add("Rent", amount, TransactionKind::Expense, date!(2024 - 01 - 01));

            assert!(
                matches!(result, Err(Error::NonPositiveAmount(_))),
                "want NonPositiveAmount for {amount}, got {result:?}"
            );
        }

        assert!(store.all().is_empty());
    }

    #[test]
    fn ids_are_monotonic() {
        let mut store = TransactionStore::in_memory();

        let first = store
            .add("First", 1.0, TransactionKind::Income, date!(2024 - 01 - 01))
            .unwrap();
        let second = store
            .add("Second", 2.0, TransactionKind::Income, date!(2024 - 01 - 02))
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn remove_deletes_only_the_matching_transaction() {
        let mut store = TransactionStore::in_memory();
        let keep = store
            .add("Keep", 1.0, TransactionKind::Income, date!(2024 - 01 - 01))
            .unwrap();
        let delete = store
            .add("Delete", 2.0, TransactionKind::Expense, date!(2024 - 01 - 02))
            .unwrap();

        let removed = store.remove(delete.id).unwrap();

        assert!(removed);
        assert_eq!(store.all(), [keep]);
    }

    #[test]
    fn remove_of_missing_id_is_a_no_op() {
        let mut store = TransactionStore::in_memory();
        store
            .add("Keep", 1.0, TransactionKind::Income, date!(2024 - 01 - 01))
            .unwrap();

        let removed = store.remove(1337).unwrap();

        assert!(!removed);
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn rehydration_preserves_order_and_continues_ids() {
        let path = temp_data_path();

        let mut store = TransactionStore::load(Storage::file(&path));
        store
            .add("Salary", 1000.0, TransactionKind::Income, date!(2024 - 01 - 05))
            .unwrap();
        store
            .add(
                "Groceries",
                42.5,
                TransactionKind::Expense,
                date!(2024 - 01 - 10),
            )
            .unwrap();
        let want = store.all().to_vec();
        drop(store);

        let mut reloaded = TransactionStore::load(Storage::file(&path));
        assert_eq!(reloaded.all(), want);

        let next = reloaded
            .add("Dinner", 30.0, TransactionKind::Expense, date!(2024 - 01 - 11))
            .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(next.id, 3);
    }
}
