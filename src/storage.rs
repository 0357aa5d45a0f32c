//! Write-through persistence for the transaction list.
//!
//! The entire transaction list is held as a single JSON array in one file,
//! read once at startup and rewritten wholesale after every mutation. A
//! missing or unparseable file is treated as "no prior data" rather than an
//! error so that a fresh install and a corrupted file both start with an
//! empty list.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, transaction::Transaction};

/// The storage medium that the transaction store writes through to.
#[derive(Debug, Clone)]
pub struct Storage {
    /// The path to the JSON file, or `None` for in-memory storage that
    /// discards writes (used in tests, mirroring an in-memory database).
    path: Option<PathBuf>,
}

impl Storage {
    /// Storage backed by the JSON file at `path`.
    ///
    /// The file does not need to exist yet, it is created on the first write.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Storage that keeps nothing: reads produce an empty list and writes
    /// are discarded.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// Read the persisted transaction list.
    ///
    /// A missing or unparseable file yields an empty list. Parse failures
    /// are logged at the warn level since they mean prior data is being
    /// dropped.
    pub fn read(&self) -> Vec<Transaction> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                tracing::debug!(
                    "Could not read the transaction file {}: {error}",
                    path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::warn!(
                    "Could not parse the transaction file {}, starting with an empty list: {error}",
                    path.display()
                );
                Vec::new()
            }
        }
    }

    /// Write the whole transaction list, replacing any previous contents.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the file cannot be written.
    pub fn write(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = serde_json::to_string(transactions)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod storage_tests {
    use std::{fs, path::PathBuf, sync::atomic::AtomicUsize};

    use time::macros::date;

    use crate::transaction::{Transaction, TransactionKind};

    use super::Storage;

    /// A unique file path under the system temp dir for each test.
    fn temp_data_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        std::env::temp_dir().join(format!(
            "pocketbook-storage-test-{}-{n}.json",
            std::process::id()
        ))
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 2,
                description: "Groceries".to_owned(),
                amount: 42.5,
                kind: TransactionKind::Expense,
                date: date!(2024 - 01 - 10),
            },
            Transaction {
                id: 1,
                description: "Salary".to_owned(),
                amount: 1000.0,
                kind: TransactionKind::Income,
                date: date!(2024 - 01 - 05),
            },
        ]
    }

    #[test]
    fn round_trip_preserves_order_and_contents() {
        let path = temp_data_path();
        let storage = Storage::file(&path);
        let want = sample_transactions();

        storage.write(&want).expect("Could not write transactions");
        let got = storage.read();

        fs::remove_file(&path).ok();
        assert_eq!(want, got);
    }

    #[test]
    fn missing_file_reads_as_empty_list() {
        let storage = Storage::file(temp_data_path());

        assert_eq!(storage.read(), Vec::new());
    }

    #[test]
    fn unparseable_file_reads_as_empty_list() {
        let path = temp_data_path();
        fs::write(&path, "definitely not json{{{").unwrap();
        let storage = Storage::file(&path);

        let got = storage.read();

        fs::remove_file(&path).ok();
        assert_eq!(got, Vec::new());
    }

    #[test]
    fn serializes_with_the_expected_field_names() {
        let json = serde_json::to_string(&sample_transactions()[0]).unwrap();

        assert_eq!(
            json,
            "{\"id\":2,\"description\":\"Groceries\",\"amount\":42.5,\
            \"type\":\"expense\",\"date\":\"2024-01-10\"}"
        );
    }

    #[test]
    fn in_memory_storage_discards_writes() {
        let storage = Storage::in_memory();

        storage
            .write(&sample_transactions())
            .expect("Could not write transactions");

        assert_eq!(storage.read(), Vec::new());
    }
}
