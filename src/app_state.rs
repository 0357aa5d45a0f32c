//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{storage::Storage, transaction::TransactionStore};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transaction store, shared between request handlers.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl AppState {
    /// Create a new [AppState], rehydrating the transaction store from
    /// `storage`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". It is validated lazily when a page needs to know
    /// the current date.
    pub fn new(storage: Storage, local_timezone: &str) -> Self {
        let store = TransactionStore::load(storage);

        Self {
            local_timezone: local_timezone.to_owned(),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
