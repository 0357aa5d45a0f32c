//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `TransactionStore` that owns all records
//! - Pure filtering and summary functions over store snapshots
//! - View handlers for the transaction-related web pages

mod create_page;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod filter;
mod models;
mod store;
mod summary;
mod transactions_page;
mod view;

pub use filter::{MonthFilter, ParseMonthFilterError, TypeFilter, filter_transactions};
pub use store::{Transaction, TransactionId, TransactionKind, TransactionStore};
pub use summary::{Summary, summarize};

pub(crate) use create_page::get_create_transaction_page;
pub(crate) use create_transaction_endpoint::create_transaction_endpoint;
pub(crate) use delete_transaction_endpoint::delete_transaction_endpoint;
pub(crate) use transactions_page::get_transactions_page;
