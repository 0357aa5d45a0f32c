//! Shared view-model structs for the transactions page.

use time::{format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{endpoints, html::format_signed_currency};

use super::store::{Transaction, TransactionKind};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The short, human-readable date shown in table rows, e.g. "Jan 5".
const SHORT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");

/// Renders a transaction as a table row.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct TransactionTableRow {
    /// A text description of what the transaction was for, truncated for
    /// display.
    pub(crate) description: String,
    /// The transaction date as a short label, e.g. "Jan 5".
    pub(crate) date_label: String,
    /// The formatted, signed amount, e.g. "+$100.00" or "-$40.00".
    pub(crate) amount_label: String,
    /// Whether this row is income or an expense, used for styling.
    pub(crate) kind: TransactionKind,
    /// The API path to delete this transaction
    pub(crate) delete_url: String,
}

impl TransactionTableRow {
    pub(crate) fn new_from_transaction(transaction: &Transaction) -> Self {
        let date_label = transaction
            .date
            .format(SHORT_DATE_FORMAT)
            .unwrap_or_else(|_| transaction.date.to_string());

        Self {
            description: truncate_description(&transaction.description),
            date_label,
            amount_label: format_signed_currency(transaction.amount, transaction.kind),
            kind: transaction.kind,
            delete_url: endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id),
        }
    }
}

fn truncate_description(description: &str) -> String {
    let mut graphemes = description.grapheme_indices(true);

    match graphemes.nth(MAX_DESCRIPTION_GRAPHEMES) {
        Some((byte_index, _)) => format!("{}\u{2026}", &description[..byte_index]),
        None => description.to_owned(),
    }
}
