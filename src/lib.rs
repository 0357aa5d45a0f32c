//! Pocketbook is a web app for tracking personal income and expenses.
//!
//! Transactions are kept in an in-memory store that writes through to a
//! flat JSON file, and the library serves HTML pages directly for viewing,
//! filtering, creating and deleting transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use maud::Markup;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod storage;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use routing::build_router;
pub use storage::Storage;
pub use transaction::{
    MonthFilter, ParseMonthFilterError, Summary, Transaction, TransactionId, TransactionKind,
    TransactionStore, TypeFilter, filter_transactions, summarize,
};

use crate::{
    alert::AlertTemplate, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// Render maud markup as an HTML response with the given status code.
#[inline]
pub(crate) fn render(status_code: StatusCode, markup: Markup) -> Response {
    (status_code, Html(markup.into_string())).into_response()
}

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty (or whitespace-only) description was used to create a
    /// transaction.
    #[error("transaction description cannot be empty")]
    EmptyDescription,

    /// A zero, negative, or non-numeric amount was used to create a
    /// transaction.
    ///
    /// Transactions record money that actually moved, so the amount must be
    /// a number greater than zero. The direction of the movement is carried
    /// by the transaction type instead of the sign.
    #[error("{0} is not a valid amount, the amount must be greater than zero")]
    NonPositiveAmount(f64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The transaction file could not be read or written.
    ///
    /// The error string should be logged for debugging on the server. When
    /// communicating with the application client this error should be
    /// replaced with a general internal server error.
    #[error("could not access the transaction file: {0}")]
    StorageError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::StorageError(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::StorageError(error.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyDescription => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                AlertTemplate::error(
                    "Invalid description",
                    "Enter a short description of the transaction.",
                )
                .into_html(),
            ),
            Error::NonPositiveAmount(amount) => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter a number greater than zero."),
                )
                .into_html(),
            ),
            Error::NotFound => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AlertTemplate::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
            }
        }
    }
}
