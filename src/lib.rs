//! MoneyTracker is a web service for recording personal income and expenses.
//!
//! This library provides a JSON API for managing a user's transactions and
//! categories, and a dashboard summary with aggregate totals. Users are
//! identified by an encrypted session cookie issued by an external identity
//! provider.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod extract;
mod logging;
mod routing;
mod transaction;
mod validation;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    CategoryTotal, Totals, compute_totals, expenses_by_category, format_currency,
    format_optional_currency,
};
pub use app_state::AppState;
pub use auth::{COOKIE_SESSION, DEFAULT_COOKIE_DURATION, UserId, set_session_cookie};
pub use category::{Category, CategoryId, CategoryName, CategoryStore, SQLiteCategoryStore};
pub use dashboard::{Summary, summarize};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, LOG_BODY_READ_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, SQLiteTransactionStore, Transaction, TransactionStore, TransactionType,
};

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
    /// The request did not carry a valid session, so there is no current user.
    #[error("authentication required")]
    Unauthenticated,

    /// A required field was missing or malformed.
    ///
    /// The string describes the problem and is shown to the client.
    #[error("{0}")]
    InvalidInput(String),

    /// The user already has a category with this name.
    #[error("a category named \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a category that does not exist or belongs to another user.
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// The request body was longer than [LOG_BODY_READ_LIMIT] bytes.
    #[error("the request body is too large")]
    PayloadTooLarge,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::InvalidInput(_) | Error::DuplicateCategoryName(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::DeleteMissingCategory => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::SqlError(_) | Error::DatabaseLockError | Error::JSONSerializationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // The details of internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal Server Error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
