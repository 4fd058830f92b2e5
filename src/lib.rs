//! Ledgerline is a small backend for tracking personal income and expenses.
//!
//! This library provides a JSON REST API for creating, listing, deleting and
//! summarising a user's transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod not_found;
mod routing;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    Category, CreateTransactionRequest, NewTransaction, Summary, Transaction, create_transaction,
};
pub use user::UserId;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not install the Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
    /// The user ID path parameter was empty.
    #[error("User ID is required")]
    MissingUserId,

    /// The transaction ID path parameter was empty.
    #[error("Transaction ID is required")]
    MissingTransactionId,

    /// One of the title, amount, category or user ID was missing from the
    /// request body.
    ///
    /// An amount of zero counts as present, only an absent amount is rejected.
    #[error("All fields are required")]
    MissingFields,

    /// The request body could not be parsed as a transaction.
    ///
    /// The string is the message from the JSON extractor and is safe to show
    /// to the client.
    #[error("{0}")]
    InvalidRequestBody(String),

    /// The requested transaction does not exist, or has already been deleted.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The sum of a user's stored amounts does not fit in a decimal.
    #[error("the summed amounts are too large to represent")]
    AmountOverflow,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body used for error responses and simple confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// A human readable message for the client.
    pub message: String,
}

impl MessageBody {
    /// Create a message body from any string-like value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Error {
    /// The HTTP status code the client should see for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingUserId
            | Error::MissingTransactionId
            | Error::MissingFields
            | Error::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Error::TransactionNotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError | Error::AmountOverflow => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert the error into a JSON response, where `action` describes what
    /// the server was doing, e.g. "fetching transactions".
    ///
    /// Client errors are returned with their message as is. Server errors are
    /// logged and replaced with a generic message built from `action` so that
    /// database details are never sent to the client.
    pub fn into_response_while(self, action: &str) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            tracing::error!("Error {action}: {self}");
            format!("Internal server error while {action}")
        } else {
            self.to_string()
        };

        (status_code, Json(MessageBody::new(message))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_response_while("handling the request")
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, MessageBody, test_utils::parse_json};

    #[tokio::test]
    async fn validation_errors_are_bad_requests_with_their_message() {
        let response = Error::MissingFields.into_response_while("creating transaction");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(body.message, "All fields are required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = Error::TransactionNotFound.into_response_while("deleting transaction");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(body.message, "Transaction not found");
    }

    #[tokio::test]
    async fn server_errors_do_not_leak_details() {
        let error = Error::SqlError(rusqlite::Error::InvalidQuery);

        let response = error.into_response_while("fetching summary");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(body.message, "Internal server error while fetching summary");
    }

    #[tokio::test]
    async fn default_response_uses_generic_action() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(
            body.message,
            "Internal server error while handling the request"
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::TransactionNotFound);
    }
}
