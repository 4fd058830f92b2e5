//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its `Category`
//! - Database functions for storing, listing, deleting and summarising transactions
//! - The JSON route handlers for the transactions API

mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod summary;
mod summary_endpoint;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, Error};

pub use category::Category;
pub use self::core::{
    NewTransaction, Transaction, create_transaction, create_transaction_table,
    get_transactions_for_user,
};
pub use create_endpoint::{CreateTransactionRequest, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;
pub use summary::{Summary, get_summary};
pub use summary_endpoint::get_summary_endpoint;

#[cfg(test)]
pub use self::core::{count_transactions, get_transaction};

/// The state shared by the transaction route handlers.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl TransactionState {
    /// Acquire the database connection.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock was poisoned by a panic
    /// in another handler.
    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("Could not acquire the database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[cfg(test)]
impl TransactionState {
    /// State backed by a fresh in-memory database.
    pub(crate) fn for_tests() -> Self {
        Self {
            db_connection: Arc::new(Mutex::new(crate::test_utils::get_test_connection())),
        }
    }
}
