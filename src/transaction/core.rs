//! Defines the core data models and database queries for transactions.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, UserId, database_id::TransactionId, transaction::Category};

// ============================================================================
// MODELS
// ============================================================================

/// A single income or expense recorded by a user.
///
/// Transactions are never edited. Once created they are only read or deleted.
///
/// To create a new `Transaction`, use [Transaction::build] and [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The user that owns the transaction.
    pub user_id: UserId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned.
    ///
    /// Serialized as a decimal string so that no precision is lost on the way
    /// to the client.
    pub amount: Decimal,
    /// Whether the transaction is income, an expense or something else.
    pub category: Category,
    /// When the transaction was recorded by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        user_id: UserId,
        title: &str,
        amount: Decimal,
        category: Category,
    ) -> NewTransaction {
        NewTransaction {
            user_id,
            title: title.to_owned(),
            amount,
            category,
        }
    }
}

/// A validated transaction that has not been saved yet.
///
/// The `id` and `created_at` fields are assigned by [create_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user that will own the transaction.
    pub user_id: UserId,

    /// A short description of the transaction, e.g. "Paycheck" or "Rent".
    pub title: String,

    /// The monetary amount of the transaction.
    ///
    /// Any sign is accepted. The balance is computed from the category, so an
    /// expense of `400` and an expense of `-400` are both stored as given.
    ///
    /// # Examples
    /// - `1000` - Salary deposit
    /// - `12.50` - Lunch
    /// - `0` - A free trial, still a valid amount
    pub amount: Decimal,

    /// The category tag, see [Category].
    pub category: Category,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The owning user is not checked, any non-empty user ID is accepted.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, title, amount, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, title, amount, category, created_at",
        )?
        .query_row(
            (
                new_transaction.user_id.as_str(),
                &new_transaction.title,
                new_transaction.amount.to_string(),
                new_transaction.category.as_str(),
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get all of the transactions owned by `user_id`, most recent first.
///
/// Transactions created at the same instant are ordered by descending ID.
/// Returns an empty list if the user has no transactions.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_for_user(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, title, amount, category, created_at
             FROM \"transaction\"
             WHERE user_id = :user_id
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map(&[(":user_id", user_id.as_str())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, user_id, title, amount, category, created_at FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Amounts are stored as decimal text so that SQLite never converts them to
/// floating point.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the listing and summary queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_created_at
         ON \"transaction\"(user_id, created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns `id, user_id, title, amount, category, created_at` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id: String = row.get(1)?;
    let title = row.get(2)?;
    let amount = parse_amount(row.get(3)?, 3)?;
    let category: String = row.get(4)?;
    let created_at = row.get(5)?;

    Ok(Transaction {
        id,
        user_id: UserId::new_unchecked(&user_id),
        title,
        amount,
        category: Category::from(category),
        created_at,
    })
}

/// Parse an amount stored as text in column `column_index`.
pub(crate) fn parse_amount(text: String, column_index: usize) -> Result<Decimal, rusqlite::Error> {
    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column_index, Type::Text, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
