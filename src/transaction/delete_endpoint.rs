//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{Error, MessageBody, database_id::TransactionId, transaction::TransactionState};

/// A route handler for deleting a transaction by its ID.
///
/// Responds with a confirmation message on success, or `404 Not Found` if the
/// transaction does not exist. Deleting the same transaction twice therefore
/// succeeds once and then reports not found.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    match delete(&state, &transaction_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageBody::new("Transaction deleted successfully")),
        )
            .into_response(),
        Err(error) => error.into_response_while("deleting transaction"),
    }
}

fn delete(state: &TransactionState, transaction_id: &str) -> Result<(), Error> {
    if transaction_id.is_empty() {
        return Err(Error::MissingTransactionId);
    }

    // No row can have an ID that is not an integer.
    let transaction_id: TransactionId = transaction_id
        .parse()
        .map_err(|_| Error::TransactionNotFound)?;

    let connection = state.connection()?;

    match delete_transaction(transaction_id, &connection)? {
        0 => Err(Error::TransactionNotFound),
        _ => Ok(()),
    }
}

type RowsAffected = usize;

fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|err| err.into())
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rust_decimal::Decimal;

    use crate::{
        Error, MessageBody, UserId,
        test_utils::{get_test_connection, parse_json},
        transaction::{
            Category, Transaction, TransactionState, create_transaction,
            delete_endpoint::delete_transaction, delete_transaction_endpoint, get_transaction,
        },
    };

    fn insert(state: &TransactionState) -> Transaction {
        let connection = state.db_connection.lock().unwrap();

        create_transaction(
            Transaction::build(
                UserId::new_unchecked("u1"),
                "Rent",
                Decimal::new(400, 0),
                Category::Expense,
            ),
            &connection,
        )
        .expect("Could not create transaction")
    }

    #[test]
    fn test_deletes_transaction() {
        let connection = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                UserId::new_unchecked("u1"),
                "Test",
                Decimal::new(123, 2),
                Category::Income,
            ),
            &connection,
        )
        .unwrap();

        let rows_affected = delete_transaction(transaction.id, &connection).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(
            get_transaction(transaction.id, &connection),
            Err(Error::TransactionNotFound)
        );
    }

    #[tokio::test]
    async fn delete_succeeds_once_then_not_found() {
        let state = TransactionState::for_tests();
        let transaction = insert(&state);

        let first =
            delete_transaction_endpoint(State(state.clone()), Path(transaction.id.to_string()))
                .await;

        assert_eq!(first.status(), StatusCode::OK);
        let body: MessageBody = parse_json(first).await;
        assert_eq!(body.message, "Transaction deleted successfully");

        let second =
            delete_transaction_endpoint(State(state), Path(transaction.id.to_string())).await;

        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        let body: MessageBody = parse_json(second).await;
        assert_eq!(body.message, "Transaction not found");
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = TransactionState::for_tests();

        let response = delete_transaction_endpoint(State(state), Path("42".to_owned())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_integer_id_is_not_found() {
        let state = TransactionState::for_tests();
        insert(&state);

        let response =
            delete_transaction_endpoint(State(state), Path("not-a-number".to_owned())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_id_is_rejected() {
        let state = TransactionState::for_tests();

        let response = delete_transaction_endpoint(State(state), Path(String::new())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(body.message, "Transaction ID is required");
    }

    #[tokio::test]
    async fn store_failure_is_generic_500() {
        let state = TransactionState::for_tests();
        let transaction = insert(&state);
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE \"transaction\"", ())
            .unwrap();

        let response =
            delete_transaction_endpoint(State(state), Path(transaction.id.to_string())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageBody = parse_json(response).await;
        assert_eq!(
            body.message,
            "Internal server error while deleting transaction"
        );
    }
}
