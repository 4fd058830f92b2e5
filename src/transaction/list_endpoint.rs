//! Defines the endpoint for listing a user's transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error, UserId,
    transaction::{Transaction, TransactionState, get_transactions_for_user},
};

/// A route handler that responds with all of a user's transactions as a JSON
/// array, most recent first.
///
/// A user without transactions gets an empty array.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Path(user_id): Path<String>,
) -> Response {
    match list_transactions(&state, &user_id) {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(error) => error.into_response_while("fetching transactions"),
    }
}

fn list_transactions(state: &TransactionState, user_id: &str) -> Result<Vec<Transaction>, Error> {
    let user_id = UserId::new(user_id)?;
    let connection = state.connection()?;

    get_transactions_for_user(&user_id, &connection)
}
