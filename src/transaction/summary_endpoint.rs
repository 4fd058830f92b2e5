//! Defines the endpoint for a user's balance, income and expenses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error, UserId,
    transaction::{Summary, TransactionState, get_summary},
};

/// A route handler that responds with the [Summary] of a user's transactions.
pub async fn get_summary_endpoint(
    State(state): State<TransactionState>,
    Path(user_id): Path<String>,
) -> Response {
    match summarize(&state, &user_id) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error.into_response_while("fetching summary"),
    }
}

fn summarize(state: &TransactionState, user_id: &str) -> Result<Summary, Error> {
    let user_id = UserId::new(user_id)?;
    let connection = state.connection()?;

    get_summary(&user_id, &connection)
}
