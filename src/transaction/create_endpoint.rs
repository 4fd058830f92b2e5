//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserId,
    transaction::{
        Category, NewTransaction, Transaction, TransactionState, core::create_transaction,
    },
};

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that a missing field can be reported as
/// [Error::MissingFields] instead of a deserialization error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// A short description of the transaction.
    pub title: Option<String>,
    /// The amount, either a JSON number or a decimal string.
    pub amount: Option<Decimal>,
    /// The category tag, e.g. "income" or "expense".
    pub category: Option<String>,
    /// The ID of the user that owns the transaction.
    pub user_id: Option<String>,
}

impl CreateTransactionRequest {
    /// Check that all fields are present.
    ///
    /// Empty strings count as missing. An amount of zero is valid, only an
    /// absent (or `null`) amount is rejected.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if any field is missing.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let title = non_empty(self.title).ok_or(Error::MissingFields)?;
        let user_id = non_empty(self.user_id).ok_or(Error::MissingFields)?;
        let category = non_empty(self.category).ok_or(Error::MissingFields)?;
        let amount = self.amount.ok_or(Error::MissingFields)?;

        Ok(Transaction::build(
            UserId::new_unchecked(&user_id),
            &title,
            amount,
            Category::from(category),
        ))
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created` and the new transaction as JSON.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected create transaction body: {rejection}");
            return Error::InvalidRequestBody(rejection.body_text())
                .into_response_while("creating transaction");
        }
    };

    match create(&state, request) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response_while("creating transaction"),
    }
}

fn create(
    state: &TransactionState,
    request: CreateTransactionRequest,
) -> Result<Transaction, Error> {
    let new_transaction = request.validate()?;
    let connection = state.connection()?;

    create_transaction(new_transaction, &connection)
}
