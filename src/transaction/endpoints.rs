//! HTTP handlers for listing and creating transactions.

use axum::{
    Json,
    extract::{
        FromRef, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    extract::{CurrentUser, json_body},
    transaction::{
        SQLiteTransactionStore, Transaction, TransactionPayload,
        service::{create_transaction, list_transactions},
    },
};

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionEndpointState {
    /// The store for the user's transactions.
    pub store: SQLiteTransactionStore,
}

impl FromRef<AppState> for TransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store(),
        }
    }
}

/// The query string for listing transactions.
///
/// A `userId` parameter is ignored, the user always comes from the session.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// Only return this many of the newest transactions.
    pub limit: Option<u32>,
}

/// List the current user's transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionEndpointState>,
    CurrentUser(user_id): CurrentUser,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let limit = match query {
        Ok(Query(query)) => query.limit,
        Err(rejection) if user_id.is_some() => {
            return Err(Error::InvalidInput(rejection.body_text()));
        }
        Err(_) => None,
    };

    list_transactions(&state.store, user_id.as_ref(), limit).map(Json)
}

/// Create a transaction for the current user.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    CurrentUser(user_id): CurrentUser,
    body: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let payload = json_body(user_id.as_ref(), body)?;

    let transaction = create_transaction(&state.store, user_id.as_ref(), payload)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
