//! Application router configuration with session-scoped and public route definitions.

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::resolve_session,
    category::{create_category_endpoint, delete_category_endpoint, get_categories_endpoint},
    dashboard::get_summary_endpoint,
    endpoints,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new().route(endpoints::HEALTH, get(get_health));

    // Handlers behind the session layer see the current user, if any, and
    // answer 401 themselves when there is none.
    let user_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            post(create_category_endpoint)
                .get(get_categories_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_session,
        ));

    user_routes
        .merge(public_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The status of the server.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
