//! HTTP handlers for listing, creating and deleting categories.

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    category::{
        Category, CategoryPayload, DeleteCategoryPayload, SQLiteCategoryStore,
        service::{create_category, delete_category, list_categories},
    },
    extract::{CurrentUser, json_body},
};

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryEndpointState {
    /// The store for the user's categories.
    pub store: SQLiteCategoryStore,
}

impl FromRef<AppState> for CategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.category_store(),
        }
    }
}

/// List the current user's categories.
pub async fn get_categories_endpoint(
    State(state): State<CategoryEndpointState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Category>>, Error> {
    list_categories(&state.store, user_id.as_ref()).map(Json)
}

/// Create a category for the current user.
pub async fn create_category_endpoint(
    State(state): State<CategoryEndpointState>,
    CurrentUser(user_id): CurrentUser,
    body: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let payload = json_body(user_id.as_ref(), body)?;

    let category = create_category(&state.store, user_id.as_ref(), payload)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete one of the current user's categories.
pub async fn delete_category_endpoint(
    State(state): State<CategoryEndpointState>,
    CurrentUser(user_id): CurrentUser,
    body: Result<Json<DeleteCategoryPayload>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let payload = json_body(user_id.as_ref(), body)?;

    delete_category(&state.store, user_id.as_ref(), payload.id)?;

    Ok(Json(json!({ "success": true })))
}
