//! Category operations scoped to the signed in user.

use crate::{
    Error,
    auth::UserId,
    category::{Category, CategoryId, CategoryPayload, CategoryStore},
    validation::validate_category_input,
};

/// List the categories owned by `user_id` in the order they were created.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, or an internal
/// error if the store fails.
pub fn list_categories(
    store: &impl CategoryStore,
    user_id: Option<&UserId>,
) -> Result<Vec<Category>, Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;

    store.get_by_user(user_id)
}

/// Create a category owned by `user_id` with the trimmed name from `payload`.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, an
/// [Error::InvalidInput] if the name is blank, or an
/// [Error::DuplicateCategoryName] if the user already has a category with that name.
pub fn create_category(
    store: &impl CategoryStore,
    user_id: Option<&UserId>,
    payload: CategoryPayload,
) -> Result<Category, Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;
    let name = validate_category_input(payload)?;

    store.create(user_id, name)
}

/// Delete the category `category_id` owned by `user_id`.
///
/// Transactions filed under the category keep its name.
///
/// # Errors
/// Returns an [Error::Unauthenticated] if there is no user, or an
/// [Error::DeleteMissingCategory] if the user has no category with that ID.
pub fn delete_category(
    store: &impl CategoryStore,
    user_id: Option<&UserId>,
    category_id: CategoryId,
) -> Result<(), Error> {
    let user_id = user_id.ok_or(Error::Unauthenticated)?;

    store.delete(user_id, category_id)?;
    tracing::debug!("Deleted category {category_id} for user {user_id}");

    Ok(())
}
