//! Extractors shared by the JSON endpoints.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, rejection::JsonRejection},
    http::request::Parts,
};

use crate::{Error, auth::UserId};

/// The user resolved from the session cookie, if any.
///
/// The user ID is placed in the request extensions by
/// [resolve_session](crate::auth::resolve_session). This extractor never
/// rejects a request, the services decide what to do with a missing user.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub Option<UserId>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<UserId>().cloned()))
    }
}

/// Unwrap a JSON request body, or explain why it could not be parsed.
///
/// A missing user takes priority over a malformed body so that anonymous
/// requests are always answered with [Error::Unauthenticated].
///
/// # Errors
/// Returns an [Error::Unauthenticated] if `user_id` is `None`, or an
/// [Error::InvalidInput] if the body was not valid JSON for `T`.
pub fn json_body<T>(
    user_id: Option<&UserId>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, Error> {
    if user_id.is_none() {
        return Err(Error::Unauthenticated);
    }

    body.map(|Json(payload)| payload)
        .map_err(|rejection| Error::InvalidInput(rejection.body_text()))
}
