//! Session middleware that resolves the current user and slides the session expiry.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::{
    AppState,
    auth::{
        AuthError,
        cookie::{extend_session_if_needed, get_token_from_cookies},
    },
};

/// The state needed for the session middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The minimum time a session stays valid after each request.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that resolves the current user from the session cookie.
///
/// If the request has a valid, unexpired session cookie the [UserId](crate::UserId)
/// is placed into the request extensions and the session is extended.
/// Otherwise the request is passed on without a user, and the handlers
/// decide whether to reject it.
///
/// **Note**: Route handlers can use the [CurrentUser](crate::extract::CurrentUser)
/// extractor to receive the user ID.
pub async fn resolve_session(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::<Key>::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(never) => match never {},
    };

    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(AuthError::CookieMissing) => return next.run(Request::from_parts(parts, body)).await,
        Err(error) => {
            tracing::warn!("Ignoring session cookie: {error}");
            return next.run(Request::from_parts(parts, body)).await;
        }
    };

    parts.extensions.insert(token.user_id.clone());
    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    let jar = match extend_session_if_needed(jar.clone(), token, state.cookie_duration) {
        Ok(updated_jar) => updated_jar,
        Err(err) => {
            tracing::error!("Error extending session duration: {err:?}. Rolling back cookie jar.");
            jar
        }
    };
    for (key, val) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, val.to_owned());
    }

    Response::from_parts(parts, body)
}
