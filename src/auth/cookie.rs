//! Defines functions for reading and writing the session cookie.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{AuthError, Token, UserId},
};

/// The name of the cookie that holds the session token.
pub const COOKIE_SESSION: &str = "session";
/// The default duration a session is extended by after each request.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Add a session cookie for `user_id` to the cookie jar, valid for `duration` from now.
///
/// This is the cookie an identity provider issues after it has verified the
/// user. The jar encrypts the cookie with the server's key, so the token
/// cannot be read or forged by the client.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the token cannot be serialized.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    user_id: UserId,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = Token {
        user_id,
        expires_at: OffsetDateTime::now_utc() + duration,
    };

    add_token_cookie(jar, &token)
}

fn add_token_cookie(jar: PrivateCookieJar, token: &Token) -> Result<PrivateCookieJar, Error> {
    let token_string = serde_json::to_string(token)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, token_string))
            .path("/")
            .expires(token.expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Get the session token from `jar` if it exists and has not expired.
///
/// # Errors
///
/// Returns:
/// - [AuthError::CookieMissing] if there is no session cookie,
/// - [AuthError::InvalidToken] if the cookie does not contain a valid token,
/// - [AuthError::Expired] if the token has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, AuthError> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(AuthError::CookieMissing)?;
    let token = Token::parse(cookie.value_trimmed())?;

    if token.is_expired(OffsetDateTime::now_utc()) {
        return Err(AuthError::Expired);
    }

    Ok(token)
}

/// Set the expiry of the session in `jar` to the latest of UTC now plus
/// `duration` and the token's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns an [AuthError::DateError] if extending the session by `duration`
/// would overflow the date time, or the token could not be serialized.
pub(crate) fn extend_session_if_needed(
    jar: PrivateCookieJar,
    token: Token,
    duration: Duration,
) -> Result<PrivateCookieJar, AuthError> {
    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or(AuthError::DateError)?;

    let token = Token {
        expires_at: max(token.expires_at, new_expiry),
        ..token
    };

    add_token_cookie(jar, &token).map_err(|_| AuthError::DateError)
}
