//! Resolves the current user from the session cookie issued by the identity provider.
//!
//! The application never verifies credentials itself. An external identity
//! provider that shares the server secret issues an encrypted session cookie,
//! and [resolve_session] turns that cookie into a [UserId] for each request.

mod cookie;
mod middleware;
mod token;
mod user;

pub use cookie::{COOKIE_SESSION, DEFAULT_COOKIE_DURATION, set_session_cookie};
pub use middleware::resolve_session;
pub use user::UserId;

pub(crate) use token::Token;

/// The reasons a session cookie may fail to produce a user.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthError {
    /// There was no session cookie in the request.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// The session cookie could not be decoded into a token.
    #[error("the session token is malformed: {0}")]
    InvalidToken(String),

    /// The session token has expired.
    #[error("the session token has expired")]
    Expired,

    /// The session expiry could not be computed.
    #[error("could not compute the session expiry")]
    DateError,
}
