//! Defines the token stored in the session cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::{AuthError, UserId};

/// The contents of a session cookie.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Token {
    /// The user the session belongs to.
    pub user_id: UserId,

    /// When the session ends.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Parse a token from the JSON in a cookie value.
    ///
    /// # Errors
    /// Returns an [AuthError::InvalidToken] if `text` is not a valid token or
    /// the user ID is blank.
    pub fn parse(text: &str) -> Result<Self, AuthError> {
        let token: Token =
            serde_json::from_str(text).map_err(|error| AuthError::InvalidToken(error.to_string()))?;

        if token.user_id.as_str().trim().is_empty() {
            return Err(AuthError::InvalidToken("empty user ID".to_owned()));
        }

        Ok(token)
    }

    /// Whether the token is no longer valid at `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}
