/// Typed session state and the signed session cookie
///
/// The session is the only cross-request state in the system: an optional
/// authenticated user identifier plus pending flash messages. It is held by
/// the client as an HS256-signed token in the `session` cookie and decoded
/// on every request.
///
/// A token that is missing, tampered with, or expired yields a fresh empty
/// session rather than an error; the signature is the integrity boundary.
///
/// Flash messages are one-shot: [`Session::take_flashes`] drains them, and
/// the handler that renders them re-saves the (now empty) session cookie.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::session::{FlashKind, Session};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "an-example-secret-at-least-32-bytes!";
///
/// let mut session = Session::default();
/// session.log_in(42);
/// session.flash(FlashKind::Success, "Logged in!");
///
/// let token = session.encode(secret)?;
/// let mut decoded = Session::decode(&token, secret)?;
/// assert_eq!(decoded.user_id, Some(42));
/// assert_eq!(decoded.take_flashes().len(), 1);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime, matching the original framework default
const SESSION_LIFETIME_DAYS: i64 = 31;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to sign the session token
    #[error("Failed to sign session token: {0}")]
    Encode(String),

    /// Token failed signature or expiry validation
    #[error("Invalid session token: {0}")]
    Decode(String),
}

/// Category of a flash message, mapped to a CSS class when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Danger,
}

impl FlashKind {
    /// CSS class suffix for the rendered alert
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Danger => "danger",
        }
    }
}

/// One-shot user-facing notification, consumed exactly once upon render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Typed session state
///
/// `user_id` present means the request is authenticated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user identifier, if logged in
    pub user_id: Option<i64>,

    /// Pending flash messages, oldest first
    #[serde(default)]
    flash: Vec<Flash>,
}

/// Wire format of the signed token: session state plus standard timestamps
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iat: i64,
    exp: i64,
    user_id: Option<i64>,
    #[serde(default)]
    flash: Vec<Flash>,
}

impl Session {
    /// Marks the session as authenticated for `user_id`
    pub fn log_in(&mut self, user_id: i64) {
        self.user_id = Some(user_id);
    }

    /// Removes the user identifier; always succeeds
    pub fn log_out(&mut self) {
        self.user_id = None;
    }

    /// Whether a user identifier is present
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Queues a flash message for the next rendered page
    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.flash.push(Flash {
            kind,
            message: message.into(),
        });
    }

    /// Drains all pending flash messages
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flash)
    }

    /// Signs the session into a cookie token
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Encode` if signing fails.
    pub fn encode(&self, secret: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_LIFETIME_DAYS)).timestamp(),
            user_id: self.user_id,
            flash: self.flash.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Verifies and decodes a cookie token into a session
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Decode` if the signature is invalid or the
    /// token has expired.
    pub fn decode(token: &str, secret: &str) -> Result<Self, SessionError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| SessionError::Decode(e.to_string()))?;

        Ok(Session {
            user_id: data.claims.user_id,
            flash: data.claims.flash,
        })
    }

    /// Decodes a cookie value, falling back to a fresh session
    ///
    /// A missing, tampered, or expired token is indistinguishable from "not
    /// logged in"; no error is surfaced to the caller.
    pub fn from_token(token: Option<&str>, secret: &str) -> Self {
        match token {
            Some(token) => match Self::decode(token, secret) {
                Ok(session) => session,
                Err(e) => {
                    tracing::debug!("Discarding session cookie: {}", e);
                    Session::default()
                }
            },
            None => Session::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut session = Session::default();
        session.log_in(7);
        session.flash(FlashKind::Success, "Task added successfully!");

        let token = session.encode(SECRET).expect("Encode should succeed");
        let decoded = Session::decode(&token, SECRET).expect("Decode should succeed");

        assert_eq!(decoded.user_id, Some(7));
        assert_eq!(decoded.flash.len(), 1);
        assert_eq!(decoded.flash[0].kind, FlashKind::Success);
    }

    #[test]
    fn test_decode_rejects_tampered_token() {
        let mut session = Session::default();
        session.log_in(7);

        let mut token = session.encode(SECRET).expect("Encode should succeed");
        // Corrupt the signature segment.
        token.pop();
        token.push('A');

        assert!(Session::decode(&token, SECRET).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let session = Session::default();
        let token = session.encode(SECRET).expect("Encode should succeed");

        let other = "another-secret-key-also-32-bytes-long!";
        assert!(Session::decode(&token, other).is_err());
    }

    #[test]
    fn test_from_token_falls_back_to_fresh_session() {
        let session = Session::from_token(Some("garbage"), SECRET);
        assert!(!session.is_authenticated());

        let session = Session::from_token(None, SECRET);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_take_flashes_is_one_shot() {
        let mut session = Session::default();
        session.flash(FlashKind::Danger, "Title is required!");

        let first = session.take_flashes();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message, "Title is required!");

        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_log_out_clears_user() {
        let mut session = Session::default();
        session.log_in(3);
        assert!(session.is_authenticated());

        session.log_out();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id, None);
    }
}
