//! Auth Session Entity
//!
//! Server-side record behind the session cookie.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_token::SessionId, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> AuthResult<Self> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("session TTL out of range: {ttl}")))?;

        Ok(Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: expires_at.timestamp_millis(),
            created_at: now,
        })
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_active() {
        let session = AuthSession::new(UserId::new(), Duration::hours(1)).unwrap();
        assert!(!session.is_expired());
        assert!(session.expires_at_ms > session.created_at.timestamp_millis());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = AuthSession::new(UserId::new(), Duration::seconds(10)).unwrap();
        assert!(!session.is_expired_at(session.expires_at_ms - 1));
        assert!(session.is_expired_at(session.expires_at_ms));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = AuthSession::new(UserId::new(), Duration::zero()).unwrap();
        assert!(session.is_expired());
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error() {
        let result = AuthSession::new(UserId::new(), Duration::days(100_000_000));
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
