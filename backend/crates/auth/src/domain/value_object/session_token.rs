//! Session Token Value Object
//!
//! Cookie form of a session: `<session-id>.<base64url HMAC-SHA256(session-id)>`.
//! The signature is checked before storage is consulted, so forged or
//! truncated tokens never reach the repository.

use kernel::id::{Id, markers};
use platform::crypto;
use std::fmt;

use crate::error::{AuthError, AuthResult};

pub type SessionId = Id<markers::AuthSession>;

/// Signed session token
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Sign a session id with the application secret
    pub fn sign(session_id: &SessionId, secret: &[u8]) -> Self {
        let id = session_id.to_string();
        let tag = crypto::hmac_sha256(secret, id.as_bytes());
        Self(format!("{}.{}", id, crypto::to_base64_url(&tag)))
    }

    /// Verify the signature and extract the session id
    ///
    /// Every malformed shape maps to [`AuthError::SessionInvalid`].
    pub fn verify(token: &str, secret: &[u8]) -> AuthResult<SessionId> {
        let (id, signature_b64) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;

        let signature =
            crypto::from_base64_url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;

        if !crypto::verify_hmac_sha256(secret, id.as_bytes(), &signature) {
            return Err(AuthError::SessionInvalid);
        }

        id.parse().map_err(|_| AuthError::SessionInvalid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_and_verify() {
        let session_id = SessionId::new();
        let token = SessionToken::sign(&session_id, &SECRET);

        assert!(token.as_str().starts_with(&session_id.to_string()));
        assert_eq!(SessionToken::verify(token.as_str(), &SECRET).unwrap(), session_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SessionToken::sign(&SessionId::new(), &SECRET);
        assert!(matches!(
            SessionToken::verify(token.as_str(), &[8u8; 32]),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = SessionToken::sign(&SessionId::new(), &SECRET);
        let (_, signature) = token.as_str().split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);

        assert!(SessionToken::verify(&forged, &SECRET).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for token in ["", "abc", "abc.def", "not-a-uuid.!!!", "."] {
            assert!(
                SessionToken::verify(token, &SECRET).is_err(),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redaction() {
        let session_id = SessionId::new();
        let token = SessionToken::sign(&session_id, &SECRET);
        assert!(!format!("{:?}", token).contains(&session_id.to_string()));
    }
}
