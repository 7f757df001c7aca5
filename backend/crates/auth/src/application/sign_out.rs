//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out the session behind `session_token`
    ///
    /// Idempotent: a missing, forged or already deleted token is a no-op.
    /// Only storage failures are reported.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        let Some(token) = session_token else {
            return Ok(());
        };

        let session_id = match SessionToken::verify(token, &self.config.session_secret) {
            Ok(id) => id,
            Err(AuthError::SessionInvalid) => {
                tracing::debug!("Sign out with invalid session token ignored");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if self.session_repo.delete_session(&session_id).await? {
            tracing::info!(session_id = %session_id, "User signed out");
        }

        Ok(())
    }
}
