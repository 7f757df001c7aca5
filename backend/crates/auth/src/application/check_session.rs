//! Check Session Use Case
//!
//! Resolves a session token to the user it belongs to. Read-only: expired
//! sessions are left for the startup cleanup.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    session_token::{SessionId, SessionToken},
    user_id::UserId,
    user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

/// Identity attached to an authenticated request
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: UserId,
    pub user_name: UserName,
    pub session_id: SessionId,
}

/// Check session use case
pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Return the signed-in user, or `None` for an anonymous request
    ///
    /// Invalid, unknown and expired tokens, and sessions whose user is
    /// gone, are all anonymous. Only storage failures are errors.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<Option<SessionUser>> {
        match self.get_user(session_token).await {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::SessionInvalid) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, session_token: Option<&str>) -> AuthResult<SessionUser> {
        let token = session_token.ok_or(AuthError::SessionInvalid)?;
        let session_id = SessionToken::verify(token, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_session(&session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            return Err(AuthError::SessionInvalid);
        }

        let user = self
            .user_repo
            .find_user_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok(SessionUser {
            user_id: user.user_id,
            user_name: user.user_name,
            session_id,
        })
    }
}
