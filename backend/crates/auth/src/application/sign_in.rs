//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    session_token::SessionToken,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed token for the session cookie
    pub session_token: SessionToken,
    pub user_id: UserId,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
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

    /// Unknown user, malformed input and wrong password all end in
    /// `InvalidCredentials` after one Argon2 verification.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let raw_password = RawPassword::for_login(input.password);

        let user = match UserName::new(&input.user_name) {
            Ok(user_name) => self.user_repo.find_user_by_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            UserPassword::verify_absent(&raw_password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession::new(user.user_id, self.config.session_ttl_chrono())?;
        self.session_repo.create_session(&session).await?;

        let session_token = SessionToken::sign(&session.session_id, &self.config.session_secret);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            user_id: user.user_id,
        })
    }
}
