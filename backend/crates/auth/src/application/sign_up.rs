//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input (raw form values)
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(&input.user_name)
            .map_err(|e| AuthError::invalid_input("user_name", e))?;

        let email =
            Email::new(&input.email).map_err(|e| AuthError::invalid_input("email", e.message()))?;

        let raw_password = RawPassword::new(input.password, &self.config.password_policy())
            .map_err(|e| AuthError::invalid_input("password", e.message()))?;

        // Pre-checks give the friendly error; the storage constraint is
        // what actually serializes concurrent signups.
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::DuplicateUserName);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, email, password_hash);

        self.user_repo.create_user(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            user_name: user.user_name,
        })
    }
}
