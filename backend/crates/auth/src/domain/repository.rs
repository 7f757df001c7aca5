//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{
    email::Email, session_token::SessionId, user_id::UserId, user_name::UserName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    ///
    /// Fails with `DuplicateUserName` / `DuplicateEmail` when storage
    /// already holds the canonical user name or the email, even if the
    /// caller's pre-check passed.
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by canonical user name
    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists (canonical comparison)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Store a new session
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find an unexpired session by ID
    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Delete a session; returns whether a row was removed
    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Delete every expired session
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
