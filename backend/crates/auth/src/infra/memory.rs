//! In-Memory Repository Implementation
//!
//! Process-local store used by tests and by the web binary when no
//! database is configured. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, session_token::SessionId, user_id::UserId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    sessions: HashMap<SessionId, AuthSession>,
}

/// In-memory auth repository (cheap to clone, shared state)
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.store.read().await.sessions.len()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.store.read().await.users.len()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        // Check and insert under one write lock, like a unique index
        let mut store = self.store.write().await;

        if store
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AuthError::DuplicateUserName);
        }
        if store.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        store.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.store.read().await.users.get(user_id).cloned())
    }

    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let store = self.store.read().await;
        Ok(store.users.values().any(|u| &u.email == email))
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&session.user_id) {
            return Err(AuthError::Internal(format!(
                "session references unknown user {}",
                session.user_id
            )));
        }

        store.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let store = self.store.read().await;
        Ok(store
            .sessions
            .get(session_id)
            .filter(|s| !s.is_expired())
            .cloned())
    }

    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<bool> {
        Ok(self.store.write().await.sessions.remove(session_id).is_some())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut store = self.store.write().await;

        let before = store.sessions.len();
        store.sessions.retain(|_, s| !s.is_expired_at(now_ms));
        let deleted = (before - store.sessions.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}
