//! User Entity
//!
//! Account identity with its credential. Created on signup, read on login,
//! never updated.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique by canonical form, for login and display)
    pub user_name: UserName,
    /// Contact email (unique, lowercased)
    pub email: Email,
    /// Argon2id hash of the password
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
