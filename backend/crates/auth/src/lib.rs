//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTML handlers, forms, views, router
//!
//! ## Features
//! - Sign up with user name, email and confirmed password
//! - Sign in with user name + password
//! - Server-side sessions referenced by a signed cookie
//! - Protected home page; anonymous visitors are redirected to sign in
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (per-password salt, optional pepper)
//! - Unknown user names and wrong passwords fail identically
//! - Session cookie is HttpOnly, SameSite=Lax and HMAC-signed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
