//! Form DTOs (Data Transfer Objects)
//!
//! Field names follow the HTML forms (`application/x-www-form-urlencoded`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::presentation::form::FormErrors;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up form submission
#[derive(Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password1", &"[REDACTED]")
            .field("password2", &"[REDACTED]")
            .finish()
    }
}

/// Template context for the sign up page
///
/// Passwords are never echoed back.
#[derive(Debug, Default, Serialize)]
pub struct SignUpPage {
    pub username: String,
    pub email: String,
    pub errors: FormErrors,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in form submission
#[derive(Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Template context for the sign in page
#[derive(Debug, Default, Serialize)]
pub struct SignInPage {
    pub username: String,
    /// One-shot message carried over from the previous redirect
    pub flash: Option<&'static str>,
    pub errors: FormErrors,
}

// ============================================================================
// Home
// ============================================================================

/// Template context for the protected home page
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub user_name: String,
}
