//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed form field; the message is shown next to the field
    #[error("{message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// User name already exists (canonical comparison)
    #[error("Un utilisateur avec ce nom existe déjà.")]
    DuplicateUserName,

    /// Email already registered
    #[error("Cet email est déjà utilisé.")]
    DuplicateEmail,

    /// Unknown user name or wrong password; the two are indistinguishable
    #[error("Nom d’utilisateur ou mot de passe invalide.")]
    InvalidCredentials,

    /// State-changing request sent from another site
    #[error("Requête refusée : le formulaire provient d’un autre site.")]
    CrossOriginRequest,

    /// Session token malformed, forged, unknown or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_input(field: &'static str, message: impl fmt::Display) -> Self {
        AuthError::InvalidInput {
            field,
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AuthError::DuplicateUserName | AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::CrossOriginRequest => StatusCode::FORBIDDEN,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput { .. } => ErrorKind::BadRequest,
            AuthError::DuplicateUserName | AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::CrossOriginRequest => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the form can be re-rendered with this error
    pub fn is_user_recoverable(&self) -> bool {
        !self.kind().is_server_error()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CrossOriginRequest => {
                tracing::warn!("Cross-origin form submission rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::invalid_input("email", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::DuplicateUserName.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::CrossOriginRequest.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(AuthError::InvalidCredentials.is_user_recoverable());
        assert!(AuthError::DuplicateEmail.is_user_recoverable());
        assert!(!AuthError::Internal("boom".into()).is_user_recoverable());
    }

    #[test]
    fn test_invalid_input_displays_message() {
        let err = AuthError::invalid_input("user_name", "Ce champ est obligatoire.");
        assert_eq!(err.to_string(), "Ce champ est obligatoire.");
        assert!(matches!(err, AuthError::InvalidInput { field: "user_name", .. }));
    }

    #[test]
    fn test_server_error_response_hides_details() {
        let response = AuthError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
