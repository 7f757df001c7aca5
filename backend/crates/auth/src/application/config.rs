//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::{CookieConfig, SameSite};
use platform::password::PasswordPolicy;

/// Default session lifetime: two weeks
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(14 * 24 * 3600);

/// Longest session lifetime accepted: ten years
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Flash message cookie name
    pub flash_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime
    pub session_ttl: Duration,
    /// Whether to set the Secure cookie attribute
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Minimum password length accepted at signup
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sessionid".to_string(),
            flash_cookie_name: "flash".to_string(),
            session_secret: [0u8; 32],
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            password_min_length: platform::password::MIN_PASSWORD_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL, capped at [`MAX_SESSION_TTL`]
    pub fn effective_session_ttl(&self) -> Duration {
        self.session_ttl.min(MAX_SESSION_TTL)
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.effective_session_ttl())
            .unwrap_or_else(|_| chrono::Duration::days(3650))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::with_min_length(self.password_min_length)
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.effective_session_ttl().as_secs()),
        }
    }

    /// Cookie attributes for the one-shot flash message
    pub fn flash_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.flash_cookie_name.clone(),
            max_age_secs: Some(60),
            ..self.session_cookie()
        }
    }
}
