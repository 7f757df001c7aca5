//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.
//!
//! - `RawPassword`: user input, NFKC normalized, zeroized on drop
//! - `UserPassword`: Argon2id PHC string, safe to store
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::PasswordPolicy;
//!
//! let raw = RawPassword::new("pw1".to_string(), &PasswordPolicy::default()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicy, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, validated against `policy`
    ///
    /// ## Errors
    /// `AppError::bad_request` carrying the message shown next to the field
    pub fn new(raw: String, policy: &PasswordPolicy) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw, policy).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => AppError::bad_request(format!(
                "Le mot de passe doit contenir au moins {min} caractères."
            )),
            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "Le mot de passe ne doit pas dépasser {max} caractères."
            )),
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Ce champ est obligatoire.")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Le mot de passe contient des caractères non autorisés.")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap login input without policy checks; only the stored hash decides
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {msg}"))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|e| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
            .with_source(e)
        })?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// Spend the same work as [`verify`](Self::verify) when there is no
    /// account to check against. Always `false`.
    pub fn verify_absent(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        HashedPassword::verify_dummy(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("pw1".to_string(), &policy()).is_ok());
        assert!(RawPassword::new("".to_string(), &policy()).is_err());
        assert!(RawPassword::new("   ".to_string(), &policy()).is_err());

        use platform::password::MAX_PASSWORD_LENGTH;
        let long_pass = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(RawPassword::new(long_pass, &policy()).is_err());
    }

    #[test]
    fn test_min_length_message() {
        let err = RawPassword::new("abc".to_string(), &PasswordPolicy::with_min_length(8))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains('8'));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("pw1".to_string(), &policy()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));
        assert!(!hashed.verify(&RawPassword::for_login("pw2".to_string()), None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let raw = RawPassword::new("pw1".to_string(), &policy()).unwrap();
        let pepper = b"app_secret_pepper";
        let hashed = UserPassword::from_raw(&raw, Some(pepper)).unwrap();

        assert!(hashed.verify(&raw, Some(pepper)));
        assert!(!hashed.verify(&raw, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("pw1".to_string(), &policy()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));

        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_verify_absent() {
        let raw = RawPassword::for_login("pw1".to_string());
        assert!(!UserPassword::verify_absent(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword".to_string(), &policy()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
