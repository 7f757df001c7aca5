//! Form Validation
//!
//! Field-by-field validation for the sign up form. Every field is checked
//! so the page can show all problems at once; storage-level conflicts are
//! merged in afterwards with [`FormErrors::add_auth_error`].

use std::collections::BTreeMap;

use platform::password::PasswordPolicy;
use serde::Serialize;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::AuthError;
use crate::presentation::dto::SignUpForm;

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD1: &str = "password1";
pub const FIELD_PASSWORD2: &str = "password2";

pub const PASSWORD_MISMATCH: &str = "Les deux mots de passe ne correspondent pas.";

/// Per-field error messages, plus errors not tied to one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    /// Attach a recoverable use case error to the matching field
    pub fn add_auth_error(&mut self, err: &AuthError) {
        match err {
            AuthError::InvalidInput { field, message } => {
                let field = match *field {
                    "user_name" => FIELD_USERNAME,
                    "password" => FIELD_PASSWORD1,
                    other => other,
                };
                self.add(field, message.clone());
            }
            AuthError::DuplicateUserName => self.add(FIELD_USERNAME, err.to_string()),
            AuthError::DuplicateEmail => self.add(FIELD_EMAIL, err.to_string()),
            _ => self.add_non_field(err.to_string()),
        }
    }

    pub fn from_auth_error(err: &AuthError) -> Self {
        let mut errors = Self::default();
        errors.add_auth_error(err);
        errors
    }
}

/// Validate a sign up submission without touching storage
pub fn validate_sign_up(form: &SignUpForm, policy: &PasswordPolicy) -> FormErrors {
    let mut errors = FormErrors::default();

    if let Err(e) = UserName::new(&form.username) {
        errors.add(FIELD_USERNAME, e.to_string());
    }

    if let Err(e) = Email::new(&form.email) {
        errors.add(FIELD_EMAIL, e.message());
    }

    if let Err(e) = RawPassword::new(form.password1.clone(), policy) {
        errors.add(FIELD_PASSWORD1, e.message());
    }

    if form.password2.is_empty() {
        errors.add(FIELD_PASSWORD2, "Ce champ est obligatoire.");
    } else if form.password1 != form.password2 {
        errors.add(FIELD_PASSWORD2, PASSWORD_MISMATCH);
    }

    errors
}
