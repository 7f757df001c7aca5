//! HTML Views
//!
//! Tera templates compiled into the binary and registered once.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{HomePage, SignInPage, SignUpPage};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("inscription.html", include_str!("../../templates/inscription.html")),
    ("connexion.html", include_str!("../../templates/connexion.html")),
    ("acceuil.html", include_str!("../../templates/acceuil.html")),
];

/// Compiled page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn sign_up(&self, page: &SignUpPage) -> AuthResult<Html<String>> {
        self.render("inscription.html", page)
    }

    pub fn sign_in(&self, page: &SignInPage) -> AuthResult<Html<String>> {
        self.render("connexion.html", page)
    }

    pub fn home(&self, page: &HomePage) -> AuthResult<Html<String>> {
        self.render("acceuil.html", page)
    }

    fn render<T: Serialize>(&self, template: &str, page: &T) -> AuthResult<Html<String>> {
        let context = Context::from_serialize(page)
            .map_err(|e| AuthError::Internal(format!("template context for {template}: {e}")))?;

        self.tera
            .render(template, &context)
            .map(Html)
            .map_err(|e| AuthError::Internal(format!("rendering {template}: {e}")))
    }
}
