//! HTTP Handlers
//!
//! Server-rendered pages. Successful POSTs answer `303 See Other`;
//! recoverable failures re-render the form with the field errors.

use axum::extract::{Extension, Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SessionUser, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{HomePage, SignInForm, SignInPage, SignUpForm, SignUpPage};
use crate::presentation::form::{FormErrors, validate_sign_up};
use crate::presentation::middleware::AuthStatus;
use crate::presentation::view::Views;

pub const SIGN_UP_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/connexion";
pub const HOME_PATH: &str = "/acceuil";
pub const SIGN_OUT_PATH: &str = "/deconnexion";

/// Flash cookie value set after a successful sign up
const FLASH_ACCOUNT_CREATED: &str = "account_created";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub views: Arc<Views>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /
pub async fn sign_up_page<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    if status.is_authenticated() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    Ok(state.views.sign_up(&SignUpPage::default())?.into_response())
}

/// POST /
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<SignUpForm>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let errors = validate_sign_up(&form, &state.config.password_policy());
    if !errors.is_empty() {
        return render_sign_up(&state.views, form, errors, StatusCode::BAD_REQUEST);
    }

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        user_name: form.username.clone(),
        email: form.email.clone(),
        password: form.password1.clone(),
    };

    match use_case.execute(input).await {
        Ok(_) => {
            let flash = set_cookie_header(&state.config.flash_cookie(), FLASH_ACCOUNT_CREATED);
            Ok(([(header::SET_COOKIE, flash)], Redirect::to(SIGN_IN_PATH)).into_response())
        }
        Err(e) if e.is_user_recoverable() => {
            e.log();
            let status = e.status_code();
            render_sign_up(&state.views, form, FormErrors::from_auth_error(&e), status)
        }
        Err(e) => Err(e),
    }
}

fn render_sign_up(
    views: &Views,
    form: SignUpForm,
    errors: FormErrors,
    status: StatusCode,
) -> AuthResult<Response> {
    let page = SignUpPage {
        username: form.username,
        email: form.email,
        errors,
    };

    Ok((status, views.sign_up(&page)?).into_response())
}

// ============================================================================
// Sign In
// ============================================================================

/// GET /connexion
pub async fn sign_in_page<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    if status.is_authenticated() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    let flash_cookie = state.config.flash_cookie();
    let flash = extract_cookie(&headers, &flash_cookie.name);

    let page = SignInPage {
        flash: flash.as_deref().and_then(flash_message),
        ..Default::default()
    };
    let html = state.views.sign_in(&page)?;

    // Shown once
    if flash.is_some() {
        let clear = delete_cookie_header(&flash_cookie);
        return Ok(([(header::SET_COOKIE, clear)], html).into_response());
    }

    Ok(html.into_response())
}

/// POST /connexion
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<SignInForm>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        user_name: form.username.clone(),
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = set_cookie_header(
                &state.config.session_cookie(),
                output.session_token.as_str(),
            );
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to(HOME_PATH)).into_response())
        }
        Err(e) if e.is_user_recoverable() => {
            e.log();
            let page = SignInPage {
                username: form.username,
                flash: None,
                errors: FormErrors::from_auth_error(&e),
            };
            Ok((e.status_code(), state.views.sign_in(&page)?).into_response())
        }
        Err(e) => Err(e),
    }
}

fn flash_message(value: &str) -> Option<&'static str> {
    match value {
        FLASH_ACCOUNT_CREATED => Some("Compte créé. Connectez-vous."),
        _ => None,
    }
}

// ============================================================================
// Home (requires authentication)
// ============================================================================

/// GET /acceuil
pub async fn home<R>(
    State(state): State<AuthAppState<R>>,
    Extension(user): Extension<SessionUser>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let page = HomePage {
        user_name: user.user_name.to_string(),
    };

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        state.views.home(&page)?,
    )
        .into_response())
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /deconnexion
pub async fn sign_out<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let session_cookie = state.config.session_cookie();
    let token = extract_cookie(&headers, &session_cookie.name);

    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    // The cookie is cleared whatever happens to the stored session
    if let Err(e) = use_case.execute(token.as_deref()).await {
        e.log();
    }

    let clear = delete_cookie_header(&session_cookie);
    ([(header::SET_COOKIE, clear)], Redirect::to(SIGN_IN_PATH)).into_response()
}
