//! Auth Middleware
//!
//! Session resolution for page routes, and the same-origin check on
//! form submissions.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{HOST, ORIGIN};
use axum::http::{HeaderMap, Request, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::{CheckSessionUseCase, SessionUser};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::{AuthAppState, SIGN_IN_PATH};

/// Authentication status stored in request extensions
#[derive(Debug, Clone, Default)]
pub struct AuthStatus {
    pub user: Option<SessionUser>,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

async fn resolve_session<R>(
    state: &AuthAppState<R>,
    headers: &HeaderMap,
) -> AuthResult<Option<SessionUser>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case.execute(token.as_deref()).await
}

/// Middleware that requires a valid auth session
///
/// Anonymous requests are redirected to the sign in page; authenticated
/// ones carry a [`SessionUser`] extension.
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let user = resolve_session(&state, req.headers())
        .await
        .map_err(IntoResponse::into_response)?;

    let Some(user) = user else {
        tracing::debug!(path = %req.uri().path(), "Anonymous request redirected to sign in");
        return Err(Redirect::to(SIGN_IN_PATH).into_response());
    };

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Middleware that checks the auth session but doesn't require it
///
/// Stores an [`AuthStatus`] for downstream handlers. Storage failures are
/// logged and the request continues as anonymous.
pub async fn check_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let user = match resolve_session(&state, req.headers()).await {
        Ok(user) => user,
        Err(e) => {
            e.log();
            None
        }
    };

    req.extensions_mut().insert(AuthStatus { user });

    next.run(req).await
}

/// Middleware that rejects state-changing requests coming from another site
///
/// Browsers attach `Sec-Fetch-Site` and `Origin` to form posts; either one
/// pointing elsewhere than this host fails with 403 before the handler
/// runs. Requests carrying neither header (non-browser clients) pass.
pub async fn require_same_origin(req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    if !req.method().is_safe() {
        check_same_origin(req.headers())?;
    }
    Ok(next.run(req).await)
}

fn check_same_origin(headers: &HeaderMap) -> AuthResult<()> {
    if let Some(site) = headers.get("sec-fetch-site")
        && !matches!(site.to_str(), Ok("same-origin" | "none"))
    {
        tracing::debug!(sec_fetch_site = ?site, "Form post from another site");
        return Err(AuthError::CrossOriginRequest);
    }

    let mut origins = headers.get_all(ORIGIN).iter();
    let Some(origin) = origins.next() else {
        return Ok(());
    };
    if origins.next().is_some() {
        return Err(AuthError::CrossOriginRequest);
    }

    let origin_authority = origin
        .to_str()
        .ok()
        .and_then(|value| value.parse::<Uri>().ok())
        .and_then(|uri| uri.authority().map(|a| a.as_str().to_ascii_lowercase()));
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase);

    match (origin_authority, host) {
        (Some(origin), Some(host)) if origin == host => Ok(()),
        (origin, host) => {
            tracing::debug!(?origin, ?host, "Origin does not match host");
            Err(AuthError::CrossOriginRequest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_same_origin_accepted() {
        assert!(check_same_origin(&headers(&[
            ("host", "app.example:8000"),
            ("origin", "http://app.example:8000"),
        ]))
        .is_ok());
        assert!(check_same_origin(&headers(&[
            ("host", "App.Example"),
            ("origin", "https://app.example"),
            ("sec-fetch-site", "same-origin"),
        ]))
        .is_ok());
    }

    #[test]
    fn test_headerless_request_accepted() {
        assert!(check_same_origin(&headers(&[("host", "app.example")])).is_ok());
    }

    #[test]
    fn test_foreign_origin_rejected() {
        for pairs in [
            &[("host", "app.example"), ("origin", "https://evil.example")][..],
            &[("host", "app.example"), ("origin", "null")][..],
            &[("origin", "https://app.example")][..],
            &[("host", "app.example"), ("sec-fetch-site", "cross-site")][..],
            &[("host", "app.example"), ("sec-fetch-site", "same-site")][..],
            &[
                ("host", "app.example"),
                ("origin", "https://app.example"),
                ("origin", "https://evil.example"),
            ][..],
        ] {
            assert!(
                matches!(
                    check_same_origin(&headers(pairs)),
                    Err(AuthError::CrossOriginRequest)
                ),
                "{pairs:?} should be rejected"
            );
        }
    }
}
