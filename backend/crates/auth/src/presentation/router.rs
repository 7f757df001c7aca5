//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{
    self, AuthAppState, HOME_PATH, SIGN_IN_PATH, SIGN_OUT_PATH, SIGN_UP_PATH,
};
use crate::presentation::middleware::{
    check_auth_session, require_auth_session, require_same_origin,
};
use crate::presentation::view::Views;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Result<Router, tera::Error> {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Result<Router, tera::Error>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        views: Arc::new(Views::new()?),
    };

    let forms = Router::new()
        .route(
            SIGN_UP_PATH,
            get(handlers::sign_up_page::<R>).post(handlers::sign_up::<R>),
        )
        .route(
            SIGN_IN_PATH,
            get(handlers::sign_in_page::<R>).post(handlers::sign_in::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            check_auth_session::<R>,
        ));

    let protected = Router::new()
        .route(HOME_PATH, get(handlers::home::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth_session::<R>,
        ));

    Ok(Router::new()
        .merge(forms)
        .merge(protected)
        .route(SIGN_OUT_PATH, post(handlers::sign_out::<R>))
        .layer(middleware::from_fn(require_same_origin))
        .with_state(state))
}
