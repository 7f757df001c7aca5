//! Presentation Layer
//!
//! HTML handlers, form DTOs and validation, views, router, and middleware.

pub mod dto;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod view;

pub use handlers::AuthAppState;
pub use middleware::{AuthStatus, check_auth_session, require_auth_session, require_same_origin};
pub use router::{auth_router, auth_router_generic};
