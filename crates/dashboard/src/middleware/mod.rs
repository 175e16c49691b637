//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, `PostgreSQL` store in production)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    RequireAuth, clear_auth_session, current_auth_session, load_context, set_auth_session,
    set_flash, store_context, take_flash,
};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
