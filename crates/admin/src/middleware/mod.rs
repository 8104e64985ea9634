//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Security headers
//! 5. Session layer (tower-sessions, in-memory store)
//!
//! Authentication is enforced per handler by the [`RequireSession`]
//! extractor rather than a route layer.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{CookieFlagStore, CookieGate, CurrentSession, RequireSession, SessionRejection};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
