//! Authentication extractors for admin.
//!
//! The session cookie carries a single flag ([`AUTH_FLAG_KEY`]). Handlers
//! receive it as a [`SessionGate`] backed by the cookie session, so login
//! and logout go through the same gate the CLI uses.
//!
//! [`AUTH_FLAG_KEY`]: falcon_core::session::AUTH_FLAG_KEY

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use falcon_core::{FlagStore, SessionGate};
use tower_sessions::Session;

use crate::routes::auth::render_login;

/// [`FlagStore`] over the request's cookie session.
#[derive(Debug, Clone)]
pub struct CookieFlagStore(Session);

impl CookieFlagStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// The underlying cookie session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.0
    }
}

impl FlagStore for CookieFlagStore {
    type Error = tower_sessions::session::Error;

    async fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.0.get::<String>(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.0.insert(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.0.remove::<String>(key).await.map(|_| ())
    }
}

/// Gate type handed to handlers.
pub type CookieGate = SessionGate<CookieFlagStore>;

async fn restore_gate(parts: &Parts) -> Option<CookieGate> {
    let session = parts.extensions.get::<Session>()?.clone();
    Some(SessionGate::restore(CookieFlagStore::new(session)).await)
}

/// Extractor that requires an open session gate.
///
/// When the gate is closed the login screen is rendered in place of the
/// requested one, at the same path.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireSession(gate): RequireSession) -> impl IntoResponse {
///     // gate.is_authenticated() is always true here
/// }
/// ```
pub struct RequireSession(pub CookieGate);

/// Error returned when a restricted screen is requested without a session.
pub enum SessionRejection {
    /// Render the login screen, returning to `next` afterwards.
    Login { next: String },
    /// The session layer is not installed.
    MissingSessionLayer,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Login { next } => render_login(&next, "", None),
            Self::MissingSessionLayer => {
                tracing::error!("Session layer missing from router");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let gate = restore_gate(parts)
            .await
            .ok_or(SessionRejection::MissingSessionLayer)?;

        if gate.is_authenticated() {
            Ok(Self(gate))
        } else {
            Err(SessionRejection::Login {
                next: parts.uri.path().to_owned(),
            })
        }
    }
}

/// Extractor for the session gate in either state.
///
/// Used by the login, logout and fallback handlers.
pub struct CurrentSession(pub CookieGate);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        restore_gate(parts)
            .await
            .map(Self)
            .ok_or(SessionRejection::MissingSessionLayer)
    }
}
