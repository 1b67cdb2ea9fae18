//! Per-request session state
//!
//! The session lives on the remote API; locally only the bearer token is
//! kept, in an HTTP-only cookie. Each request rebuilds the session from
//! that token once, in [`middleware::session_middleware`].

pub mod middleware;

use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use bitewise_api::User;

pub use middleware::{require_admin, require_auth, session_middleware};

/// Cookie holding the bearer token
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Session state for the current request. Anonymous requests carry the
/// default value.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn authenticated(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes outside the session middleware see an anonymous session
        Ok(parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for handlers that need a signed-in account. Anonymous
/// requests are redirected to the login page.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub token: String,
    pub user: User,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or_default();

        match (session.token, session.user) {
            (Some(token), Some(user)) => Ok(CurrentUser { token, user }),
            _ => Err(Redirect::to("/login")),
        }
    }
}
