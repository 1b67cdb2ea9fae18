//! Session reconstruction and route guards

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use tracing::{debug, warn};

use super::{Session, AUTH_COOKIE_NAME};
use crate::routes::AppState;

/// Rebuild the session from the auth cookie, once per request.
///
/// A stored token is validated with a single `current_user` call. Any
/// failure (expired, revoked, API down) drops to an anonymous session
/// and removes the cookie from the response; the request itself still
/// proceeds.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(AUTH_COOKIE_NAME) else {
        request.extensions_mut().insert(Session::default());
        return next.run(request).await;
    };

    let token = cookie.value().to_string();

    match state.api.current_user(&token).await {
        Ok(user) => {
            debug!(user_id = user.id, "session restored from cookie");
            request
                .extensions_mut()
                .insert(Session::authenticated(token, user));
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "stored token rejected, clearing session cookie");
            request.extensions_mut().insert(Session::default());
            let jar = jar.remove(Cookie::from(AUTH_COOKIE_NAME));
            (jar, next.run(request).await).into_response()
        }
    }
}

/// Guard for routes that need a signed-in user
pub async fn require_auth(request: Request, next: Next) -> Result<Response, Response> {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .unwrap_or_default();

    if !session.is_authenticated() {
        warn!(path = %request.uri().path(), "anonymous request to protected route");
        return Err(Redirect::to("/login").into_response());
    }

    Ok(next.run(request).await)
}

/// Guard for routes that need an admin account
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .unwrap_or_default();

    if !session.is_admin() {
        warn!(path = %request.uri().path(), "non-admin request to admin route");
        return Err(Redirect::to("/").into_response());
    }

    Ok(next.run(request).await)
}
