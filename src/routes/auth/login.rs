//! Login and logout route handlers

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, Form,
};
use bitewise_api::{ApiError, User};
use serde::Deserialize;
use tracing::{error, info, warn};
use validator::Validate;

use super::first_validation_message;
use crate::routes::{render_template, AppState};
use crate::session::{Session, AUTH_COOKIE_NAME};

/// Login page template
#[derive(Template)]
#[template(path = "pages/auth/login.html")]
struct LoginPageTemplate {
    user: Option<User>,
    error: Option<String>,
    email: String,
}

/// Login form data
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

fn login_page(email: String, error: Option<String>) -> Response {
    render_template(LoginPageTemplate {
        user: None,
        error,
        email,
    })
}

/// GET /login - Show login form
pub async fn get_login(session: Session) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    login_page(String::new(), None)
}

/// POST /login - Handle login submission
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Response) {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors, "Please check your input");
        return (jar, login_page(form.email, Some(message)));
    }

    info!(email = %form.email, "Processing login");

    match state.api.login(&form.email, &form.password).await {
        Ok(auth) => {
            let cookie = Cookie::build((AUTH_COOKIE_NAME, auth.access_token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .build();

            info!(user_id = auth.user.id, "User logged in successfully");

            (jar.add(cookie), Redirect::to("/").into_response())
        }
        Err(ApiError::Rejected { message }) => (jar, login_page(form.email, Some(message))),
        Err(ApiError::Unauthorized) => (
            jar,
            login_page(form.email, Some("Invalid email or password".to_string())),
        ),
        Err(e) => {
            error!(error = %e, "Login request failed");
            (
                jar,
                login_page(
                    form.email,
                    Some("An error occurred. Please try again.".to_string()),
                ),
            )
        }
    }
}

/// POST /logout - End the remote session and clear the cookie
///
/// The remote call is best effort: whatever it returns, the cookie is
/// removed and the user lands on the home page signed out.
pub async fn post_logout(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(token) = &session.token {
        if let Err(e) = state.api.logout(token).await {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
    }

    let jar = jar.remove(Cookie::from(AUTH_COOKIE_NAME));
    (jar, Redirect::to("/"))
}
