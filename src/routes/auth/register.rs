//! Registration route handlers

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
use tracing::{error, info};
use validator::Validate;

use super::first_validation_message;
use crate::routes::{render_template, AppState};
use crate::session::{Session, AUTH_COOKIE_NAME};

/// Registration page template
#[derive(Template)]
#[template(path = "pages/auth/register.html")]
struct RegisterPageTemplate {
    user: Option<User>,
    error: Option<String>,
    name: String,
    email: String,
}

/// Registration form data
#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    password_confirm: String,
}

fn register_page(name: String, email: String, error: Option<String>) -> Response {
    render_template(RegisterPageTemplate {
        user: None,
        error,
        name,
        email,
    })
}

/// GET /register - Show registration form
pub async fn get_register(session: Session) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    register_page(String::new(), String::new(), None)
}

/// POST /register - Create the account and sign the new user in
pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> (CookieJar, Response) {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors, "Please check your input");
        return (jar, register_page(form.name, form.email, Some(message)));
    }

    info!(email = %form.email, "Processing registration");

    match state
        .api
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(auth) => {
            let cookie = Cookie::build((AUTH_COOKIE_NAME, auth.access_token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .build();

            info!(user_id = auth.user.id, "User registered and logged in");

            (jar.add(cookie), Redirect::to("/").into_response())
        }
        Err(ApiError::Rejected { message }) => {
            (jar, register_page(form.name, form.email, Some(message)))
        }
        Err(e) => {
            error!(error = %e, "Registration request failed");
            (
                jar,
                register_page(
                    form.name,
                    form.email,
                    Some("An error occurred. Please try again.".to_string()),
                ),
            )
        }
    }
}
