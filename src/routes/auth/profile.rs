//! Profile route handlers

use askama::Template;
use axum::{extract::State, response::Response};
use axum_extra::extract::Form;
use bitewise_api::{ApiError, User};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use super::first_validation_message;
use crate::error::AppError;
use crate::routes::{render_template, AppState};
use crate::session::CurrentUser;

/// Profile page template
#[derive(Template)]
#[template(path = "pages/auth/profile.html")]
struct ProfilePageTemplate {
    user: Option<User>,
    name: String,
    email: String,
    success: Option<String>,
    error: Option<String>,
}

/// Profile form data
#[derive(Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Name is required"))]
    name: String,
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
}

fn profile_page(
    user: User,
    name: String,
    email: String,
    success: Option<String>,
    error: Option<String>,
) -> Response {
    render_template(ProfilePageTemplate {
        user: Some(user),
        name,
        email,
        success,
        error,
    })
}

/// GET /profile - Show the account form
pub async fn get_profile(current: CurrentUser) -> Response {
    let name = current.user.name.clone();
    let email = current.user.email.clone();
    profile_page(current.user, name, email, None, None)
}

/// POST /profile - Replace the account's name and email
pub async fn post_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors, "Please check your input");
        return Ok(profile_page(
            current.user,
            form.name,
            form.email,
            None,
            Some(message),
        ));
    }

    info!(user_id = current.user.id, "Processing profile update");

    match state
        .api
        .update_profile(&current.token, &form.name, &form.email)
        .await
    {
        Ok(updated) => {
            info!(user_id = updated.id, "Profile updated successfully");
            let name = updated.name.clone();
            let email = updated.email.clone();
            Ok(profile_page(
                updated,
                name,
                email,
                Some("Profile updated successfully!".to_string()),
                None,
            ))
        }
        Err(ApiError::Rejected { message }) => Ok(profile_page(
            current.user,
            form.name,
            form.email,
            None,
            Some(message),
        )),
        Err(e) if e.is_unauthorized() => Err(AppError::Api(e)),
        Err(e) => {
            error!(error = %e, "Profile update failed");
            Ok(profile_page(
                current.user,
                form.name,
                form.email,
                None,
                Some("Failed to update profile. Please try again.".to_string()),
            ))
        }
    }
}
