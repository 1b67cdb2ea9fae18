use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use bitewise_api::{ApiError, User};
use bitewise_plan::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Not found")]
    NotFound,
}

impl AppError {
    fn is_unauthorized(&self) -> bool {
        match self {
            AppError::Api(e) => e.is_unauthorized(),
            AppError::Plan(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    error_title: String,
    error_message: String,
    user: Option<User>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A rejected token means the session is gone, not that the page
        // failed. Start a fresh login instead of rendering an error.
        if self.is_unauthorized() {
            return Redirect::to("/login").into_response();
        }

        let (status_code, error_title, error_message) = match self {
            AppError::NotFound | AppError::Api(ApiError::NotFound) => (
                StatusCode::NOT_FOUND,
                "Page Not Found".to_string(),
                "The page or recipe you are looking for does not exist.".to_string(),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error".to_string(),
                msg,
            ),
            AppError::Api(ApiError::InvalidInput(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Request".to_string(),
                msg,
            ),
            AppError::Api(ApiError::Rejected { message }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Request Rejected".to_string(),
                message,
            ),
            AppError::Api(e) => {
                tracing::error!(error = %e, "API request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Plan(e) => {
                tracing::error!(error = %e, "Plan request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        let template = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            error_title,
            error_message,
            user: None,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status_code, "An error occurred").into_response()
            }
        }
    }
}
