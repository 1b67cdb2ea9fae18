//! Route handlers and shared application state

pub mod about;
pub mod admin;
pub mod assets;
pub mod auth;
pub mod diet_plan;
pub mod favorites;
pub mod health;
pub mod home;
pub mod recipes;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use bitewise_api::ApiClient;
use bitewise_plan::Planner;

use crate::config::Config;
use crate::error::AppError;

// Re-export route handlers
pub use about::get_about;
pub use admin::admin_routes;
pub use assets::AssetsService;
pub use auth::{
    get_login, get_profile, get_register, post_login, post_logout, post_profile, post_register,
};
pub use diet_plan::{get_diet_plan, post_plan_add, post_plan_clear, post_plan_remove};
pub use favorites::{get_favorites, post_favorite_remove, post_favorite_toggle};
pub use health::health;
pub use home::get_home;
pub use recipes::{get_recipe_detail, get_recipes};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub planner: Planner,
    pub config: Config,
}

/// Helper to render templates
pub(crate) fn render_template<T: Template>(t: T) -> Response {
    match t.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}

/// Fallback for unknown paths
pub async fn fallback() -> AppError {
    AppError::NotFound
}
