//! Admin route handlers

pub mod recipes;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::AppState;
use crate::session::{require_admin, require_auth};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/recipes", get(recipes::list_recipes))
        .route("/admin/recipes/new", get(recipes::new_recipe))
        .route("/admin/recipes", post(recipes::create_recipe))
        .route("/admin/recipes/{id}/edit", get(recipes::edit_recipe))
        .route("/admin/recipes/{id}", post(recipes::update_recipe))
        .route("/admin/recipes/{id}/delete", post(recipes::delete_recipe))
        // Layers run bottom-up on the request path: require_auth first,
        // then require_admin
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(require_auth))
}
