//! Favorite recipes pages

use askama::Template;
use axum::{
    extract::State,
    response::{Redirect, Response},
};
use axum_extra::extract::Form;
use bitewise_api::{Recipe, User};
use serde::Deserialize;
use tracing::{error, info};

use super::{render_template, AppState};
use crate::error::AppError;
use crate::session::CurrentUser;

#[derive(Template)]
#[template(path = "pages/favorites.html")]
struct FavoritesPageTemplate {
    user: Option<User>,
    favorites: Vec<Recipe>,
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct ToggleFavoriteForm {
    recipe_id: String,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize)]
pub struct RemoveFavoriteForm {
    recipe_id: String,
}

/// Only same-site paths are followed after a toggle
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/recipes",
    }
}

/// GET /favorites - The signed-in user's saved recipes
pub async fn get_favorites(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, AppError> {
    let (favorites, error) = match state.api.favorites(&current.token).await {
        Ok(favorites) => (favorites, None),
        Err(e) if e.is_unauthorized() => return Err(AppError::Api(e)),
        Err(e) => {
            error!(error = %e, "failed to load favorites");
            (
                Vec::new(),
                Some("Could not load your favorites. Please try again.".to_string()),
            )
        }
    };

    Ok(render_template(FavoritesPageTemplate {
        user: Some(current.user),
        favorites,
        error,
    }))
}

/// POST /favorites/toggle - Flip a recipe's favorite state, then return
/// to the page the request came from
pub async fn post_favorite_toggle(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<ToggleFavoriteForm>,
) -> Result<Redirect, AppError> {
    let recipe_id: u64 = form
        .recipe_id
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid recipe".to_string()))?;

    let status = state.api.toggle_favorite(&current.token, recipe_id).await?;
    info!(recipe_id, favorited = status.favorited, "favorite toggled");

    Ok(Redirect::to(safe_next(form.next.as_deref())))
}

/// POST /favorites/remove - Unfavorite from the favorites page
pub async fn post_favorite_remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<RemoveFavoriteForm>,
) -> Result<Redirect, AppError> {
    let recipe_id: u64 = form
        .recipe_id
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid recipe".to_string()))?;

    state.api.remove_favorite(&current.token, recipe_id).await?;
    info!(recipe_id, "favorite removed");

    Ok(Redirect::to("/favorites"))
}
