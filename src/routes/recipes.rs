//! Recipe browsing, search, and detail pages

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use bitewise_api::{shape_query, Recipe, RecipeSummary, SearchFilters, User};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{render_template, AppState};
use crate::error::AppError;
use crate::session::Session;

/// Category chips shown on the browse page. Some translate to a diet
/// filter, the rest are plain query terms.
pub const CATEGORIES: &[&str] = &[
    "all",
    "healthy",
    "chicken",
    "noodle",
    "pasta",
    "fish",
    "vegetarian",
    "vegan",
    "gluten-free",
    "low-carb",
    "keto",
];

#[derive(Template)]
#[template(path = "pages/recipes.html")]
struct RecipesPageTemplate {
    user: Option<User>,
    categories: &'static [&'static str],
    selected_category: String,
    q: String,
    cuisine: String,
    max_time: String,
    results: Vec<RecipeSummary>,
    total_results: u64,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/recipe-detail.html")]
struct RecipeDetailTemplate {
    user: Option<User>,
    recipe: Recipe,
    favorited: Option<bool>,
}

/// Browse/search query parameters
#[derive(Deserialize)]
pub struct RecipesQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    max_time: Option<String>,
}

/// GET /recipes - Browse by category or run a filtered search
pub async fn get_recipes(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RecipesQuery>,
) -> Response {
    let category = params.category.unwrap_or_default();
    let q = params.q.unwrap_or_default();
    let cuisine = params.cuisine.unwrap_or_default();
    let max_time = params.max_time.unwrap_or_default();

    let filters = SearchFilters {
        category: category.clone(),
        text: q.clone(),
        cuisine: (!cuisine.is_empty()).then(|| cuisine.clone()),
        max_ready_time: max_time.parse().ok(),
    };
    let query = shape_query(&filters);

    info!(category = %category, query = %query.query, "browsing recipes");

    let (results, total_results, error) = match state.api.search_recipes(&query).await {
        Ok(response) => (response.results, response.total_results, None),
        Err(e) => {
            error!(error = %e, "recipe search failed");
            (
                Vec::new(),
                0,
                Some("Could not load recipes. Please try again.".to_string()),
            )
        }
    };

    render_template(RecipesPageTemplate {
        user: session.user,
        categories: CATEGORIES,
        selected_category: if category.is_empty() {
            "all".to_string()
        } else {
            category
        },
        q,
        cuisine,
        max_time,
        results,
        total_results,
        error,
    })
}

/// GET /recipes/{id} - Recipe detail page
///
/// The id arrives as a path string; anything that is not a positive
/// number is a 404, not a request to the API.
pub async fn get_recipe_detail(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: u64 = id.parse().map_err(|_| AppError::NotFound)?;
    if id == 0 {
        return Err(AppError::NotFound);
    }

    let recipe = state.api.recipe_detail(id).await?;

    let favorited = match &session.token {
        Some(token) => match state.api.check_favorite(token, id).await {
            Ok(favorited) => Some(favorited),
            Err(e) => {
                warn!(error = %e, recipe_id = id, "favorite check failed");
                None
            }
        },
        None => None,
    };

    Ok(render_template(RecipeDetailTemplate {
        user: session.user,
        recipe,
        favorited,
    }))
}
