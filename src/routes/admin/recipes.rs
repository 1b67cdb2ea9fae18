//! Curated recipe management (admin only)
//!
//! These pages drive the privileged `/user-recipes` endpoints of the
//! remote API. Like everything else the state lives server-side; every
//! page load fetches the current list.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use bitewise_api::{ApiError, User, UserRecipe, UserRecipeInput};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use crate::error::AppError;
use crate::routes::auth::first_validation_message;
use crate::routes::{render_template, AppState};
use crate::session::CurrentUser;

/// Admin recipe list template
#[derive(Template)]
#[template(path = "pages/admin/recipes.html")]
struct AdminRecipesTemplate {
    user: Option<User>,
    recipes: Vec<UserRecipe>,
    error: Option<String>,
}

/// Shared create/edit form template
#[derive(Template)]
#[template(path = "pages/admin/recipe-form.html")]
struct AdminRecipeFormTemplate {
    user: Option<User>,
    heading: &'static str,
    action: String,
    recipe: UserRecipeInput,
    error: Option<String>,
}

/// Create/edit form data. Numeric fields arrive as free text and empty
/// inputs are simply dropped; checkboxes submit a value only when set.
#[derive(Deserialize, Validate)]
pub struct UserRecipeForm {
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ready_in_minutes: Option<String>,
    #[serde(default)]
    servings: Option<String>,
    #[serde(default)]
    health_score: Option<String>,
    #[serde(default)]
    price_per_serving: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    categories: Option<String>,
    #[serde(default)]
    vegetarian: Option<String>,
    #[serde(default)]
    vegan: Option<String>,
    #[serde(default)]
    gluten_free: Option<String>,
    #[serde(default)]
    dairy_free: Option<String>,
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl UserRecipeForm {
    fn into_input(self) -> UserRecipeInput {
        UserRecipeInput {
            title: self.title.trim().to_string(),
            summary: none_if_blank(self.summary),
            image: none_if_blank(self.image),
            ready_in_minutes: self.ready_in_minutes.as_deref().and_then(|s| s.parse().ok()),
            servings: self.servings.as_deref().and_then(|s| s.parse().ok()),
            health_score: self.health_score.as_deref().and_then(|s| s.parse().ok()),
            price_per_serving: self
                .price_per_serving
                .as_deref()
                .and_then(|s| s.parse().ok()),
            instructions: none_if_blank(self.instructions),
            categories: self
                .categories
                .map(|raw| {
                    raw.split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            vegetarian: self.vegetarian.is_some(),
            vegan: self.vegan.is_some(),
            gluten_free: self.gluten_free.is_some(),
            dairy_free: self.dairy_free.is_some(),
        }
    }
}

fn input_from(recipe: UserRecipe) -> UserRecipeInput {
    UserRecipeInput {
        title: recipe.title,
        summary: recipe.summary,
        image: recipe.image,
        ready_in_minutes: recipe.ready_in_minutes,
        servings: recipe.servings,
        health_score: recipe.health_score,
        price_per_serving: recipe.price_per_serving,
        instructions: recipe.instructions,
        categories: recipe.categories,
        vegetarian: recipe.vegetarian,
        vegan: recipe.vegan,
        gluten_free: recipe.gluten_free,
        dairy_free: recipe.dairy_free,
    }
}

fn form_page(
    user: User,
    heading: &'static str,
    action: String,
    recipe: UserRecipeInput,
    error: Option<String>,
) -> Response {
    render_template(AdminRecipeFormTemplate {
        user: Some(user),
        heading,
        action,
        recipe,
        error,
    })
}

/// GET /admin/recipes - List all curated recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, AppError> {
    info!(admin_user_id = current.user.id, "Admin listing curated recipes");

    let (recipes, error) = match state.api.user_recipes(&current.token).await {
        Ok(recipes) => (recipes, None),
        Err(e) if e.is_unauthorized() => return Err(AppError::Api(e)),
        Err(e) => {
            error!(error = %e, "Failed to list curated recipes");
            (
                Vec::new(),
                Some("Could not load recipes. Please try again.".to_string()),
            )
        }
    };

    Ok(render_template(AdminRecipesTemplate {
        user: Some(current.user),
        recipes,
        error,
    }))
}

/// GET /admin/recipes/new - Empty create form
pub async fn new_recipe(current: CurrentUser) -> Response {
    form_page(
        current.user,
        "New recipe",
        "/admin/recipes".to_string(),
        UserRecipeInput::default(),
        None,
    )
}

/// POST /admin/recipes - Create a curated recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<UserRecipeForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors, "Please check your input");
        return Ok(form_page(
            current.user,
            "New recipe",
            "/admin/recipes".to_string(),
            form.into_input(),
            Some(message),
        ));
    }

    let input = form.into_input();
    info!(admin_user_id = current.user.id, title = %input.title, "Creating curated recipe");

    match state.api.create_user_recipe(&current.token, &input).await {
        Ok(created) => {
            info!(recipe_id = created.id, "Curated recipe created");
            Ok(Redirect::to("/admin/recipes").into_response())
        }
        Err(ApiError::Rejected { message }) => Ok(form_page(
            current.user,
            "New recipe",
            "/admin/recipes".to_string(),
            input,
            Some(message),
        )),
        Err(e) if e.is_unauthorized() => Err(AppError::Api(e)),
        Err(e) => {
            error!(error = %e, "Failed to create curated recipe");
            Ok(form_page(
                current.user,
                "New recipe",
                "/admin/recipes".to_string(),
                input,
                Some("Could not save the recipe. Please try again.".to_string()),
            ))
        }
    }
}

/// GET /admin/recipes/{id}/edit - Edit form with current values
pub async fn edit_recipe(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let recipe = state.api.user_recipe(&current.token, id).await?;

    Ok(form_page(
        current.user,
        "Edit recipe",
        format!("/admin/recipes/{id}"),
        input_from(recipe),
        None,
    ))
}

/// POST /admin/recipes/{id} - Replace a curated recipe
pub async fn update_recipe(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<u64>,
    Form(form): Form<UserRecipeForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let message = first_validation_message(&errors, "Please check your input");
        return Ok(form_page(
            current.user,
            "Edit recipe",
            format!("/admin/recipes/{id}"),
            form.into_input(),
            Some(message),
        ));
    }

    let input = form.into_input();
    info!(admin_user_id = current.user.id, recipe_id = id, "Updating curated recipe");

    match state
        .api
        .update_user_recipe(&current.token, id, &input)
        .await
    {
        Ok(_) => Ok(Redirect::to("/admin/recipes").into_response()),
        Err(ApiError::Rejected { message }) => Ok(form_page(
            current.user,
            "Edit recipe",
            format!("/admin/recipes/{id}"),
            input,
            Some(message),
        )),
        Err(e) if e.is_unauthorized() => Err(AppError::Api(e)),
        Err(ApiError::NotFound) => Err(AppError::NotFound),
        Err(e) => {
            error!(error = %e, recipe_id = id, "Failed to update curated recipe");
            Ok(form_page(
                current.user,
                "Edit recipe",
                format!("/admin/recipes/{id}"),
                input,
                Some("Could not save the recipe. Please try again.".to_string()),
            ))
        }
    }
}

/// POST /admin/recipes/{id}/delete - Delete a curated recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    info!(admin_user_id = current.user.id, recipe_id = id, "Deleting curated recipe");

    state.api.delete_user_recipe(&current.token, id).await?;

    Ok(Redirect::to("/admin/recipes"))
}
