//! Wire types for the remote recipe and account API.
//!
//! Recipe search and detail payloads come through in camelCase, the
//! account/plan endpoints use snake_case. Each response is deserialized
//! into these types at the client boundary; a payload that does not
//! match the expected shape is an error, never a partially-filled value.

use serde::{Deserialize, Serialize};

/// Full recipe as returned by `GET /recipes/{id}/information`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub price_per_serving: Option<f64>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: u64,
    pub original: String,
}

/// Compact recipe used in search results and plan slots.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response of `GET /recipes/complexSearch`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<RecipeSummary>,
    #[serde(default)]
    pub total_results: u64,
}

/// Account as returned inside auth responses and `GET /auth/user`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
}

/// One persisted slot assignment from `GET /diet-plans`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlanEntry {
    pub id: u64,
    pub day_of_week: String,
    pub meal_type: String,
    pub week_number: u32,
    pub recipe: RecipeSummary,
}

/// Body of `POST /diet-plans`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlanEntry {
    pub recipe_id: u64,
    pub day_of_week: String,
    pub meal_type: String,
    pub week_number: u32,
}

/// Aggregated nutrition for one day of the plan.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DayNutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbohydrates: f64,
}

/// Response of the favorite toggle and check endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FavoriteStatus {
    pub favorited: bool,
}

/// Curated recipe managed through the privileged `/user-recipes` endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub price_per_serving: Option<f64>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
}

/// Body of `POST /user-recipes` and `PUT /user-recipes/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserRecipeInput {
    pub title: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub health_score: Option<f64>,
    pub price_per_serving: Option<f64>,
    pub instructions: Option<String>,
    pub categories: Vec<String>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}
