pub mod client;
pub mod error;
pub mod search;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use search::{shape_query, SearchFilters, SearchQuery, RESULTS_PER_PAGE};
pub use types::{
    AuthResponse, DayNutrition, FavoriteStatus, Ingredient, NewPlanEntry, PlanEntry, Recipe,
    RecipeSummary, SearchResponse, User, UserRecipe, UserRecipeInput,
};
