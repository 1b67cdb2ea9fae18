//! HTTP client for the remote recipe and account API.
//!
//! Every outbound request of the application goes through [`ApiClient`].
//! Requests are sent exactly once: no retries, no caching. Any transport
//! failure, non-success status, or unexpected payload shape surfaces as an
//! [`ApiError`] to the caller.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::search::SearchQuery;
use crate::types::{
    AuthResponse, DayNutrition, FavoriteStatus, NewPlanEntry, PlanEntry, Recipe, SearchResponse,
    User, UserRecipe, UserRecipeInput,
};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct FavoritesEnvelope {
    favorites: Vec<Recipe>,
}

#[derive(Deserialize)]
struct PlanEnvelope {
    diet_plans: Vec<PlanEntry>,
}

#[derive(Deserialize)]
struct UserRecipesEnvelope {
    user_recipes: Vec<UserRecipe>,
}

#[derive(Deserialize)]
struct UserRecipeEnvelope {
    user_recipe: UserRecipe,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// The base URL is validated here so a bad configuration fails at
    /// startup instead of on the first request.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("bitewise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    fn require_id(value: u64, what: &str) -> Result<(), ApiError> {
        if value == 0 {
            return Err(ApiError::InvalidInput(format!(
                "{what} id must be positive"
            )));
        }
        Ok(())
    }

    fn require_week(week: u32) -> Result<(), ApiError> {
        if week == 0 {
            return Err(ApiError::InvalidInput(
                "week number must be positive".to_string(),
            ));
        }
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ApiError::Rejected {
                    message: rejection_message(&body),
                })
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn expect_success(response: Response) -> Result<(), ApiError> {
        Self::check_status(response).await.map(|_| ())
    }

    // --- recipes (public, no token) ---

    pub async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        debug!(query = %query.query, diet = ?query.diet, "searching recipes");

        let response = self
            .http
            .get(self.endpoint("/recipes/complexSearch"))
            .query(&query.params())
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub async fn recipe_detail(&self, id: u64) -> Result<Recipe, ApiError> {
        Self::require_id(id, "recipe")?;

        let response = self
            .http
            .get(self.endpoint(&format!("/recipes/{id}/information")))
            .send()
            .await?;

        Self::read_json(response).await
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let payload = json!({
            "email": email,
            "password": password,
        });

        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&payload)
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let payload = json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password,
        });

        let response = self
            .http
            .post(self.endpoint("/auth/register"))
            .json(&payload)
            .send()
            .await?;

        Self::read_json(response).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = Self::authed(self.http.post(self.endpoint("/auth/logout")), token)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Validate a stored token by fetching the account it belongs to.
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let response = Self::authed(self.http.get(self.endpoint("/auth/user")), token)
            .send()
            .await?;

        let envelope: UserEnvelope = Self::read_json(response).await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(
        &self,
        token: &str,
        name: &str,
        email: &str,
    ) -> Result<User, ApiError> {
        let payload = json!({
            "name": name,
            "email": email,
        });

        let response = Self::authed(self.http.put(self.endpoint("/auth/user")), token)
            .json(&payload)
            .send()
            .await?;

        let envelope: UserEnvelope = Self::read_json(response).await?;
        Ok(envelope.user)
    }

    // --- favorites ---

    pub async fn favorites(&self, token: &str) -> Result<Vec<Recipe>, ApiError> {
        let response = Self::authed(self.http.get(self.endpoint("/favorites")), token)
            .send()
            .await?;

        let envelope: FavoritesEnvelope = Self::read_json(response).await?;
        Ok(envelope.favorites)
    }

    pub async fn toggle_favorite(
        &self,
        token: &str,
        recipe_id: u64,
    ) -> Result<FavoriteStatus, ApiError> {
        Self::require_id(recipe_id, "recipe")?;

        let response = Self::authed(
            self.http
                .post(self.endpoint(&format!("/favorites/toggle/{recipe_id}"))),
            token,
        )
        .send()
        .await?;

        Self::read_json(response).await
    }

    pub async fn check_favorite(&self, token: &str, recipe_id: u64) -> Result<bool, ApiError> {
        Self::require_id(recipe_id, "recipe")?;

        let response = Self::authed(
            self.http
                .get(self.endpoint(&format!("/favorites/check/{recipe_id}"))),
            token,
        )
        .send()
        .await?;

        let status: FavoriteStatus = Self::read_json(response).await?;
        Ok(status.favorited)
    }

    pub async fn add_favorite(&self, token: &str, recipe_id: u64) -> Result<(), ApiError> {
        Self::require_id(recipe_id, "recipe")?;

        let response = Self::authed(
            self.http
                .post(self.endpoint(&format!("/favorites/{recipe_id}"))),
            token,
        )
        .send()
        .await?;

        Self::expect_success(response).await
    }

    pub async fn remove_favorite(&self, token: &str, recipe_id: u64) -> Result<(), ApiError> {
        Self::require_id(recipe_id, "recipe")?;

        let response = Self::authed(
            self.http
                .delete(self.endpoint(&format!("/favorites/{recipe_id}"))),
            token,
        )
        .send()
        .await?;

        Self::expect_success(response).await
    }

    // --- diet plans ---

    pub async fn diet_plan(&self, token: &str, week: u32) -> Result<Vec<PlanEntry>, ApiError> {
        Self::require_week(week)?;

        let response = Self::authed(self.http.get(self.endpoint("/diet-plans")), token)
            .query(&[("week", week.to_string())])
            .send()
            .await?;

        let envelope: PlanEnvelope = Self::read_json(response).await?;
        Ok(envelope.diet_plans)
    }

    pub async fn add_to_diet_plan(&self, token: &str, entry: &NewPlanEntry) -> Result<(), ApiError> {
        Self::require_id(entry.recipe_id, "recipe")?;
        Self::require_week(entry.week_number)?;

        let response = Self::authed(self.http.post(self.endpoint("/diet-plans")), token)
            .json(entry)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    pub async fn remove_from_diet_plan(&self, token: &str, entry_id: u64) -> Result<(), ApiError> {
        Self::require_id(entry_id, "plan entry")?;

        let response = Self::authed(
            self.http
                .delete(self.endpoint(&format!("/diet-plans/{entry_id}"))),
            token,
        )
        .send()
        .await?;

        Self::expect_success(response).await
    }

    pub async fn clear_diet_plan(&self, token: &str, week: u32) -> Result<(), ApiError> {
        Self::require_week(week)?;

        let response = Self::authed(self.http.delete(self.endpoint("/diet-plans/clear")), token)
            .query(&[("week", week.to_string())])
            .send()
            .await?;

        Self::expect_success(response).await
    }

    pub async fn day_nutrition(
        &self,
        token: &str,
        day: &str,
        week: u32,
    ) -> Result<DayNutrition, ApiError> {
        Self::require_week(week)?;

        let response = Self::authed(
            self.http
                .get(self.endpoint(&format!("/diet-plans/nutrition/{day}"))),
            token,
        )
        .query(&[("week", week.to_string())])
        .send()
        .await?;

        Self::read_json(response).await
    }

    // --- curated recipes (privileged) ---

    pub async fn user_recipes(&self, token: &str) -> Result<Vec<UserRecipe>, ApiError> {
        let response = Self::authed(self.http.get(self.endpoint("/user-recipes")), token)
            .send()
            .await?;

        let envelope: UserRecipesEnvelope = Self::read_json(response).await?;
        Ok(envelope.user_recipes)
    }

    pub async fn user_recipe(&self, token: &str, id: u64) -> Result<UserRecipe, ApiError> {
        Self::require_id(id, "recipe")?;

        let response = Self::authed(
            self.http.get(self.endpoint(&format!("/user-recipes/{id}"))),
            token,
        )
        .send()
        .await?;

        let envelope: UserRecipeEnvelope = Self::read_json(response).await?;
        Ok(envelope.user_recipe)
    }

    pub async fn create_user_recipe(
        &self,
        token: &str,
        input: &UserRecipeInput,
    ) -> Result<UserRecipe, ApiError> {
        let response = Self::authed(self.http.post(self.endpoint("/user-recipes")), token)
            .json(input)
            .send()
            .await?;

        let envelope: UserRecipeEnvelope = Self::read_json(response).await?;
        Ok(envelope.user_recipe)
    }

    pub async fn update_user_recipe(
        &self,
        token: &str,
        id: u64,
        input: &UserRecipeInput,
    ) -> Result<UserRecipe, ApiError> {
        Self::require_id(id, "recipe")?;

        let response = Self::authed(
            self.http.put(self.endpoint(&format!("/user-recipes/{id}"))),
            token,
        )
        .json(input)
        .send()
        .await?;

        let envelope: UserRecipeEnvelope = Self::read_json(response).await?;
        Ok(envelope.user_recipe)
    }

    pub async fn delete_user_recipe(&self, token: &str, id: u64) -> Result<(), ApiError> {
        Self::require_id(id, "recipe")?;

        let response = Self::authed(
            self.http
                .delete(self.endpoint(&format!("/user-recipes/{id}"))),
            token,
        )
        .send()
        .await?;

        Self::expect_success(response).await
    }
}

fn rejection_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Rejection {
        message: String,
    }

    serde_json::from_str::<Rejection>(body)
        .map(|r| r.message)
        .unwrap_or_else(|_| "The request was rejected".to_string())
}
