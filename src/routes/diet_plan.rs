//! Weekly diet plan pages
//!
//! The grid is never mutated locally: every change goes to the API and
//! the page always shows a freshly loaded week. Even when loading fails
//! the full 7x3 grid renders, empty, with an error banner.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use axum_extra::extract::Form;
use bitewise_api::{DayNutrition, User};
use bitewise_plan::{MealKind, WeekPlan, Weekday};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{render_template, AppState};
use crate::error::AppError;
use crate::session::CurrentUser;

#[derive(Template)]
#[template(path = "pages/diet-plan.html")]
struct DietPlanTemplate {
    user: Option<User>,
    plan: WeekPlan,
    selected_day: Option<Weekday>,
    nutrition: Option<DayNutrition>,
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct DietPlanQuery {
    #[serde(default)]
    week: Option<String>,
    #[serde(default)]
    day: Option<String>,
}

#[derive(Deserialize)]
pub struct AddPlanForm {
    recipe_id: String,
    day: String,
    meal: String,
    #[serde(default)]
    week: Option<String>,
}

#[derive(Deserialize)]
pub struct RemovePlanForm {
    #[serde(default)]
    entry_id: Option<String>,
    #[serde(default)]
    week: Option<String>,
}

#[derive(Deserialize)]
pub struct ClearPlanForm {
    #[serde(default)]
    week: Option<String>,
}

fn parse_week(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse().ok()).filter(|w| *w >= 1).unwrap_or(1)
}

/// Load the week's grid. API failures fall back to an empty grid with a
/// banner; a rejected token is never absorbed.
async fn load_week(
    state: &AppState,
    token: &str,
    week: u32,
) -> Result<(WeekPlan, Option<String>), AppError> {
    match state.planner.load(token, week).await {
        Ok(plan) => Ok((plan, None)),
        Err(e) if e.is_unauthorized() => Err(AppError::Plan(e)),
        Err(e) => {
            error!(error = %e, week, "failed to load diet plan");
            Ok((
                WeekPlan::empty(week),
                Some("Could not load your diet plan. Please try again.".to_string()),
            ))
        }
    }
}

async fn render_plan(
    state: &AppState,
    current: &CurrentUser,
    plan: WeekPlan,
    selected_day: Option<Weekday>,
    error: Option<String>,
) -> Response {
    let nutrition = match selected_day {
        Some(day) => {
            match state
                .api
                .day_nutrition(&current.token, day.as_ref(), plan.week())
                .await
            {
                Ok(nutrition) => Some(nutrition),
                Err(e) => {
                    warn!(error = %e, day = %day, "day nutrition unavailable");
                    None
                }
            }
        }
        None => None,
    };

    render_template(DietPlanTemplate {
        user: Some(current.user.clone()),
        plan,
        selected_day,
        nutrition,
        error,
    })
}

/// GET /diet-plan - The weekly grid, with an optional per-day nutrition panel
pub async fn get_diet_plan(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<DietPlanQuery>,
) -> Result<Response, AppError> {
    let week = parse_week(params.week.as_deref());
    let selected_day = params.day.and_then(|d| d.parse::<Weekday>().ok());

    let (plan, error) = load_week(&state, &current.token, week).await?;

    Ok(render_plan(&state, &current, plan, selected_day, error).await)
}

/// POST /diet-plan/add - Put a recipe in a slot, then show the refreshed week
pub async fn post_plan_add(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<AddPlanForm>,
) -> Result<Response, AppError> {
    let week = parse_week(form.week.as_deref());
    let recipe_id: u64 = form
        .recipe_id
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid recipe".to_string()))?;
    let day: Weekday = form
        .day
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid day".to_string()))?;
    let meal: MealKind = form
        .meal
        .parse()
        .map_err(|_| AppError::ValidationError("Invalid meal".to_string()))?;

    info!(recipe_id, day = %day, meal = %meal, week, "adding recipe to plan");

    match state
        .planner
        .add_recipe(&current.token, week, day, meal, recipe_id)
        .await
    {
        Ok(plan) => Ok(render_plan(&state, &current, plan, None, None).await),
        Err(e) if e.is_unauthorized() => Err(AppError::Plan(e)),
        Err(e) => {
            error!(error = %e, recipe_id, "failed to add recipe to plan");
            let (plan, _) = load_week(&state, &current.token, week).await?;
            Ok(render_plan(
                &state,
                &current,
                plan,
                None,
                Some("Could not add the recipe to your plan. Please try again.".to_string()),
            )
            .await)
        }
    }
}

/// POST /diet-plan/remove - Empty one slot, then show the refreshed week
///
/// A slot that was never persisted posts no entry id; the planner skips
/// the write for those and the current week is simply reloaded.
pub async fn post_plan_remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<RemovePlanForm>,
) -> Result<Response, AppError> {
    let week = parse_week(form.week.as_deref());
    let entry_id = form.entry_id.as_deref().and_then(|s| s.parse::<u64>().ok());

    match state
        .planner
        .remove_entry(&current.token, week, entry_id)
        .await
    {
        Ok(Some(plan)) => Ok(render_plan(&state, &current, plan, None, None).await),
        Ok(None) => {
            let (plan, error) = load_week(&state, &current.token, week).await?;
            Ok(render_plan(&state, &current, plan, None, error).await)
        }
        Err(e) if e.is_unauthorized() => Err(AppError::Plan(e)),
        Err(e) => {
            error!(error = %e, ?entry_id, "failed to remove plan entry");
            let (plan, _) = load_week(&state, &current.token, week).await?;
            Ok(render_plan(
                &state,
                &current,
                plan,
                None,
                Some("Could not remove the recipe. Please try again.".to_string()),
            )
            .await)
        }
    }
}

/// POST /diet-plan/clear - Wipe the whole week, then show it refreshed
pub async fn post_plan_clear(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<ClearPlanForm>,
) -> Result<Response, AppError> {
    let week = parse_week(form.week.as_deref());

    match state.planner.clear_all(&current.token, week).await {
        Ok(plan) => Ok(render_plan(&state, &current, plan, None, None).await),
        Err(e) if e.is_unauthorized() => Err(AppError::Plan(e)),
        Err(e) => {
            error!(error = %e, week, "failed to clear plan");
            let (plan, _) = load_week(&state, &current.token, week).await?;
            Ok(render_plan(
                &state,
                &current,
                plan,
                None,
                Some("Could not clear your plan. Please try again.".to_string()),
            )
            .await)
        }
    }
}
