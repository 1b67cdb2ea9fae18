//! Write-then-refetch mediation between the grid and the remote API.

use bitewise_api::{ApiClient, NewPlanEntry};
use tracing::{debug, info};

use crate::error::PlanError;
use crate::week::{MealKind, WeekPlan, Weekday};

/// Runs every diet-plan operation against the server.
///
/// The plan is never updated optimistically: each mutation issues the
/// write and then reloads the whole week, and the reloaded grid is the
/// only state callers ever see. A failed write returns an error without
/// reloading, leaving the caller's last known grid untouched.
#[derive(Clone)]
pub struct Planner {
    api: ApiClient,
}

impl Planner {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn load(&self, token: &str, week: u32) -> Result<WeekPlan, PlanError> {
        let entries = self.api.diet_plan(token, week).await?;
        Ok(WeekPlan::from_entries(week, entries))
    }

    pub async fn add_recipe(
        &self,
        token: &str,
        week: u32,
        day: Weekday,
        meal: MealKind,
        recipe_id: u64,
    ) -> Result<WeekPlan, PlanError> {
        let entry = NewPlanEntry {
            recipe_id,
            day_of_week: day.to_string(),
            meal_type: meal.to_string(),
            week_number: week,
        };

        self.api.add_to_diet_plan(token, &entry).await?;
        info!(recipe_id, day = %day, meal = %meal, week, "recipe added to plan");

        self.load(token, week).await
    }

    /// Remove a slot's entry. A slot that was never persisted has no
    /// entry id; removing it is a local no-op and `None` is returned
    /// without sending any request.
    pub async fn remove_entry(
        &self,
        token: &str,
        week: u32,
        entry_id: Option<u64>,
    ) -> Result<Option<WeekPlan>, PlanError> {
        let Some(entry_id) = entry_id else {
            debug!(week, "slot has no server entry, nothing to remove");
            return Ok(None);
        };

        self.api.remove_from_diet_plan(token, entry_id).await?;
        info!(entry_id, week, "plan entry removed");

        Ok(Some(self.load(token, week).await?))
    }

    pub async fn clear_all(&self, token: &str, week: u32) -> Result<WeekPlan, PlanError> {
        self.api.clear_diet_plan(token, week).await?;
        info!(week, "plan cleared");

        self.load(token, week).await
    }
}
