pub mod error;
pub mod planner;
pub mod week;

pub use error::PlanError;
pub use planner::Planner;
pub use week::{DayPlan, MealAssignment, MealKind, MealSlot, WeekPlan, Weekday};
