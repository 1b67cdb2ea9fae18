//! The weekly grid the diet-plan pages render.
//!
//! A plan always covers seven days with three meal slots each. The grid is
//! built empty first and then overlaid with whatever the server returned,
//! so sparse or empty responses still produce every day/meal combination.

use bitewise_api::{PlanEntry, RecipeSummary};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use tracing::warn;

#[derive(
    AsRefStr, Display, EnumString, VariantArray, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn title(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

#[derive(
    AsRefStr, Display, EnumString, VariantArray, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    pub fn title(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
        }
    }
}

/// One cell of the grid. `entry_id` is present iff the slot is persisted
/// on the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MealSlot {
    pub entry_id: Option<u64>,
    pub recipe: Option<RecipeSummary>,
}

impl MealSlot {
    pub fn is_empty(&self) -> bool {
        self.recipe.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MealAssignment {
    pub meal: MealKind,
    pub slot: MealSlot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayPlan {
    pub day: Weekday,
    pub meals: Vec<MealAssignment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeekPlan {
    week: u32,
    days: Vec<DayPlan>,
}

impl WeekPlan {
    /// A full grid with every slot empty, days ordered Monday through
    /// Sunday and meals ordered breakfast, lunch, dinner.
    pub fn empty(week: u32) -> Self {
        let days = Weekday::VARIANTS
            .iter()
            .map(|&day| DayPlan {
                day,
                meals: MealKind::VARIANTS
                    .iter()
                    .map(|&meal| MealAssignment {
                        meal,
                        slot: MealSlot::default(),
                    })
                    .collect(),
            })
            .collect();

        Self { week, days }
    }

    /// Overlay server entries onto an empty grid. Entries naming a day or
    /// meal this grid does not know are skipped, never dropped days.
    pub fn from_entries(week: u32, entries: Vec<PlanEntry>) -> Self {
        let mut plan = Self::empty(week);

        for entry in entries {
            let Ok(day) = entry.day_of_week.parse::<Weekday>() else {
                warn!(
                    entry_id = entry.id,
                    day = %entry.day_of_week,
                    "skipping plan entry with unknown day"
                );
                continue;
            };
            let Ok(meal) = entry.meal_type.parse::<MealKind>() else {
                warn!(
                    entry_id = entry.id,
                    meal = %entry.meal_type,
                    "skipping plan entry with unknown meal"
                );
                continue;
            };

            plan.set_slot(
                day,
                meal,
                MealSlot {
                    entry_id: Some(entry.id),
                    recipe: Some(entry.recipe),
                },
            );
        }

        plan
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn slot(&self, day: Weekday, meal: MealKind) -> &MealSlot {
        &self.days[day as usize].meals[meal as usize].slot
    }

    fn set_slot(&mut self, day: Weekday, meal: MealKind, slot: MealSlot) {
        self.days[day as usize].meals[meal as usize].slot = slot;
    }

    pub fn planned_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|day| day.meals.iter())
            .filter(|assignment| !assignment.slot.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.planned_count() == 0
    }
}
