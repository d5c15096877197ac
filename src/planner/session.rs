use crate::client::ChatClient;
use crate::error::PlanError;
use crate::grocery::{build_grocery_list, GroceryList};
use crate::preferences::Preferences;

use super::generate_meal_plan;
use super::types::MealPlan;

/// Per-session pipeline state: the user's preferences plus the most recent
/// plan and its derived grocery list. One session owns its data outright, so
/// concurrent sessions never share anything.
#[derive(Debug)]
pub struct PlanSession {
    preferences: Preferences,
    meal_plan: Option<MealPlan>,
    grocery_list: Option<GroceryList>,
}

impl PlanSession {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            meal_plan: None,
            grocery_list: None,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn meal_plan(&self) -> Option<&MealPlan> {
        self.meal_plan.as_ref()
    }

    /// Runs the pipeline and replaces any previous plan wholesale.
    /// The cached grocery list is discarded and recomputed on next request.
    pub async fn generate(
        &mut self,
        client: &ChatClient,
        model: &str,
        max_tokens: u32,
    ) -> Result<&MealPlan, PlanError> {
        let plan = generate_meal_plan(client, &self.preferences, model, max_tokens).await?;
        self.grocery_list = None;
        Ok(self.meal_plan.insert(plan))
    }

    /// Grocery list derived from the current plan, computed on demand.
    /// Returns an empty list when no plan has been generated yet.
    pub fn grocery_list(&mut self) -> &GroceryList {
        self.grocery_list.get_or_insert_with(|| {
            self.meal_plan
                .as_ref()
                .map(build_grocery_list)
                .unwrap_or_default()
        })
    }
}
