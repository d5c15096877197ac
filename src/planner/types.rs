use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A generated meal plan, keyed by lowercase weekday name.
///
/// Replaced wholesale on regeneration, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub week_plan: BTreeMap<String, DayPlan>,
}

/// Meal-slot name ("breakfast"/"lunch"/"dinner") to recipe.
pub type DayPlan = BTreeMap<String, Recipe>;

/// A single recipe as returned by the model.
///
/// Everything beyond the top-level plan shape is deliberately lenient:
/// missing fields deserialize to defaults and renderers fall back to
/// placeholder text instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Recipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<String>,
}

impl Recipe {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Recipe")
    }

    pub fn display_prep_time(&self) -> &str {
        self.prep_time.as_deref().unwrap_or("N/A")
    }

    pub fn display_protein(&self) -> &str {
        self.protein.as_deref().unwrap_or("N/A")
    }
}
