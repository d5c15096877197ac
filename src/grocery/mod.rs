//! Derives a categorized shopping list from a meal plan.
//!
//! Ingredient strings are normalized only for matching and deduplication;
//! the original text is what ends up on the list. Categorization is an
//! ordered first-match-wins scan over fixed keyword lists, so an ingredient
//! matching two categories lands in the higher-priority one.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::planner::MealPlan;

/// Fixed category set. Declaration order is the matching priority order and,
/// via the derived `Ord`, the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GroceryCategory {
    Produce,
    Proteins,
    Dairy,
    #[serde(rename = "Grains & Pantry")]
    GrainsPantry,
    Frozen,
    Other,
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroceryCategory::Produce => write!(f, "Produce"),
            GroceryCategory::Proteins => write!(f, "Proteins"),
            GroceryCategory::Dairy => write!(f, "Dairy"),
            GroceryCategory::GrainsPantry => write!(f, "Grains & Pantry"),
            GroceryCategory::Frozen => write!(f, "Frozen"),
            GroceryCategory::Other => write!(f, "Other"),
        }
    }
}

/// Category to sorted, deduplicated original ingredient strings.
/// Categories with no items are absent entirely.
pub type GroceryList = BTreeMap<GroceryCategory, Vec<String>>;

/// Quantity phrases removed before keyword matching. Plural forms listed
/// first so the singular replacement never leaves a stray "s".
const QUANTITY_PHRASES: &[&str] = &[
    "cups of",
    "cup of",
    "tablespoons of",
    "tablespoon of",
    "tbsp of",
    "teaspoons of",
    "teaspoon of",
    "tsp of",
    "ounces of",
    "ounce of",
    "oz of",
    "pounds of",
    "pound of",
    "lb of",
    "slices of",
    "slice of",
    "pieces of",
    "piece of",
    "cloves of",
    "clove of",
];

/// Keyword lists checked in priority order; first substring match wins.
/// "eggplant" sits in Produce so it never falls through to the "egg" match
/// in Proteins.
const CATEGORY_KEYWORDS: &[(GroceryCategory, &[&str])] = &[
    (
        GroceryCategory::Produce,
        &[
            "spinach", "garlic", "onion", "tomato", "pepper", "lettuce", "kale", "arugula",
            "broccoli", "cauliflower", "carrot", "cucumber", "celery", "zucchini", "squash",
            "mushroom", "avocado", "eggplant", "potato", "cabbage", "asparagus", "green bean",
            "apple", "banana", "berr", "orange", "lemon", "lime", "grape", "mango", "peach",
            "cilantro", "parsley", "basil", "ginger", "mint", "scallion", "leek",
        ],
    ),
    (
        GroceryCategory::Proteins,
        &[
            "chicken", "beef", "steak", "pork", "turkey", "lamb", "salmon", "tuna", "shrimp",
            "fish", "cod", "egg", "tofu", "tempeh", "lentil", "chickpea", "bean", "edamame",
        ],
    ),
    (
        GroceryCategory::Dairy,
        &[
            "milk", "cheese", "yogurt", "butter", "cream", "mozzarella", "parmesan", "feta",
            "cheddar", "ricotta", "ghee",
        ],
    ),
    (
        GroceryCategory::GrainsPantry,
        &[
            "rice", "quinoa", "oat", "bread", "pasta", "noodle", "couscous", "barley",
            "tortilla", "flour", "oil", "vinegar", "honey", "broth", "stock", "soy sauce",
            "salt", "cumin", "paprika", "oregano", "cinnamon", "turmeric", "almond", "walnut",
            "cashew", "peanut", "chia", "flax", "tahini",
        ],
    ),
    (GroceryCategory::Frozen, &["frozen"]),
];

/// Builds the grocery list for a plan. Never fails: an empty or malformed
/// plan yields an empty list. Pure function of its input.
pub fn build_grocery_list(plan: &MealPlan) -> GroceryList {
    let mut seen = HashSet::new();
    let mut buckets: GroceryList = BTreeMap::new();

    for day in plan.week_plan.values() {
        for recipe in day.values() {
            for raw in &recipe.ingredients {
                let normalized = normalize_ingredient(raw);
                if normalized.is_empty() {
                    continue;
                }
                // First-seen original wins when two raw strings normalize
                // identically.
                if !seen.insert(normalized.clone()) {
                    continue;
                }
                let category = categorize(&normalized);
                buckets.entry(category).or_default().push(raw.clone());
            }
        }
    }

    for items in buckets.values_mut() {
        items.sort();
        items.dedup();
    }

    buckets
}

/// Lowercases, strips quantity phrases and leading numeric tokens, and
/// collapses whitespace. Used for matching only; display keeps the original.
fn normalize_ingredient(raw: &str) -> String {
    let mut text = raw.to_lowercase();
    for phrase in QUANTITY_PHRASES {
        text = text.replace(phrase, " ");
    }

    text.split_whitespace()
        .skip_while(|token| is_quantity_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_quantity_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '/' | '.' | '-' | '¼' | '½' | '¾'))
}

fn categorize(normalized: &str) -> GroceryCategory {
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| normalized.contains(keyword)) {
            return *category;
        }
    }
    GroceryCategory::Other
}
