use colored::Colorize;

use crate::config::Config;
use crate::grocery::GroceryList;
use crate::planner::MealPlan;
use crate::preferences::Preferences;

pub(crate) fn render_meal_plan(
    plan: &MealPlan,
    preferences: &Preferences,
    config: &Config,
    model: &str,
) {
    println!();
    println!("{}", "=== Your Meal Plan ===".bold());
    println!(
        "Provider: {} | Model: {}",
        config.llm.provider.display_name(),
        model
    );
    println!("Profile: {}", preferences.profile.display_name());
    if !preferences.excluded_foods.is_empty() {
        println!("Excluded: {}", preferences.excluded_foods);
    }

    for day in preferences.duration.day_keys() {
        let Some(day_plan) = plan.week_plan.get(*day) else {
            continue;
        };

        println!();
        println!("{}", capitalize(day).bold().green());

        for slot in preferences.meals.slots() {
            let Some(recipe) = day_plan.get(*slot) else {
                continue;
            };

            let calories = recipe
                .calories
                .map(|c| format!("{c} cal"))
                .unwrap_or_else(|| "N/A".to_string());
            println!(
                "  {} {} ({}, {}, {} protein)",
                format!("{}:", capitalize(slot)).bold(),
                recipe.display_name(),
                recipe.display_prep_time(),
                calories,
                recipe.display_protein()
            );

            if !recipe.ingredients.is_empty() {
                println!("    Ingredients: {}", recipe.ingredients.join(", "));
            }
            for (idx, step) in recipe.instructions.iter().enumerate() {
                println!("    {}. {}", idx + 1, step);
            }
        }
    }
    println!();
}

pub(crate) fn render_grocery_list(list: &GroceryList) {
    println!("{}", "=== Grocery List ===".bold());

    if list.is_empty() {
        println!("No ingredients found in the current plan.");
        return;
    }

    for (category, items) in list {
        println!();
        println!("{}", category.to_string().bold().cyan());
        for item in items {
            println!("  • {item}");
        }
    }
    println!();
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
