use crate::preferences::Preferences;

pub(crate) const NUTRITIONIST_SYSTEM_PROMPT: &str =
    "You are a professional nutritionist. Always respond with valid JSON only.";

/// Builds the natural-language prompt for one plan generation.
///
/// Total over any `Preferences` value: every enum variant resolves through a
/// fixed lookup, and the embedded example schema mirrors the `MealPlan` shape
/// for exactly the requested meal slots and day count.
pub fn build_prompt(preferences: &Preferences) -> String {
    let dietary_requirements = preferences.profile.requirement();

    let excluded = preferences.excluded_foods.trim();
    let excluded_foods = if excluded.is_empty() { "None" } else { excluded };

    let meal_list = preferences.meals.slots();
    let day_count = preferences.duration.day_count();

    format!(
        r#"You are a professional nutritionist creating a personalized {day_count}-day meal plan.

DIETARY REQUIREMENTS:
{dietary_requirements}

EXCLUDED FOODS (must not appear in any recipe):
{excluded_foods}

MEALS NEEDED PER DAY:
{meals}

Create a complete {day_count}-day meal plan following these rules:
1. Use ONLY whole, non-processed ingredients
2. Each recipe should be completable in 45 minutes or less
3. Provide variety - no recipe should repeat
4. Include complete nutritional balance for each day
5. Recipes should be practical for busy professionals

Return ONLY a valid JSON object with this exact structure (no additional text):
{schema}

Remember: Return ONLY the JSON object, no explanations or markdown formatting."#,
        meals = meal_list.join(", "),
        schema = example_schema(meal_list, preferences.duration.day_keys()),
    )
}

/// Example JSON shape embedded in the prompt, parameterized by the meal
/// slots and day keys. The first day is spelled out in full; remaining days
/// reference the same structure, matching how the model is expected to fill
/// them in.
fn example_schema(meal_list: &[&str], day_keys: &[&str]) -> String {
    let slots = meal_list
        .iter()
        .map(|meal| {
            format!(
                r#""{meal}": {{"name": "Recipe Name", "prep_time": "X minutes", "ingredients": ["ingredient 1", "ingredient 2"], "instructions": ["step 1", "step 2"], "calories": 000, "protein": "00g"}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut days = Vec::with_capacity(day_keys.len());
    for (idx, day) in day_keys.iter().enumerate() {
        if idx == 0 {
            days.push(format!("    \"{day}\": {{\n      {slots}\n    }}"));
        } else {
            days.push(format!("    \"{day}\": {{ ... same structure ... }}"));
        }
    }

    format!("{{\n  \"week_plan\": {{\n{}\n  }}\n}}", days.join(",\n"))
}
