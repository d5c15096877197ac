use crate::error::PlanError;
use crate::preferences::PlanDuration;

use super::types::MealPlan;

/// Removes a wrapping markdown code fence if present, then trims.
///
/// The prompt forbids fences but models emit them anyway, so stripping is
/// part of the parsing contract rather than a best-effort hack.
pub(crate) fn strip_code_fences(input: &str) -> &str {
    let mut cleaned = input.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }

    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim()
}

/// Parses raw model output into a `MealPlan`.
///
/// Structural checks stop at the top level: `week_plan` must exist and must
/// contain every day key implied by `duration`. Recipe contents are not
/// validated; consumers tolerate missing fields via display fallbacks.
pub fn parse_meal_plan(raw: &str, duration: PlanDuration) -> Result<MealPlan, PlanError> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|err| PlanError::Parse(err.to_string()))?;

    let week_plan = value
        .get("week_plan")
        .ok_or_else(|| PlanError::Structural("week_plan".to_string()))?;

    for day in duration.day_keys() {
        if week_plan.get(day).is_none() {
            return Err(PlanError::Structural(day.to_string()));
        }
    }

    serde_json::from_value(value).map_err(|err| PlanError::Parse(err.to_string()))
}
