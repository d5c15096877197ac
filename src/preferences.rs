use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

/// Dietary profile selected by the user.
///
/// Labels are normalized once at the CLI boundary; inside the pipeline only
/// the closed enum exists, so each variant maps to exactly one requirement
/// text in the prompt builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryProfile {
    Standard,
    LowSugar,
    Vegetarian,
    GlutenFree,
}

impl DietaryProfile {
    pub const ALL: [DietaryProfile; 4] = [
        DietaryProfile::Standard,
        DietaryProfile::LowSugar,
        DietaryProfile::Vegetarian,
        DietaryProfile::GlutenFree,
    ];

    /// Dietary requirement text embedded verbatim in the prompt.
    pub fn requirement(self) -> &'static str {
        match self {
            DietaryProfile::Standard => {
                "Focus on whole foods, balanced nutrition, lean proteins, whole grains, \
                 and plenty of vegetables. Avoid processed foods."
            }
            DietaryProfile::LowSugar => {
                "Low glycemic index foods only. NO added sugars, NO refined carbohydrates, \
                 NO white bread/pasta/rice. Focus on complex carbs, lean proteins, and \
                 non-starchy vegetables."
            }
            DietaryProfile::Vegetarian => {
                "No meat or fish. Include diverse plant proteins (legumes, tofu, tempeh, \
                 quinoa). Ensure complete proteins and adequate B12, iron, and omega-3 sources."
            }
            DietaryProfile::GlutenFree => {
                "Absolutely NO wheat, barley, rye, or cross-contaminated oats. Use rice, \
                 quinoa, corn, certified gluten-free oats, and other safe grains."
            }
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DietaryProfile::Standard => "Standard Healthy Eating",
            DietaryProfile::LowSugar => "Low-Sugar/Pre-Diabetic Friendly",
            DietaryProfile::Vegetarian => "Vegetarian",
            DietaryProfile::GlutenFree => "Gluten-Free",
        }
    }
}

impl fmt::Display for DietaryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietaryProfile::Standard => write!(f, "standard"),
            DietaryProfile::LowSugar => write!(f, "low-sugar"),
            DietaryProfile::Vegetarian => write!(f, "vegetarian"),
            DietaryProfile::GlutenFree => write!(f, "gluten-free"),
        }
    }
}

impl FromStr for DietaryProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the short flag spellings as well as the decorated labels the
        // interactive form used.
        match s.trim().to_lowercase().as_str() {
            "standard" | "standard healthy eating" => Ok(DietaryProfile::Standard),
            "low-sugar" | "lowsugar" | "low-sugar/pre-diabetic friendly" => {
                Ok(DietaryProfile::LowSugar)
            }
            "vegetarian" => Ok(DietaryProfile::Vegetarian),
            "gluten-free" | "glutenfree" => Ok(DietaryProfile::GlutenFree),
            other => Err(anyhow!(
                "Unknown dietary profile '{other}'. Expected one of: standard, low-sugar, vegetarian, gluten-free"
            )),
        }
    }
}

/// Number of days the generated plan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDuration {
    OneDay,
    ThreeDay,
}

impl PlanDuration {
    /// Day keys the model is asked for and the validator requires, in plan order.
    pub fn day_keys(self) -> &'static [&'static str] {
        match self {
            PlanDuration::OneDay => &["monday"],
            PlanDuration::ThreeDay => &["monday", "tuesday", "wednesday"],
        }
    }

    pub fn day_count(self) -> usize {
        self.day_keys().len()
    }
}

impl fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanDuration::OneDay => write!(f, "1"),
            PlanDuration::ThreeDay => write!(f, "3"),
        }
    }
}

impl FromStr for PlanDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "one" | "one-day" => Ok(PlanDuration::OneDay),
            "3" | "three" | "three-day" => Ok(PlanDuration::ThreeDay),
            other => Err(anyhow!("Unknown plan duration '{other}'. Expected 1 or 3")),
        }
    }
}

/// Which meal slots each day of the plan should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealsPerDay {
    BreakfastLunchDinner,
    LunchDinner,
}

impl MealsPerDay {
    /// Ordered meal-slot names used in the prompt schema and when rendering.
    pub fn slots(self) -> &'static [&'static str] {
        match self {
            MealsPerDay::BreakfastLunchDinner => &["breakfast", "lunch", "dinner"],
            MealsPerDay::LunchDinner => &["lunch", "dinner"],
        }
    }
}

impl fmt::Display for MealsPerDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealsPerDay::BreakfastLunchDinner => write!(f, "breakfast-lunch-dinner"),
            MealsPerDay::LunchDinner => write!(f, "lunch-dinner"),
        }
    }
}

impl FromStr for MealsPerDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast-lunch-dinner" | "bld" | "all" | "breakfast, lunch, dinner" => {
                Ok(MealsPerDay::BreakfastLunchDinner)
            }
            "lunch-dinner" | "ld" | "lunch, dinner" => Ok(MealsPerDay::LunchDinner),
            other => Err(anyhow!(
                "Unknown meals-per-day value '{other}'. Expected breakfast-lunch-dinner or lunch-dinner"
            )),
        }
    }
}

/// The user's dietary profile as collected at the CLI boundary.
#[derive(Debug, Clone)]
pub struct Preferences {
    pub profile: DietaryProfile,
    /// Comma-separated free text; may be empty.
    pub excluded_foods: String,
    pub duration: PlanDuration,
    pub meals: MealsPerDay,
    /// Overrides the configured model when set.
    pub model: Option<String>,
}

impl Preferences {
    pub fn new(profile: DietaryProfile, duration: PlanDuration, meals: MealsPerDay) -> Self {
        Self {
            profile,
            excluded_foods: String::new(),
            duration,
            meals,
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_short_and_decorated_labels() {
        assert_eq!(
            "standard".parse::<DietaryProfile>().unwrap(),
            DietaryProfile::Standard
        );
        assert_eq!(
            "Low-Sugar/Pre-Diabetic Friendly"
                .parse::<DietaryProfile>()
                .unwrap(),
            DietaryProfile::LowSugar
        );
        assert_eq!(
            "Gluten-Free".parse::<DietaryProfile>().unwrap(),
            DietaryProfile::GlutenFree
        );
        assert!("keto".parse::<DietaryProfile>().is_err());
    }

    #[test]
    fn duration_day_keys_match_day_count() {
        assert_eq!(PlanDuration::OneDay.day_keys(), &["monday"]);
        assert_eq!(
            PlanDuration::ThreeDay.day_keys(),
            &["monday", "tuesday", "wednesday"]
        );
        assert_eq!(PlanDuration::OneDay.day_count(), 1);
        assert_eq!(PlanDuration::ThreeDay.day_count(), 3);
    }

    #[test]
    fn meal_slots_are_ordered() {
        assert_eq!(
            MealsPerDay::BreakfastLunchDinner.slots(),
            &["breakfast", "lunch", "dinner"]
        );
        assert_eq!(MealsPerDay::LunchDinner.slots(), &["lunch", "dinner"]);
    }
}
