//! Meal-plan generation pipeline: prompt construction, one chat-completion
//! call, fence stripping, and structural validation of the reply.

mod parsing;
mod prompt;
mod session;
mod types;

pub use parsing::parse_meal_plan;
pub use prompt::build_prompt;
pub use session::PlanSession;
pub use types::{DayPlan, MealPlan, Recipe};

use crate::client::{ChatClient, ChatCompletionRequest, ChatMessage, ChatMessageRole};
use crate::error::PlanError;
use crate::preferences::Preferences;

use prompt::NUTRITIONIST_SYSTEM_PROMPT;

/// Generation temperature. Fixed; recipe variety comes from the prompt,
/// not from sampling knobs.
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Runs the full pipeline once: build prompt, call the model, parse.
/// Never retries; every failure maps to one `PlanError` kind.
pub async fn generate_meal_plan(
    client: &ChatClient,
    preferences: &Preferences,
    model: &str,
    max_tokens: u32,
) -> Result<MealPlan, PlanError> {
    let prompt = build_prompt(preferences);

    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: ChatMessageRole::System,
                content: NUTRITIONIST_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: ChatMessageRole::User,
                content: prompt,
            },
        ],
        max_tokens: Some(max_tokens),
        temperature: Some(GENERATION_TEMPERATURE),
    };

    let response_text = client.completion_text(request).await?;
    parse_meal_plan(&response_text, preferences.duration)
}
