use anyhow::{Context, Result};
use serde_json::json;

use crate::client::ChatClient;
use crate::config::Config;
use crate::planner::PlanSession;
use crate::preferences::Preferences;

use super::args::PlanArgs;
use super::render;

pub(crate) async fn handle_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let mut preferences = Preferences::new(args.profile, args.days, args.meals);
    preferences.excluded_foods = args.exclude.trim().to_string();
    preferences.model = args.model;

    let model = preferences
        .model
        .clone()
        .unwrap_or_else(|| config.models.planner.clone());
    let max_tokens = args.max_tokens.unwrap_or(config.models.max_tokens);

    let client = ChatClient::new(&config.llm)?;
    let mut session = PlanSession::new(preferences);

    if !args.json {
        println!(
            "Generating your {}-day meal plan with {} (this may take up to {} seconds)...",
            session.preferences().duration,
            model,
            config.llm.timeout_secs
        );
    }

    let plan = session
        .generate(&client, &model, max_tokens)
        .await
        .context("Meal plan generation failed")?
        .clone();

    if args.json {
        let output = if args.grocery {
            json!({
                "meal_plan": plan,
                "grocery_list": session.grocery_list(),
            })
        } else {
            serde_json::to_value(&plan)?
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    render::render_meal_plan(&plan, session.preferences(), config, &model);

    if args.grocery {
        render::render_grocery_list(session.grocery_list());
    }

    Ok(())
}
