use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::LlmProvider;
use crate::preferences::{DietaryProfile, MealsPerDay, PlanDuration};

use super::commands;

/// Entry point for the `mealwise` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "mealwise",
    about = "AI-powered meal planning assistant",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging of LLM requests and responses
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a meal plan from your dietary preferences.
    Plan(PlanArgs),

    /// Check connectivity to the configured LLM provider.
    Test,

    /// Show or update mealwise configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Dietary profile: standard, low-sugar, vegetarian, or gluten-free
    #[arg(short, long, default_value = "standard")]
    pub profile: DietaryProfile,

    /// Comma-separated foods that must not appear in any recipe
    #[arg(short, long, default_value = "")]
    pub exclude: String,

    /// Plan length in days (1 or 3)
    #[arg(short, long, default_value = "3")]
    pub days: PlanDuration,

    /// Meals per day: breakfast-lunch-dinner or lunch-dinner
    #[arg(short, long, default_value = "breakfast-lunch-dinner")]
    pub meals: MealsPerDay,

    /// Override the configured model for this run
    #[arg(long)]
    pub model: Option<String>,

    /// Override the configured max_tokens for this run
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Also print the categorized grocery list
    #[arg(short, long)]
    pub grocery: bool,

    /// Print the parsed plan (and grocery list) as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Set the LLM provider (openai or gemini)
    #[arg(long)]
    pub provider: Option<LlmProvider>,

    /// Set the API key for the active provider
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set the completion token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Set the default model
    #[arg(long)]
    pub model: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
