use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::{set_verbose_logging, ChatClient};
use crate::config::Config;

use super::args::{Cli, Command};
use super::config_cmd;
use super::plan_cmd;
use super::util;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    set_verbose_logging(cli.verbose);

    match cli.command {
        Some(Command::Plan(args)) => {
            let config = Config::load()?;
            plan_cmd::handle_plan(args, &config).await
        }
        Some(Command::Test) => {
            let config = Config::load()?;
            handle_test(&config).await
        }
        Some(Command::Config(args)) => config_cmd::handle_config(args),
        None => show_welcome(),
    }
}

async fn handle_test(config: &Config) -> Result<()> {
    let client = ChatClient::new(&config.llm)?;

    println!(
        "Testing {} connection (up to 10 seconds)...",
        config.llm.provider.display_name()
    );

    let reply = client
        .check_connection(&config.models.planner)
        .await
        .context("Connection test failed")?;

    println!("{} {}", "✅".green(), "API connection successful!".bold());
    println!("Model says: {}", reply.trim());
    Ok(())
}

fn show_welcome() -> Result<()> {
    let config_path = Config::config_path()?;
    let config_exists = config_path.exists();

    println!("🥗 Welcome to mealwise - Your AI Meal Planning Assistant!");
    println!();
    println!("📖 What mealwise does:");
    println!("   • Generates personalized 1- or 3-day meal plans");
    println!("   • Respects dietary profiles and excluded foods");
    println!("   • Derives a categorized grocery list from your plan");
    println!();
    println!("💡 How to use mealwise:");
    println!("   mealwise plan                                  # 3-day plan with defaults");
    println!("   mealwise plan --profile vegetarian --days 1    # one-day vegetarian plan");
    println!("   mealwise plan --exclude 'mushrooms, cilantro'  # keep foods out of every recipe");
    println!("   mealwise plan --meals lunch-dinner --grocery   # skip breakfast, print grocery list");
    println!("   mealwise test                                  # check provider connectivity");
    println!("   mealwise config                                # show current configuration");
    println!("   mealwise config --api-key YOUR_KEY             # set the API key");
    println!();

    if config_exists {
        match Config::load_unvalidated() {
            Ok(config) => {
                println!("📋 Your current configuration:");
                println!(
                    "   Provider: {} ({})",
                    config.llm.provider,
                    config.llm.provider.display_name()
                );
                println!("   Model: {}", config.models.planner);
                println!("   API key: {}", util::mask_api_key(&config.llm.api_key));
                println!("   Timeout: {}s", config.llm.timeout_secs);
                println!();
            }
            Err(_) => {
                println!("⚠️  Configuration exists but couldn't be loaded.");
                println!("   Run: mealwise config");
                println!();
            }
        }
    } else {
        println!("⚠️  No configuration found yet.");
        println!("   Set OPENAI_API_KEY or run: mealwise config --api-key YOUR_KEY");
        println!();
    }

    println!("❓ For more help: mealwise --help");
    Ok(())
}
