use anyhow::Result;

use crate::config::Config;

use super::args::ConfigArgs;
use super::util::mask_api_key;

pub(crate) fn handle_config(args: ConfigArgs) -> Result<()> {
    let mut config = Config::load_unvalidated()?;

    let has_updates = args.provider.is_some()
        || args.api_key.is_some()
        || args.timeout.is_some()
        || args.max_tokens.is_some()
        || args.model.is_some();

    if let Some(provider) = args.provider {
        if config.llm.provider != provider {
            config.llm.provider = provider;
            config.llm.base_url = provider.default_base_url().to_string();
            if args.model.is_none() {
                config.models.planner = provider.default_model().to_string();
            }
        }
    }

    if let Some(api_key) = args.api_key {
        config.llm.api_key = api_key;
    }

    if let Some(timeout) = args.timeout {
        config.llm.timeout_secs = timeout;
    }

    if let Some(max_tokens) = args.max_tokens {
        config.models.max_tokens = max_tokens;
    }

    if let Some(model) = args.model {
        config.models.planner = model;
    }

    if has_updates {
        config.save()?;
        println!(
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        );
    }

    println!("📋 Current configuration:");
    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Base URL: {}", config.llm.base_url);
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("   Model: {}", config.models.planner);

    if config.validate().is_err() {
        println!(
            "⚠️  {} API key is not configured. Set {} or run 'mealwise config --api-key YOUR_KEY'.",
            config.llm.provider.display_name(),
            config.llm.provider.api_key_env_var()
        );
    }

    Ok(())
}
