use anyhow::{anyhow, Context, Result};
use std::env;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("MEALWISE_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse MEALWISE_PROVIDER value '{provider_raw}'"))?;
        // Switching providers also resets the base URL and default model;
        // MEALWISE_MODEL below still wins when set.
        if builder.llm.provider != provider {
            builder = builder
                .with_llm(|llm| {
                    llm.provider = provider;
                    llm.base_url = provider.default_base_url().to_string();
                })
                .with_models(|models| {
                    models.planner = provider.default_model().to_string();
                });
        }
    }

    if let Some(base_url) = env_string("MEALWISE_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url.clone());
    }

    if let Some(api_key) = env_string("OPENAI_API_KEY")? {
        builder = builder.with_llm(|llm| {
            if llm.provider == LlmProvider::OpenAi {
                llm.api_key = api_key.clone();
            }
        });
    }

    if let Some(api_key) = env_string("GEMINI_API_KEY")? {
        builder = builder.with_llm(|llm| {
            if llm.provider == LlmProvider::Gemini {
                llm.api_key = api_key.clone();
            }
        });
    }

    if let Some(timeout) = env_u64("MEALWISE_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(max_tokens) = env_u32("MEALWISE_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(model) = env_string("MEALWISE_MODEL")? {
        builder = builder.with_models(|models| models.planner = model);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("Failed to parse {key} as u32"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
