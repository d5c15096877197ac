use anyhow::{anyhow, Result};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    let key = config.llm.api_key.trim();
    let provider = config.llm.provider;
    if key.is_empty() || key == provider.key_placeholder() {
        Err(anyhow!(
            "{} API key not configured. Set {} or add it to {}",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        ))
    } else {
        Ok(())
    }
}
