use super::*;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

fn env_lock<'a>() -> std::sync::MutexGuard<'a, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

const ALL_VARS: &[&str] = &[
    "HOME",
    "MEALWISE_PROVIDER",
    "MEALWISE_LLM_BASE_URL",
    "MEALWISE_TIMEOUT_SECS",
    "MEALWISE_MAX_TOKENS",
    "MEALWISE_MODEL",
    "OPENAI_API_KEY",
    "GEMINI_API_KEY",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = ALL_VARS
            .iter()
            .map(|key| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            if let Some(val) = value {
                std::env::set_var(key, val);
            }
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => std::env::set_var(key, val),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
fn load_from_env_only() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("OPENAI_API_KEY", Some("env-key")),
        ("MEALWISE_TIMEOUT_SECS", Some("90")),
        ("MEALWISE_MAX_TOKENS", Some("8000")),
        ("MEALWISE_MODEL", Some("gpt-4o")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 90);
    assert_eq!(config.models.max_tokens, 8000);
    assert_eq!(config.models.planner, "gpt-4o");
}

#[test]
fn load_prefers_env_over_file() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();
    let config_dir = temp_home.path().join(".mealwise");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config"),
        r#"{
            "llm": {
                "api_key": "file-key",
                "timeout_secs": 20
            },
            "models": {
                "planner": "file-model",
                "max_tokens": 1024
            }
        }"#,
    )
    .unwrap();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("OPENAI_API_KEY", Some("env-key")),
        ("MEALWISE_TIMEOUT_SECS", Some("45")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 45);
    assert_eq!(config.models.planner, "file-model");
    assert_eq!(config.models.max_tokens, 1024);
}

#[test]
fn load_errors_without_api_key() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("OpenAI API key not configured"));
}

#[test]
fn placeholder_key_is_rejected() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("OPENAI_API_KEY", Some("YOUR_OPENAI_API_KEY_HERE")),
    ]);

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("OpenAI API key not configured"));
}

#[test]
fn provider_switch_updates_base_url_and_model() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[
        ("HOME", Some(home.as_str())),
        ("MEALWISE_PROVIDER", Some("gemini")),
        ("GEMINI_API_KEY", Some("gemini-key")),
    ]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::Gemini);
    assert_eq!(config.llm.api_key, "gemini-key");
    assert!(config.llm.base_url.contains("generativelanguage"));
    assert_eq!(config.models.planner, "gemini-pro");
}

#[test]
fn save_round_trips_through_file() {
    let _lock = env_lock();
    let temp_home = TempDir::new().unwrap();
    let home = temp_home.path().to_str().unwrap().to_string();

    let _env = EnvGuard::new(&[("HOME", Some(home.as_str()))]);

    let config = Config::builder()
        .with_llm(|llm| {
            llm.api_key = "saved-key".to_string();
            llm.timeout_secs = 75;
        })
        .with_models(|models| {
            models.planner = "gpt-4o".to_string();
            models.max_tokens = 6000;
        })
        .build()
        .unwrap();
    config.save().unwrap();

    let loaded = Config::load().unwrap();
    assert_eq!(loaded.llm.api_key, "saved-key");
    assert_eq!(loaded.llm.timeout_secs, 75);
    assert_eq!(loaded.models.planner, "gpt-4o");
    assert_eq!(loaded.models.max_tokens, 6000);
}
