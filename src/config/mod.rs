//! Configuration management for the mealwise CLI.
//!
//! Settings are layered: defaults, then `~/.mealwise/config` (JSON), then
//! environment variable overrides. Validation requires a usable API key and
//! rejects the placeholder sentinels shipped in .env templates.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, LlmProvider, LlmSettings, ModelSettings};

pub use constants::{CONNECTION_TEST_TIMEOUT_SECS, DEFAULT_MAX_TOKENS};

#[cfg(test)]
mod tests;
