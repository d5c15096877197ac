pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const CONNECTION_TEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_KEY_PLACEHOLDER: &str = "YOUR_OPENAI_API_KEY_HERE";
pub const GEMINI_KEY_PLACEHOLDER: &str = "YOUR_GEMINI_API_KEY_HERE";
