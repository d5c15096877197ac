use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{LlmProvider, LlmSettings, CONNECTION_TEST_TIMEOUT_SECS};
use crate::error::PlanError;

static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn set_verbose_logging(enabled: bool) {
    VERBOSE_LOGGING.store(enabled, Ordering::Relaxed);
}

fn verbose_logging() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// HTTP client for the configured LLM provider.
///
/// OpenAI is wired end-to-end for plan generation; Gemini is supported for
/// the connectivity check only. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    provider: LlmProvider,
}

impl ChatClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, PlanError> {
        let key = settings.api_key.trim();
        if key.is_empty() || key == settings.provider.key_placeholder() {
            return Err(PlanError::Configuration(format!(
                "{} API key not configured. Set {} and try again.",
                settings.provider.display_name(),
                settings.provider.api_key_env_var()
            )));
        }

        let timeout = Duration::from_secs(settings.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlanError::Configuration(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: key.to_string(),
            user_agent: settings.user_agent.clone(),
            provider: settings.provider,
        })
    }

    /// One blocking chat-completion call. 200 yields the parsed body;
    /// any other status becomes `PlanError::Provider` with status and body.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, PlanError> {
        if self.provider != LlmProvider::OpenAi {
            return Err(PlanError::Configuration(format!(
                "{} does not support meal plan generation yet. Switch the provider to openai.",
                self.provider.display_name()
            )));
        }

        let url = format!("{}/chat/completions", self.base_url);

        if verbose_logging() {
            eprintln!("[mealwise] POST {url}");
            if let Ok(body) = serde_json::to_string_pretty(&request) {
                eprintln!("[mealwise] request body:\n{body}");
            }
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(PlanError::from_transport)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(PlanError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(PlanError::from_transport)?;
        if verbose_logging() {
            eprintln!("[mealwise] response body:\n{text}");
        }

        serde_json::from_str::<ChatCompletionResponse>(&text)
            .map_err(|err| PlanError::Parse(format!("chat completion response: {err}")))
    }

    /// First completion's message text, returned verbatim (no trimming).
    pub async fn completion_text(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<String, PlanError> {
        let response = self.chat_completion(request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PlanError::Parse("chat completion returned no choices".to_string()))?;
        Ok(choice.message.content)
    }

    /// Lightweight connectivity probe with a short per-request timeout.
    /// Returns the model's one-sentence reply on success.
    pub async fn check_connection(&self, model: &str) -> Result<String, PlanError> {
        const PROBE: &str = "Say hello and confirm you're working. Response in one sentence.";

        match self.provider {
            LlmProvider::OpenAi => {
                let url = format!("{}/chat/completions", self.base_url);
                let body = json!({
                    "model": model,
                    "messages": [{"role": "user", "content": PROBE}],
                    "max_tokens": 50
                });

                let response = self
                    .http
                    .post(&url)
                    .timeout(Duration::from_secs(CONNECTION_TEST_TIMEOUT_SECS))
                    .bearer_auth(&self.api_key)
                    .header("User-Agent", &self.user_agent)
                    .json(&body)
                    .send()
                    .await
                    .map_err(PlanError::from_transport)?;

                let status = response.status();
                if status != reqwest::StatusCode::OK {
                    let body = response.text().await.unwrap_or_default();
                    return Err(PlanError::Provider {
                        status: status.as_u16(),
                        body,
                    });
                }

                let parsed: ChatCompletionResponse = response
                    .json()
                    .await
                    .map_err(|err| PlanError::Parse(format!("connection test response: {err}")))?;
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| {
                        PlanError::Parse("connection test returned no choices".to_string())
                    })
            }
            LlmProvider::Gemini => {
                let url = format!(
                    "{}/models/{model}:generateContent?key={}",
                    self.base_url, self.api_key
                );
                let body = json!({
                    "contents": [{"parts": [{"text": PROBE}]}]
                });

                let response = self
                    .http
                    .post(&url)
                    .timeout(Duration::from_secs(CONNECTION_TEST_TIMEOUT_SECS))
                    .header("Content-Type", "application/json")
                    .header("User-Agent", &self.user_agent)
                    .json(&body)
                    .send()
                    .await
                    .map_err(PlanError::from_transport)?;

                let status = response.status();
                if status != reqwest::StatusCode::OK {
                    let body = response.text().await.unwrap_or_default();
                    return Err(PlanError::Provider {
                        status: status.as_u16(),
                        body,
                    });
                }

                let parsed: GeminiGenerateResponse = response
                    .json()
                    .await
                    .map_err(|err| PlanError::Parse(format!("connection test response: {err}")))?;
                parsed
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|candidate| candidate.content.parts.into_iter().next())
                    .map(|part| part.text)
                    .ok_or_else(|| {
                        PlanError::Parse("connection test returned no candidates".to_string())
                    })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_settings(base_url: String) -> LlmSettings {
        LlmSettings {
            provider: LlmProvider::OpenAi,
            api_key: "test-key".to_string(),
            timeout_secs: 30,
            base_url,
            user_agent: "mealwise/test".to_string(),
        }
    }

    #[test]
    fn new_rejects_placeholder_key() {
        let mut settings = sample_settings("https://api.openai.com/v1".to_string());
        settings.api_key = "YOUR_OPENAI_API_KEY_HERE".to_string();

        let err = ChatClient::new(&settings).unwrap_err();
        assert!(matches!(err, PlanError::Configuration(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn new_rejects_empty_key() {
        let mut settings = sample_settings("https://api.openai.com/v1".to_string());
        settings.api_key = "  ".to_string();

        let err = ChatClient::new(&settings).unwrap_err();
        assert!(matches!(err, PlanError::Configuration(_)));
    }

    #[tokio::test]
    async fn chat_completion_parses_success_response() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("Authorization", "Bearer test-key")
                    .json_body(json!({
                        "model": "gpt-4o-mini",
                        "messages": [
                            {"role": "user", "content": "Hello"}
                        ],
                        "max_tokens": 128,
                        "temperature": 0.7
                    }));

                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "choices": [
                            {
                                "index": 0,
                                "finish_reason": "stop",
                                "message": {
                                    "role": "assistant",
                                    "content": "Hi there!"
                                }
                            }
                        ]
                    }));
            })
            .await;

        let client = ChatClient::new(&sample_settings(server.base_url())).unwrap();
        let response = client
            .chat_completion(ChatCompletionRequest {
                model: "gpt-4o-mini".into(),
                messages: vec![ChatMessage {
                    role: ChatMessageRole::User,
                    content: "Hello".into(),
                }],
                max_tokens: Some(128),
                temperature: Some(0.7),
            })
            .await
            .unwrap();

        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Hi there!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_surfaces_provider_error() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401)
                    .header("Content-Type", "application/json")
                    .body(r#"{"error":"invalid_api_key"}"#);
            })
            .await;

        let client = ChatClient::new(&sample_settings(server.base_url())).unwrap();
        let err = client
            .chat_completion(ChatCompletionRequest {
                model: "gpt-4o-mini".into(),
                messages: vec![ChatMessage {
                    role: ChatMessageRole::User,
                    content: "Hello".into(),
                }],
                max_tokens: None,
                temperature: None,
            })
            .await
            .unwrap_err();

        match err {
            PlanError::Provider { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_api_key"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn completion_text_returns_first_choice_verbatim() {
        let server = MockServer::start_async().await;

        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [
                        {
                            "index": 0,
                            "finish_reason": "stop",
                            "message": {
                                "role": "assistant",
                                "content": "  padded reply  "
                            }
                        }
                    ]
                }));
            })
            .await;

        let client = ChatClient::new(&sample_settings(server.base_url())).unwrap();
        let text = client
            .completion_text(ChatCompletionRequest {
                model: "gpt-4o-mini".into(),
                messages: vec![ChatMessage {
                    role: ChatMessageRole::User,
                    content: "Hello".into(),
                }],
                max_tokens: None,
                temperature: None,
            })
            .await
            .unwrap();

        assert_eq!(text, "  padded reply  ");
    }

    #[tokio::test]
    async fn gemini_generation_is_rejected() {
        let mut settings = sample_settings("https://generativelanguage.googleapis.com/v1beta".to_string());
        settings.provider = LlmProvider::Gemini;
        settings.api_key = "gemini-key".to_string();

        let client = ChatClient::new(&settings).unwrap();
        let err = client
            .chat_completion(ChatCompletionRequest {
                model: "gemini-pro".into(),
                messages: vec![],
                max_tokens: None,
                temperature: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlanError::Configuration(_)));
    }

    #[tokio::test]
    async fn check_connection_reads_gemini_candidates() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-pro:generateContent")
                    .query_param("key", "gemini-key");
                then.status(200).json_body(json!({
                    "candidates": [
                        {
                            "content": {
                                "parts": [
                                    {"text": "Hello, I am working."}
                                ]
                            }
                        }
                    ]
                }));
            })
            .await;

        let settings = LlmSettings {
            provider: LlmProvider::Gemini,
            api_key: "gemini-key".to_string(),
            timeout_secs: 30,
            base_url: server.base_url(),
            user_agent: "mealwise/test".to_string(),
        };
        let client = ChatClient::new(&settings).unwrap();

        let reply = client.check_connection("gemini-pro").await.unwrap();
        assert_eq!(reply, "Hello, I am working.");
        mock.assert_async().await;
    }
}
