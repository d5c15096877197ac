use thiserror::Error;

/// Failure kinds surfaced by the meal-plan pipeline.
///
/// Every core function returns one of these instead of panicking or leaking
/// transport-library error types past its boundary. The CLI decides what the
/// user sees and whether to offer a retry; the core never retries on its own.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Credential missing or still set to the placeholder sentinel.
    /// Detected before any network call is made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// DNS, connection, or timeout failure while talking to the provider.
    #[error("connection error: {0}")]
    Transport(String),

    /// The provider answered with a non-200 status.
    #[error("API error: {status} - {body}")]
    Provider { status: u16, body: String },

    /// The response text was not valid JSON after fence stripping.
    #[error("failed to parse JSON: {0}")]
    Parse(String),

    /// Valid JSON, but a required key was absent.
    #[error("invalid response structure: missing '{0}'")]
    Structural(String),
}

impl PlanError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlanError::Transport(format!("request timed out: {err}"))
        } else {
            PlanError::Transport(err.to_string())
        }
    }
}
