use thiserror::Error;

/// Failures of a single generation request.
///
/// The `Display` output is what the result pane shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Could not reach the service (DNS, TLS, connection reset, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not finish in time.
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The service answered with a non-success status.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt or the answer was blocked by safety filters.
    #[error("Response blocked: {reason}")]
    Blocked { reason: String },

    /// The answer carried no text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,

    /// The answer could not be parsed.
    #[error("Failed to parse Gemini response: {0}")]
    Parse(String),

    /// The request task died before producing an answer.
    #[error("Request failed unexpectedly: {0}")]
    Internal(String),
}

impl GenerateError {
    /// Short machine-friendly label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::Network(_) => "network",
            GenerateError::Timeout { .. } => "timeout",
            GenerateError::Api { .. } => "api",
            GenerateError::Blocked { .. } => "blocked",
            GenerateError::EmptyResponse => "empty_response",
            GenerateError::Parse(_) => "parse",
            GenerateError::Internal(_) => "internal",
        }
    }
}
