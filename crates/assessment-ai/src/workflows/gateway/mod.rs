mod gemini;

pub use gemini::GeminiGateway;

use async_trait::async_trait;

/// Single outbound text completion. Callers await one reply; no retries happen here.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("AI service unreachable: {0}")]
    Transport(String),
    #[error("AI service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("AI service response could not be read: {0}")]
    InvalidResponse(String),
    #[error("AI service returned no text (finish reason: {reason})")]
    EmptyResponse { reason: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
