use reqwest::StatusCode;
use schemata_core::error::{SchemataError, TransportError};

/// Every failure mode the HTTP client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn't decode body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("OpenAI returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("OpenAI format error: {0}")]
    Format(String),

    #[error("missing API key: set `OPENAI_API_KEY` or call `with_api_key`")]
    MissingApiKey,
}

impl OpenAiError {
    /// Whether a retry stands a chance of succeeding.
    ///
    /// Rate limits, server errors and connection-level failures qualify;
    /// everything else is permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            OpenAiError::Http(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }
}

impl From<OpenAiError> for TransportError {
    fn from(value: OpenAiError) -> Self {
        match value {
            OpenAiError::Api { status, body } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TransportError::Auth(body),
                StatusCode::TOO_MANY_REQUESTS => TransportError::RateLimited(body),
                _ => TransportError::Api {
                    status: status.as_u16(),
                    body,
                },
            },
            OpenAiError::Http(err) if err.is_decode() => TransportError::Decode(err.to_string()),
            OpenAiError::Http(err) if err.is_connect() || err.is_timeout() => {
                TransportError::Connectivity(err.to_string())
            }
            OpenAiError::Serde(err) => TransportError::Decode(err.to_string()),
            OpenAiError::Format(msg) => TransportError::Decode(msg),
            OpenAiError::MissingApiKey => TransportError::Auth(OpenAiError::MissingApiKey.to_string()),
            other => TransportError::Other(Box::new(other)),
        }
    }
}

impl From<OpenAiError> for SchemataError {
    fn from(value: OpenAiError) -> Self {
        SchemataError::Transport(value.into())
    }
}
