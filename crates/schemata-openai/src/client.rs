use std::{fmt, time::Duration};

use reqwest::Client as HttpClient;

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    error::OpenAiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Exponential back-off for transient failures (429, 5xx, connect errors).
///
/// The delay starts at `initial_backoff`, doubles after each attempt and is
/// capped at `max_backoff`.  The default performs no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Delay before retry number `attempt` (zero based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Minimal HTTP client for OpenAI's *chat/completions* endpoint.
///
/// * Non-streaming only (one request ▶ one response).
/// * Shares a single `reqwest::Client`, so cloning is cheap.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
    retry: RetryPolicy,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base", &self.base)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Build with a caller-supplied `reqwest::Client` (proxy settings,
    /// custom TLS, timeouts).
    pub fn with_http(api_key: impl Into<String>, http: HttpClient, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            api_key: api_key.into(),
            http,
            base: base.trim_end_matches('/').to_owned(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Perform a chat completion, retrying transient failures per the
    /// configured [`RetryPolicy`].
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    tracing::debug!(attempt, ?delay, error = %err, "retrying chat completion");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let url = format!("{}/chat/completions", self.base);
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
        };

        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(350));
        assert_eq!(policy.backoff(31), Duration::from_millis(350));
    }

    #[test]
    fn trailing_slash_is_dropped_from_base() {
        let client = OpenAiClient::with_http("sk-test", HttpClient::new(), Some("http://localhost:1234/v1/".into()));
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }
}
