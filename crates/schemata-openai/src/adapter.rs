use std::{env, sync::Arc, time::Duration};

use reqwest::Client as HttpClient;
use schemata_core::error::TransportError;

use crate::{
    client::{DEFAULT_TIMEOUT, OpenAiClient, RetryPolicy},
    error::OpenAiError,
};

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements [`schemata_core::transport::Transport`].
///
/// Plug it into [`schemata_core::StructuredClient`]; the adapter itself
/// exposes nothing beyond its configuration.
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
}

impl OpenAiAdapter {
    pub fn builder() -> OpenAiAdapterBuilder {
        OpenAiAdapterBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// ```rust,no_run
/// use schemata_openai::OpenAiAdapterBuilder;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
#[derive(Debug, Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry: Option<RetryPolicy>,
}

impl OpenAiAdapterBuilder {
    /// Create an empty builder. Remember to supply an API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `OPENAI_API_KEY` and, if set, `OPENAI_BASE_URL` from the
    /// environment.
    ///
    /// Never fails; a missing key only surfaces during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok(),
            base_url: env::var("OPENAI_BASE_URL").ok(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point at an OpenAI-compatible endpoint, e.g. a local proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a retry policy for OpenAI HTTP calls.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`TransportError::Auth`] if the API key is missing or blank.
    /// * [`TransportError::Other`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<OpenAiAdapter, TransportError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;

        let http = HttpClient::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|err| TransportError::Other(Box::new(err)))?;

        let client = OpenAiClient::with_http(api_key, http, self.base_url)
            .with_retry_policy(self.retry.unwrap_or_default());

        Ok(OpenAiAdapter {
            client: Arc::new(client),
        })
    }
}
