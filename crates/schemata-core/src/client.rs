//! Generic client that runs one request/response cycle against a single
//! concrete [`Transport`].
//!
//! ```text
//! Built ──► Dispatched ──► Refused | Decoded | Malformed          (complete)
//!                     └──► Refused | Text | per call: Resolved
//!                                                | InvalidArguments (call_tools)
//! ```
//!
//! Every request produces exactly one terminal outcome.  The client keeps no
//! state between calls, so any number of requests may run concurrently on a
//! shared client.
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    dispatch::ToolOutcome,
    error::{ConfigError, ContentError, Result},
    interpret::{ResponseOutcome, interpret},
    message::Message,
    reply::{RawReply, UsageReport},
    request::{Request, RequestBuilder},
    transport::{ContentSource, Transport},
};

/// Outcome of a response-format request.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T = Value> {
    pub outcome: ResponseOutcome<T>,
    pub usage: Option<UsageReport>,
}

/// Outcome of a tool-calling request.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCompletion {
    pub outcome: ToolOutcome,
    /// Assistant turn to append if the conversation continues.
    pub message: Message,
    pub usage: Option<UsageReport>,
}

/// A client bound to a single transport.
///
/// Cloning is cheap; the transport is shared behind an `Arc`.
#[derive(Debug)]
pub struct StructuredClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for StructuredClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> StructuredClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Access the underlying transport (e.g. to tweak provider settings).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn dispatch(&self, request: &Request) -> Result<RawReply> {
        tracing::debug!(
            model = request.model(),
            messages = request.messages().len(),
            "dispatching request"
        );
        Ok(self.transport.send(request).await?)
    }

    /// Send a response-format request and classify the reply.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingResponseSchema`] before dispatch, or the
    /// transport's error unchanged.
    pub async fn complete(&self, request: &Request) -> Result<Completion> {
        let schema = request
            .response_schema()
            .ok_or(ConfigError::MissingResponseSchema)?;

        let reply = self.dispatch(request).await?;
        Ok(Completion {
            outcome: interpret(&reply, schema),
            usage: reply.usage,
        })
    }

    /// Like [`Self::complete`] but decodes the payload into `O`.
    pub async fn complete_as<O: DeserializeOwned>(&self, request: &Request) -> Result<Completion<O>> {
        let Completion { outcome, usage } = self.complete(request).await?;
        Ok(Completion {
            outcome: outcome.into_typed(),
            usage,
        })
    }

    /// Send a tool-calling request and resolve the returned calls.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoTools`] before dispatch, or the transport's error
    /// unchanged.
    pub async fn call_tools(&self, request: &Request) -> Result<ToolCompletion> {
        if request.tools().is_empty() {
            return Err(ConfigError::NoTools.into());
        }

        let reply = self.dispatch(request).await?;
        Ok(ToolCompletion {
            outcome: ToolOutcome::from_reply(&reply, request.tools()),
            message: reply.to_message(),
            usage: reply.usage,
        })
    }

    /// Fetch text from `source`, append it as the user turn of `template`
    /// and complete.
    ///
    /// # Errors
    ///
    /// [`ContentError`] from the source (blank text counts as
    /// [`ContentError::Empty`]), then anything [`Self::complete`] returns.
    pub async fn complete_from_source<S>(
        &self,
        source: &S,
        locator: &str,
        template: RequestBuilder,
    ) -> Result<Completion>
    where
        S: ContentSource + ?Sized,
    {
        let text = source.fetch(locator).await?;
        if text.trim().is_empty() {
            return Err(ContentError::Empty(locator.to_owned()).into());
        }

        let request = template.message(Message::user(text)).build()?;
        self.complete(&request).await
    }
}
