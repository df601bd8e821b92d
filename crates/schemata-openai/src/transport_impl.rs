use std::sync::Arc;

use schemata_core::{
    error::TransportError,
    reply::RawReply,
    request::Request,
    transport::{BoxFuture, Transport},
};

use crate::{OpenAiAdapter, api_v1::ChatCompletionRequest, error::OpenAiError};

impl Transport for OpenAiAdapter {
    fn send<'a>(&'a self, request: &'a Request) -> BoxFuture<'a, Result<RawReply, TransportError>> {
        let client = Arc::clone(&self.client);
        let body = ChatCompletionRequest::from(request);

        Box::pin(async move {
            let response = client.chat_completion(&body).await?;
            let model = response.model.clone();

            let reply = response
                .into_reply()
                .ok_or_else(|| OpenAiError::Format("response has no choices".into()))?;

            tracing::debug!(
                model = %model,
                finish_reason = ?reply.finish_reason,
                tool_calls = reply.tool_calls.len(),
                "chat completion received"
            );
            Ok(reply)
        })
    }
}
