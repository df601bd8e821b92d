use schemata_core::{
    message::{Message, Role},
    reply::{self, RawReply},
    request::Request,
    schema::CompiledSchema,
};
use serde::{Deserialize, Serialize};

use crate::impl_builder_methods;

use super::{
    common,
    tools::{ToolCall, ToolSpec},
};

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            tools: None,
            temperature: None,
            response_format: None,
        }
    }
}

impl_builder_methods!(
    ChatCompletionRequest,
    tools: Vec<ToolSpec>,
    temperature: f64,
    response_format: ResponseFormat
);

impl From<&Request> for ChatCompletionRequest {
    fn from(value: &Request) -> Self {
        let mut request = ChatCompletionRequest::new(
            value.model().to_owned(),
            value.messages().iter().map(Into::into).collect(),
        );

        if !value.tools().is_empty() {
            request = request.tools(
                value
                    .tools()
                    .iter()
                    .map(|tool| ToolSpec::from_declaration(tool, value.strict()))
                    .collect(),
            );
        }
        if let Some(temperature) = value.temperature() {
            request = request.temperature(temperature);
        }
        if let Some(schema) = value.response_schema() {
            request = request.response_format(ResponseFormat::json_schema(schema, value.strict()));
        }

        request
    }
}

/// The `response_format` field.
///
/// Serializes to `{"type":"json_schema","json_schema":{…}}`.  Plain text
/// replies are requested by leaving the field out.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: serde_json::Value,
    pub strict: bool,
}

impl ResponseFormat {
    pub fn json_schema(schema: &CompiledSchema, strict: bool) -> Self {
        ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: schema.name().to_owned(),
                schema: schema.document().clone(),
                strict: strict && schema.strict(),
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    System,
    Assistant,
    Tool,
}

impl From<Role> for MessageRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => MessageRole::System,
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
            Role::Tool => MessageRole::Tool,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl From<&Message> for ChatCompletionMessage {
    fn from(value: &Message) -> Self {
        let tool_calls = (!value.tool_calls().is_empty())
            .then(|| value.tool_calls().iter().map(Into::into).collect());

        Self {
            role: value.role().into(),
            content: value.content().map(ToOwned::to_owned),
            tool_calls,
            tool_call_id: value.tool_call_id().map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<common::Usage>,
    pub system_fingerprint: Option<String>,
}

impl ChatCompletionResponse {
    /// Collapse the first choice into a [`RawReply`].
    ///
    /// Returns `None` when the service sent no choices at all.
    pub fn into_reply(self) -> Option<RawReply> {
        let usage = self.usage.map(Into::into);
        let choice = self.choices.into_iter().min_by_key(|c| c.index)?;

        Some(RawReply {
            content: choice.message.content,
            refusal: choice.message.refusal,
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            finish_reason: choice.finish_reason.map(Into::into),
            usage,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    #[serde(other)]
    Other,
}

impl From<FinishReason> for reply::FinishReason {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Stop => reply::FinishReason::Stop,
            FinishReason::Length => reply::FinishReason::Length,
            FinishReason::ContentFilter => reply::FinishReason::ContentFilter,
            FinishReason::ToolCalls => reply::FinishReason::ToolCalls,
            FinishReason::Other => reply::FinishReason::Other,
        }
    }
}
