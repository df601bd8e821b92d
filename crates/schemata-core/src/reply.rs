//! Raw, uninterpreted reply handed back by a transport.

use serde::{Deserialize, Serialize};

use crate::message::{Message, ToolCallIntent};

/// What the service sent back for one request, before classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReply {
    pub content: Option<String>,
    /// Set when the service declined to produce content.
    pub refusal: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallIntent>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<UsageReport>,
}

impl RawReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn refused(reason: impl Into<String>) -> Self {
        Self {
            refusal: Some(reason.into()),
            ..Self::default()
        }
    }

    /// The refusal text, if present and not blank.
    pub fn refusal_text(&self) -> Option<&str> {
        self.refusal.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// The assistant turn to append when the conversation continues.
    pub fn to_message(&self) -> Message {
        if self.tool_calls.is_empty() {
            Message::assistant(self.content.clone().unwrap_or_default())
        } else {
            Message::assistant_tool_calls(self.tool_calls.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Other,
}

/// Token accounting for one exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}
