//! Conversation messages and roles.
//!
//! They mirror the concepts exposed by most provider APIs: "system", "user",
//! "assistant" and "tool".  A message is immutable once built; a conversation
//! is simply an ordered `Vec<Message>`.
//!
//! Tool-calling conversations need two extra pieces of data:
//!
//! * an **assistant** message may carry the [`ToolCallIntent`]s it issued, so
//!   the conversation can be replayed to the service, and
//! * a **tool** message carries the `tool_call_id` it answers.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::dispatch::ToolInvocation;

/// A single chat message, independent of any specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCallIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl Message {
    /// ```rust
    /// use schemata_core::message::{Message, Role};
    ///
    /// let sys = Message::new(Role::System, "You are a helpful math tutor.");
    /// assert_eq!(sys.role().to_string(), "system");
    /// ```
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Assistant turn that issued tool calls instead of text.
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCallIntent>) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Result of running the callable behind `invocation`.
    pub fn tool_result(invocation: &ToolInvocation, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(invocation.call_id().to_owned()),
        }
    }

    /// Answer a call that could not be executed, e.g. after a
    /// [`crate::error::DispatchError`], so the conversation stays well-formed.
    pub fn tool_error(call_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(reason.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn tool_calls(&self) -> &[ToolCallIntent] {
        &self.tool_calls
    }

    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }
}

/// High-level chat roles recognised by most LLM providers.
///
/// The `Display` implementation renders the canonical lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Carries the result of a tool call back to the service.
    Tool,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A tool call as issued by the service, arguments still unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallIntent {
    /// Opaque identifier used to correlate the tool result.
    pub id: String,
    pub name: String,
    /// JSON-encoded argument object.
    pub arguments: String,
}

impl ToolCallIntent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}
