use schemata_core::{dispatch::ToolDeclaration, message::ToolCallIntent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Function,
}

/// Declaration of a callable function, as sent in `tools`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolSpec {
    pub r#type: ToolType,
    pub function: ToolFunctionSpec,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolFunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl ToolSpec {
    pub fn from_declaration(tool: &ToolDeclaration, strict: bool) -> Self {
        ToolSpec {
            r#type: ToolType::Function,
            function: ToolFunctionSpec {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameters().document().clone(),
                strict: strict.then_some(true),
            },
        }
    }
}

/// A tool call as it appears in assistant messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolCall {
    pub id: String,
    pub r#type: ToolType,
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolCallFunction {
    pub name: String,
    /// JSON-encoded argument object, exactly as produced by the model.
    pub arguments: String,
}

impl From<ToolCall> for ToolCallIntent {
    fn from(value: ToolCall) -> Self {
        ToolCallIntent {
            id: value.id,
            name: value.function.name,
            arguments: value.function.arguments,
        }
    }
}

impl From<&ToolCallIntent> for ToolCall {
    fn from(value: &ToolCallIntent) -> Self {
        Self {
            id: value.id.clone(),
            r#type: ToolType::Function,
            function: ToolCallFunction {
                name: value.name.clone(),
                arguments: value.arguments.clone(),
            },
        }
    }
}
