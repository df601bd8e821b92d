//! Assembly of an immutable, validated [`Request`].
//!
//! No network call happens here; dispatch belongs to a
//! [`crate::transport::Transport`].  All pre-flight checks run in
//! [`RequestBuilder::build`], so a `Request` value is always dispatchable.
//!
//! ```rust
//! use schemata_core::{
//!     message::Message,
//!     request::{RequestBuilder, RequestOptions},
//!     schema::{FieldKind, SchemaDefinition},
//! };
//!
//! let schema = SchemaDefinition::builder("greeting")
//!     .required("text", FieldKind::String)
//!     .build()
//!     .compile()
//!     .unwrap();
//!
//! let request = RequestBuilder::new()
//!     .message(Message::user("Say hello!"))
//!     .response_schema(schema)
//!     .options(RequestOptions::new().with_model("gpt-4o-mini").with_temperature(0.0))
//!     .build()
//!     .unwrap();
//!
//! assert!(request.strict());
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    dispatch::ToolDeclaration, error::ConfigError, message::Message, schema::CompiledSchema,
};

/// Per-request configuration.
///
/// Deserializable from any serde source; unknown keys are rejected.
///
/// * `model` – identifier forwarded verbatim to the service.
/// * `temperature` – sampling randomness, `0.0` is maximally deterministic;
///   unset means provider default.
/// * `strict` – ask the service to guarantee schema-valid output or an
///   explicit refusal. Defaults to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestOptions {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: None,
            strict: true,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A validated call description, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    model: String,
    messages: Vec<Message>,
    tools: Vec<ToolDeclaration>,
    response_schema: Option<CompiledSchema>,
    temperature: Option<f64>,
    strict: bool,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tools(&self) -> &[ToolDeclaration] {
        &self.tools
    }

    pub fn response_schema(&self) -> Option<&CompiledSchema> {
        self.response_schema.as_ref()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Fluent builder for [`Request`].
///
/// Cloning a partially configured builder is a cheap way to reuse the system
/// prompt, schema and options across many requests.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    messages: Vec<Message>,
    tools: Vec<ToolDeclaration>,
    response_schema: Option<CompiledSchema>,
    options: RequestOptions,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn tool(mut self, tool: ToolDeclaration) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: impl IntoIterator<Item = ToolDeclaration>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn response_schema(mut self, schema: CompiledSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.options.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Validate and freeze the request.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::MissingModel`] – no (or a blank) model identifier.
    /// * [`ConfigError::EmptyMessages`] – the conversation is empty.
    /// * [`ConfigError::InvalidTemperature`] – outside `0.0..=2.0`.
    /// * [`ConfigError::DuplicateTool`] – two tools share a name.
    /// * [`ConfigError::NonStrictSchema`] – strict mode with an open-world
    ///   response or tool schema.
    pub fn build(self) -> Result<Request, ConfigError> {
        let model = self
            .options
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or(ConfigError::MissingModel)?;

        if self.messages.is_empty() {
            return Err(ConfigError::EmptyMessages);
        }

        if let Some(t) = self.options.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(ConfigError::InvalidTemperature(t));
        }

        let mut names = BTreeSet::new();
        for tool in &self.tools {
            if !names.insert(tool.name()) {
                return Err(ConfigError::DuplicateTool(tool.name().to_owned()));
            }
        }

        if self.options.strict {
            let schemas = self
                .response_schema
                .iter()
                .chain(self.tools.iter().map(ToolDeclaration::parameters));
            for schema in schemas {
                if !schema.strict() {
                    return Err(ConfigError::NonStrictSchema {
                        name: schema.name().to_owned(),
                    });
                }
            }
        }

        tracing::debug!(
            model = %model,
            messages = self.messages.len(),
            tools = self.tools.len(),
            response_schema = ?self.response_schema.as_ref().map(CompiledSchema::name),
            strict = self.options.strict,
            "request built"
        );

        Ok(Request {
            model,
            messages: self.messages,
            tools: self.tools,
            response_schema: self.response_schema,
            temperature: self.options.temperature,
            strict: self.options.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, SchemaDefinition, compile};

    fn base() -> RequestBuilder {
        RequestBuilder::new()
            .message(Message::system("You are a helpful math tutor."))
            .message(Message::user("how can I solve 8x + 7 = -23"))
            .model("gpt-4o-2024-08-06")
    }

    #[test]
    fn builds_with_defaults() {
        let request = base().build().unwrap();
        assert_eq!(request.model(), "gpt-4o-2024-08-06");
        assert_eq!(request.messages().len(), 2);
        assert!(request.strict());
        assert!(request.temperature().is_none());
        assert!(request.response_schema().is_none());
    }

    #[test]
    fn missing_model_and_empty_messages() {
        let no_model = RequestBuilder::new().message(Message::user("hi")).build();
        assert_eq!(no_model.unwrap_err(), ConfigError::MissingModel);

        let blank_model = RequestBuilder::new()
            .message(Message::user("hi"))
            .model("  ")
            .build();
        assert_eq!(blank_model.unwrap_err(), ConfigError::MissingModel);

        let no_messages = RequestBuilder::new().model("gpt-4o").build();
        assert_eq!(no_messages.unwrap_err(), ConfigError::EmptyMessages);
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        assert_eq!(
            base().temperature(2.5).build().unwrap_err(),
            ConfigError::InvalidTemperature(2.5)
        );
        assert!(matches!(
            base().temperature(f64::NAN).build(),
            Err(ConfigError::InvalidTemperature(_))
        ));
        assert!(base().temperature(0.0).build().is_ok());
    }

    #[test]
    fn strict_mode_requires_closed_schemas() {
        let open = SchemaDefinition::builder("open")
            .required("a", FieldKind::String)
            .open()
            .build();
        let schema = compile(&open).unwrap();

        assert_eq!(
            base().response_schema(schema.clone()).build().unwrap_err(),
            ConfigError::NonStrictSchema {
                name: "open".into()
            }
        );
        assert!(
            base()
                .response_schema(schema)
                .strict(false)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn rejects_duplicate_tools() {
        let params = SchemaDefinition::builder("params")
            .required("q", FieldKind::String)
            .build();
        let tool = ToolDeclaration::new("search", "Search things.", &params).unwrap();

        assert_eq!(
            base().tools([tool.clone(), tool]).build().unwrap_err(),
            ConfigError::DuplicateTool("search".into())
        );
    }

    #[test]
    fn options_deserialize_with_recognized_keys_only() {
        let options: RequestOptions =
            serde_json::from_str(r#"{"model":"gpt-4o","temperature":0}"#).unwrap();
        assert_eq!(
            options,
            RequestOptions::new().with_model("gpt-4o").with_temperature(0.0)
        );

        let unknown = serde_json::from_str::<RequestOptions>(r#"{"top_k":3}"#);
        assert!(unknown.is_err());
    }
}
