//! Function-calling path: tool declarations and resolution of returned calls.
//!
//! A [`ToolDeclaration`] is compiled once and reused across requests.  When a
//! reply comes back, [`resolve`] matches every returned call against the
//! declarations and validates its arguments exactly like the response path
//! does, so invalid data never reaches the caller's callable.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{DispatchError, SchemaError},
    reply::RawReply,
    schema::{CompiledSchema, SchemaDefinition, compile, validate_name},
    validate::decode,
};

/// A capability the service may call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    name: String,
    description: String,
    parameters: CompiledSchema,
}

impl ToolDeclaration {
    /// Declare a tool and compile its argument schema.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`] from compiling `parameters`, or
    /// [`SchemaError::InvalidName`] if `name` is not a valid function name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: &SchemaDefinition,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            name,
            description: description.into(),
            parameters: compile(parameters)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &CompiledSchema {
        &self.parameters
    }
}

/// A validated call to a declared tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    call_id: String,
    name: String,
    arguments: Value,
}

impl ToolInvocation {
    /// Identifier to pass back with the tool result message.
    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &Value {
        &self.arguments
    }

    /// Deserialize the validated arguments into the callable's parameter type.
    pub fn arguments_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.arguments)
    }
}

/// Terminal outcome of a tool-calling request.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// One entry per returned call, in reply order.
    Calls(Vec<Result<ToolInvocation, DispatchError>>),
    /// The service answered with text instead of calling a tool.
    Text(String),
    Refused(String),
}

impl ToolOutcome {
    /// Classify a reply: refusal first, then tool calls, then plain text.
    pub fn from_reply(reply: &RawReply, tools: &[ToolDeclaration]) -> Self {
        if let Some(reason) = reply.refusal_text() {
            tracing::info!(reason, "service refused the tool request");
            return ToolOutcome::Refused(reason.to_owned());
        }

        if reply.tool_calls.is_empty() {
            return ToolOutcome::Text(reply.content.clone().unwrap_or_default());
        }

        ToolOutcome::Calls(resolve(reply, tools))
    }
}

/// Resolve every tool call in `reply` against `tools`.
///
/// Zero, one or several calls are all valid.
pub fn resolve(
    reply: &RawReply,
    tools: &[ToolDeclaration],
) -> Vec<Result<ToolInvocation, DispatchError>> {
    reply
        .tool_calls
        .iter()
        .map(|call| {
            let Some(tool) = tools.iter().find(|t| t.name == call.name) else {
                tracing::warn!(call_id = %call.id, name = %call.name, "service called an undeclared tool");
                return Err(DispatchError::UnknownTool {
                    call_id: call.id.clone(),
                    name: call.name.clone(),
                });
            };

            match decode(&call.arguments, tool.parameters.definition()) {
                Ok(arguments) => Ok(ToolInvocation {
                    call_id: call.id.clone(),
                    name: call.name.clone(),
                    arguments,
                }),
                Err(error) => {
                    tracing::warn!(call_id = %call.id, name = %call.name, %error, "tool arguments failed validation");
                    Err(DispatchError::InvalidArguments {
                        call_id: call.id.clone(),
                        name: call.name.clone(),
                        raw: call.arguments.clone(),
                        error,
                    })
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::{
        error::ValidationError,
        message::{Message, ToolCallIntent},
        schema::FieldKind,
    };

    fn weather_tool() -> ToolDeclaration {
        let params = SchemaDefinition::builder("weather_params")
            .required("location", FieldKind::String)
            .required("unit", FieldKind::enumeration(["celsius", "fahrenheit"]))
            .build();
        ToolDeclaration::new("current_weather", "Fetch the current weather.", &params).unwrap()
    }

    fn reply_with(calls: Vec<ToolCallIntent>) -> RawReply {
        RawReply {
            tool_calls: calls,
            ..RawReply::default()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct WeatherArgs {
        location: String,
        unit: String,
    }

    #[test]
    fn resolves_several_calls_in_order() {
        let reply = reply_with(vec![
            ToolCallIntent::new(
                "call_1",
                "current_weather",
                r#"{"location":"Berlin","unit":"celsius"}"#,
            ),
            ToolCallIntent::new(
                "call_2",
                "current_weather",
                r#"{"location":"Boston","unit":"fahrenheit"}"#,
            ),
        ]);

        let resolved = resolve(&reply, &[weather_tool()]);
        assert_eq!(resolved.len(), 2);

        let second = resolved[1].as_ref().unwrap();
        assert_eq!(second.call_id(), "call_2");
        assert_eq!(
            second.arguments_as::<WeatherArgs>().unwrap(),
            WeatherArgs {
                location: "Boston".into(),
                unit: "fahrenheit".into()
            }
        );
    }

    #[test]
    fn unknown_tool_and_invalid_arguments() {
        let reply = reply_with(vec![
            ToolCallIntent::new("call_1", "launch_rocket", "{}"),
            ToolCallIntent::new("call_2", "current_weather", r#"{"location":"Berlin"}"#),
        ]);

        let resolved = resolve(&reply, &[weather_tool()]);
        assert_eq!(
            resolved[0],
            Err(DispatchError::UnknownTool {
                call_id: "call_1".into(),
                name: "launch_rocket".into()
            })
        );
        assert_eq!(
            resolved[1],
            Err(DispatchError::InvalidArguments {
                call_id: "call_2".into(),
                name: "current_weather".into(),
                raw: r#"{"location":"Berlin"}"#.into(),
                error: ValidationError::MissingField {
                    path: "$.unit".into()
                },
            })
        );

        let answers: Vec<_> = resolved
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|err| Message::tool_error(err.call_id(), err.to_string()))
            .collect();
        assert_eq!(answers[0].tool_call_id(), Some("call_1"));
        assert_eq!(answers[1].tool_call_id(), Some("call_2"));
    }

    #[test]
    fn outcome_prefers_refusal_then_calls_then_text() {
        let tools = [weather_tool()];

        let mut reply = reply_with(vec![ToolCallIntent::new(
            "call_1",
            "current_weather",
            r#"{"location":"Berlin","unit":"celsius"}"#,
        )]);
        assert!(matches!(
            ToolOutcome::from_reply(&reply, &tools),
            ToolOutcome::Calls(calls) if calls.len() == 1
        ));

        reply.refusal = Some("I can't help with that.".into());
        assert_eq!(
            ToolOutcome::from_reply(&reply, &tools),
            ToolOutcome::Refused("I can't help with that.".into())
        );

        let text = RawReply::text("It is sunny in Berlin.");
        assert_eq!(
            ToolOutcome::from_reply(&text, &tools),
            ToolOutcome::Text("It is sunny in Berlin.".into())
        );
    }

    #[test]
    fn tool_names_are_validated() {
        let params = SchemaDefinition::builder("p").build();
        assert_eq!(
            ToolDeclaration::new("bad name", "", &params).unwrap_err(),
            SchemaError::InvalidName("bad name".into())
        );
    }
}
