//! Step-by-step math tutoring.
//!
//! ```rust
//! use schemata_types::math::{math_tutor_request, math_tutor_schema};
//!
//! let request = math_tutor_request("how can I solve 8x + 7 = -23", "gpt-4o-2024-08-06").unwrap();
//! assert_eq!(request.response_schema().unwrap().name(), "math_reasoning");
//! assert!(math_tutor_schema().is_closed());
//! ```

use schemars::JsonSchema;
use schemata_core::{
    error::Result,
    message::Message,
    request::{Request, RequestBuilder},
    schema::{FieldKind, SchemaDefinition},
};
use serde::{Deserialize, Serialize};

pub const MATH_TUTOR_PROMPT: &str = "You are a helpful math tutor. You will be provided with a math problem, \
and your goal will be to output a step by step solution, along with a final answer. \
For each step, just provide the output as an equation use the explanation field to detail the reasoning.";

/// One transformation of the equation.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub explanation: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MathReasoning {
    pub steps: Vec<Step>,
    pub final_answer: String,
}

/// `{steps: [{explanation, output}], final_answer}`, closed at every level.
pub fn math_tutor_schema() -> SchemaDefinition {
    let step = SchemaDefinition::builder("step")
        .required("explanation", FieldKind::String)
        .required("output", FieldKind::String)
        .build();

    SchemaDefinition::builder("math_reasoning")
        .required("steps", FieldKind::array(FieldKind::Object(step)))
        .required("final_answer", FieldKind::String)
        .build()
}

/// System prompt followed by the learner's question.
pub fn math_tutor_prompt(question: impl Into<String>) -> Vec<Message> {
    vec![Message::system(MATH_TUTOR_PROMPT), Message::user(question)]
}

/// A ready-to-send tutoring request at temperature `0.0`.
pub fn math_tutor_request(question: impl Into<String>, model: impl Into<String>) -> Result<Request> {
    let request = RequestBuilder::new()
        .messages(math_tutor_prompt(question))
        .response_schema(math_tutor_schema().compile()?)
        .model(model)
        .temperature(0.0)
        .build()?;
    Ok(request)
}
