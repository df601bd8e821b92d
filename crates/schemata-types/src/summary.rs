//! Structured summaries of articles about inventions.
//!
//! The schema is derived from [`ArticleSummary`] itself, so the struct is the
//! single source of truth for field names and descriptions.

use schemars::JsonSchema;
use schemata_core::{
    error::Result,
    message::Message,
    request::RequestBuilder,
    schema::{CompiledSchema, SchemaDefinition},
};
use serde::{Deserialize, Serialize};

pub const SUMMARY_PROMPT: &str = "You will be provided with the content of an article about an invention. \
Your goal is to summarize the article following the given schema: \
the year it was invented, a short summary, the names of the inventors, \
a one-line description of the invention and the key concepts it relies on, each with an id, title and description.";

#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Concept {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleSummary {
    pub invented_year: i64,
    pub summary: String,
    pub inventors: Vec<String>,
    pub description: String,
    pub concepts: Vec<Concept>,
}

/// Definition of [`ArticleSummary`] under the name `article_summary`.
pub fn article_summary_schema() -> Result<CompiledSchema> {
    let definition = SchemaDefinition::from_type_named::<ArticleSummary>("article_summary")?;
    Ok(definition.compile()?)
}

/// Request template carrying the system prompt and schema; the article text
/// is appended as the user turn, e.g. by
/// [`schemata_core::StructuredClient::complete_from_source`].
pub fn summary_template(model: impl Into<String>) -> Result<RequestBuilder> {
    Ok(RequestBuilder::new()
        .message(Message::system(SUMMARY_PROMPT))
        .response_schema(article_summary_schema()?)
        .model(model)
        .temperature(0.2))
}

#[cfg(test)]
mod tests {
    use schemata_core::{
        error::ValidationError,
        interpret::{ResponseOutcome, interpret},
        reply::RawReply,
    };

    use super::*;

    #[test]
    fn schema_is_strict_with_nested_concepts() {
        let schema = article_summary_schema().unwrap();
        assert!(schema.strict());

        let concepts = &schema.document()["properties"]["concepts"];
        assert_eq!(concepts["type"], "array");
        assert_eq!(concepts["items"]["additionalProperties"], false);
        assert_eq!(concepts["items"]["properties"]["id"]["type"], "integer");

        let order: Vec<_> = schema.document()["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(order, ["invented_year", "summary", "inventors", "description", "concepts"]);
    }

    #[test]
    fn reply_decodes_into_typed_summary() {
        let schema = article_summary_schema().unwrap();
        let reply = RawReply::text(
            r#"{
                "invented_year": 1876,
                "summary": "A device that transmits speech electrically.",
                "inventors": ["Alexander Graham Bell"],
                "description": "The telephone.",
                "concepts": [{"id": 1, "title": "Transducer", "description": "Sound to current."}]
            }"#,
        );

        let summary = match interpret(&reply, &schema).into_typed::<ArticleSummary>() {
            ResponseOutcome::Decoded(summary) => summary,
            other => panic!("expected a decoded summary, got {other:?}"),
        };
        assert_eq!(summary.invented_year, 1876);
        assert_eq!(summary.concepts[0].title, "Transducer");
    }

    #[test]
    fn fractional_year_is_malformed() {
        let schema = article_summary_schema().unwrap();
        let reply = RawReply::text(
            r#"{"invented_year": 1876.5, "summary": "", "inventors": [], "description": "", "concepts": []}"#,
        );

        assert!(matches!(
            interpret(&reply, &schema),
            ResponseOutcome::Malformed { error: ValidationError::TypeMismatch { .. }, .. }
        ));
    }

    #[test]
    fn template_needs_only_the_article_turn() {
        let request = summary_template("gpt-4o-mini")
            .unwrap()
            .message(Message::user("The telephone was patented in 1876."))
            .build()
            .unwrap();

        assert_eq!(request.messages().len(), 2);
        assert_eq!(request.response_schema().unwrap().name(), "article_summary");
    }
}
