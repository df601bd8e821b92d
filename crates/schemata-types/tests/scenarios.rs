use std::sync::Mutex;

use schemata_core::{
    StructuredClient,
    dispatch::{ToolOutcome, resolve},
    error::{DispatchError, TransportError, ValidationError},
    interpret::{ResponseOutcome, interpret},
    message::{Message, ToolCallIntent},
    reply::RawReply,
    request::{Request, RequestBuilder},
    transport::{BoxFuture, Transport},
};
use schemata_types::{
    MathReasoning, ProductCategory, ProductSearch, StaticContentSource,
    math::{math_tutor_request, math_tutor_schema},
    product::{PRODUCT_SEARCH_PROMPT, product_search_tool},
    summary::summary_template,
};

const REFUSAL: &str = "I'm sorry, I cannot assist with that request.";

/// Hands out one canned reply per request.
struct Canned(Mutex<Vec<RawReply>>);

impl Canned {
    fn new(replies: impl IntoIterator<Item = RawReply>) -> Self {
        let mut replies: Vec<_> = replies.into_iter().collect();
        replies.reverse();
        Self(Mutex::new(replies))
    }
}

impl Transport for Canned {
    fn send<'a>(&'a self, _request: &'a Request) -> BoxFuture<'a, Result<RawReply, TransportError>> {
        let next = self
            .0
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| TransportError::Connectivity("no reply left".into()));
        Box::pin(async move { next })
    }
}

#[tokio::test]
async fn math_tutor_decodes_steps_and_answer() {
    let request = math_tutor_request("how can I solve 8x + 7 = -23", "gpt-4o-2024-08-06").unwrap();
    let client = StructuredClient::new(Canned::new([RawReply::text(
        r#"{"steps":[
            {"explanation":"Subtract 7 from both sides.","output":"8x = -30"},
            {"explanation":"Divide both sides by 8.","output":"x = -30/8"}
        ],"final_answer":"x = -15/4"}"#,
    )]));

    let completion = client.complete_as::<MathReasoning>(&request).await.unwrap();

    let reasoning = match completion.outcome {
        ResponseOutcome::Decoded(reasoning) => reasoning,
        other => panic!("expected decoded reasoning, got {other:?}"),
    };
    assert!(!reasoning.steps.is_empty());
    assert!(!reasoning.final_answer.is_empty());
}

#[test]
fn math_tutor_rejects_extra_fields() {
    let schema = math_tutor_schema().compile().unwrap();
    let reply = RawReply::text(r#"{"steps":[],"final_answer":"x = 1","confidence":0.9}"#);

    assert!(matches!(
        interpret(&reply, &schema),
        ResponseOutcome::Malformed { error: ValidationError::UnexpectedField { path }, .. } if path == "$.confidence"
    ));
}

#[test]
fn product_search_call_resolves_with_exact_arguments() {
    let tools = [product_search_tool().unwrap()];
    let reply = RawReply {
        tool_calls: vec![ToolCallIntent::new(
            "call_1",
            "product_search",
            r#"{"category":"jackets","subcategory":"rain jackets","color":"black"}"#,
        )],
        ..RawReply::default()
    };

    let mut resolved = resolve(&reply, &tools);
    assert_eq!(resolved.len(), 1);
    let invocation = resolved.remove(0).unwrap();

    assert_eq!(invocation.name(), "product_search");
    assert_eq!(
        ProductSearch::from_invocation(&invocation).unwrap(),
        ProductSearch {
            category: ProductCategory::Jackets,
            subcategory: "rain jackets".into(),
            color: "black".into(),
        }
    );
}

#[test]
fn product_search_outside_enum_is_rejected() {
    let tools = [product_search_tool().unwrap()];
    let reply = RawReply {
        tool_calls: vec![ToolCallIntent::new(
            "call_2",
            "product_search",
            r#"{"category":"hats","subcategory":"beanies","color":"red"}"#,
        )],
        ..RawReply::default()
    };

    let resolved = resolve(&reply, &tools);
    assert!(matches!(
        &resolved[..],
        [Err(DispatchError::InvalidArguments { call_id, error: ValidationError::NotInEnum { .. }, .. })] if call_id == "call_2"
    ));
}

#[tokio::test]
async fn product_search_through_client() {
    let request = RequestBuilder::new()
        .message(Message::system(PRODUCT_SEARCH_PROMPT))
        .message(Message::user("I'm looking for a black rain jacket for the autumn."))
        .tool(product_search_tool().unwrap())
        .model("gpt-4o-mini")
        .build()
        .unwrap();
    let client = StructuredClient::new(Canned::new([RawReply {
        tool_calls: vec![ToolCallIntent::new(
            "call_9",
            "product_search",
            r#"{"category":"jackets","subcategory":"rain jackets","color":"black"}"#,
        )],
        ..RawReply::default()
    }]));

    let completion = client.call_tools(&request).await.unwrap();
    let ToolOutcome::Calls(calls) = completion.outcome else {
        panic!("expected tool calls");
    };
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_ok());
}

#[test]
fn refusal_wins_regardless_of_schema() {
    let reply = RawReply {
        content: Some(String::new()),
        ..RawReply::refused(REFUSAL)
    };

    for schema in [
        math_tutor_schema().compile().unwrap(),
        schemata_types::summary::article_summary_schema().unwrap(),
    ] {
        assert_eq!(interpret(&reply, &schema), ResponseOutcome::Refused(REFUSAL.into()));
    }
}

#[tokio::test]
async fn refusal_through_the_client() {
    let request = math_tutor_request("how can I get away with a crime?", "gpt-4o-2024-08-06").unwrap();
    let client = StructuredClient::new(Canned::new([RawReply::refused(REFUSAL)]));

    let completion = client.complete(&request).await.unwrap();
    assert_eq!(completion.outcome, ResponseOutcome::Refused(REFUSAL.into()));
}

#[tokio::test]
async fn summary_from_static_source() {
    let pages = StaticContentSource::new()
        .with_page("telephone", "The telephone was patented by Alexander Graham Bell in 1876.");
    let client = StructuredClient::new(Canned::new([RawReply::text(
        r#"{"invented_year":1876,"summary":"Speech over wires.","inventors":["Alexander Graham Bell"],
            "description":"The telephone.","concepts":[{"id":1,"title":"Transducer","description":"Sound to current."}]}"#,
    )]));

    let completion = client
        .complete_from_source(&pages, "telephone", summary_template("gpt-4o-mini").unwrap())
        .await
        .unwrap();

    let summary = completion
        .outcome
        .into_typed::<schemata_types::ArticleSummary>()
        .decoded()
        .unwrap();
    assert_eq!(summary.inventors, ["Alexander Graham Bell"]);
}
