use schemata::{
    StructuredClient,
    dispatch::ToolOutcome,
    message::Message,
    model::OpenAiModel,
    openai::OpenAiAdapterBuilder,
    request::RequestBuilder,
    types::{
        ProductSearch,
        product::{PRODUCT_SEARCH_PROMPT, product_search_tool},
    },
};
use tracing_subscriber::EnvFilter;

/// ---------------------------------------------------------------------------
/// Example  –  function calling with a strict `product_search` tool
///
/// The model picks search parameters; we answer with a fake catalogue hit
/// and let it phrase the recommendation.
///
/// ```bash
/// export OPENAI_API_KEY=sk-…      # mandatory
/// cargo run -p schemata --example product_search
/// ```
/// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = StructuredClient::new(backend);

    let template = RequestBuilder::new()
        .tool(product_search_tool()?)
        .model(OpenAiModel::Gpt4oMini);

    let mut conversation = vec![
        Message::system(PRODUCT_SEARCH_PROMPT),
        Message::user("I'm a woman in my 30s and need something to keep me dry on autumn walks, preferably black."),
    ];

    // A handful of rounds is plenty; the model answers in text once it has results.
    for _ in 0..4 {
        let request = template.clone().messages(conversation.clone()).build()?;
        let completion = client.call_tools(&request).await?;
        conversation.push(completion.message);

        match completion.outcome {
            ToolOutcome::Calls(calls) => {
                for call in calls {
                    match call {
                        Ok(invocation) => {
                            let search = ProductSearch::from_invocation(&invocation)?;
                            println!("-> product_search({search:?})");
                            conversation.push(Message::tool_result(&invocation, search_catalogue(&search)));
                        }
                        Err(err) => {
                            println!("-> rejected tool call: {err}");
                            conversation.push(Message::tool_error(err.call_id(), err.to_string()));
                        }
                    }
                }
            }
            ToolOutcome::Text(text) => {
                println!("{text}");
                break;
            }
            ToolOutcome::Refused(reason) => {
                println!("The model refused: {reason}");
                break;
            }
        }
    }

    Ok(())
}

fn search_catalogue(search: &ProductSearch) -> String {
    serde_json::json!({
        "results": [{
            "name": format!("Storm {} {}", search.color, search.subcategory),
            "category": search.category,
            "price_eur": 129.0
        }]
    })
    .to_string()
}
