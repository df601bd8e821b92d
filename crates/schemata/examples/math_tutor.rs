use schemata::{
    StructuredClient,
    interpret::ResponseOutcome,
    model::OpenAiModel,
    openai::OpenAiAdapterBuilder,
    types::{MathReasoning, math::math_tutor_request},
};
use tracing_subscriber::EnvFilter;

/// ---------------------------------------------------------------------------
/// Example  –  step-by-step math tutor with a strict response schema
///
/// ```bash
/// export OPENAI_API_KEY=sk-…      # mandatory
/// cargo run -p schemata --example math_tutor -- "how can I solve 8x + 7 = -23"
/// ```
/// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "how can I solve 8x + 7 = -23".to_string());

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = StructuredClient::new(backend);

    let request = math_tutor_request(question, OpenAiModel::Gpt4o20240806)?;
    let completion = client.complete_as::<MathReasoning>(&request).await?;

    match completion.outcome {
        ResponseOutcome::Decoded(reasoning) => {
            for (n, step) in reasoning.steps.iter().enumerate() {
                println!("Step {}: {}", n + 1, step.explanation);
                println!("    {}", step.output);
            }
            println!("\nFinal answer: {}", reasoning.final_answer);
        }
        ResponseOutcome::Refused(reason) => println!("The model refused: {reason}"),
        ResponseOutcome::Malformed { raw, error } => {
            println!("Reply did not match the schema ({error}):\n{raw}")
        }
    }

    if let Some(usage) = completion.usage {
        println!("\n[{} tokens]", usage.total_tokens);
    }

    Ok(())
}
