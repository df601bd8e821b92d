use schemata::{
    StructuredClient,
    interpret::ResponseOutcome,
    model::OpenAiModel,
    openai::OpenAiAdapterBuilder,
    types::{ArticleSummary, StaticContentSource, summary::summary_template},
};
use tracing_subscriber::EnvFilter;

/// ---------------------------------------------------------------------------
/// Example  –  summarize articles into a fixed, typed structure
///
/// The articles come from an in-memory content source so the demo runs
/// without scraping anything.
///
/// ```bash
/// export OPENAI_API_KEY=sk-…      # mandatory
/// cargo run -p schemata --example summarize_articles
/// ```
/// ---------------------------------------------------------------------------

const ARTICLES: [(&str, &str); 2] = [
    (
        "telephone",
        "The telephone is a telecommunications device that converts sound into electronic signals. \
         Alexander Graham Bell was granted the first US patent for it in 1876, although Elisha Gray \
         filed a caveat for a similar design on the same day. Early telephones used a diaphragm \
         and an electromagnet to turn speech into a varying electric current.",
    ),
    (
        "light_bulb",
        "The incandescent light bulb produces light by heating a filament until it glows. \
         Thomas Edison and Joseph Swan independently demonstrated practical carbon-filament \
         lamps around 1879, relying on a vacuum inside a glass bulb to keep the filament from burning.",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let backend = OpenAiAdapterBuilder::new_from_env().build()?;
    let client = StructuredClient::new(backend);
    let source: StaticContentSource = ARTICLES.into_iter().collect();

    for (locator, _) in ARTICLES {
        let template = summary_template(OpenAiModel::Gpt4oMini)?;
        let completion = client.complete_from_source(&source, locator, template).await?;

        match completion.outcome.into_typed::<ArticleSummary>() {
            ResponseOutcome::Decoded(summary) => {
                println!("== {locator} ({})", summary.invented_year);
                println!("{}", summary.summary);
                println!("Inventors: {}", summary.inventors.join(", "));
                for concept in &summary.concepts {
                    println!("  #{} {}: {}", concept.id, concept.title, concept.description);
                }
            }
            ResponseOutcome::Refused(reason) => println!("== {locator}: refused ({reason})"),
            ResponseOutcome::Malformed { error, .. } => println!("== {locator}: malformed ({error})"),
        }
    }

    Ok(())
}
