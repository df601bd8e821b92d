//! # `schemata` – the umbrella crate
//!
//! One-stop import for the workspace:
//!
//! | Crate                 | What it provides                                                              |
//! |-----------------------|-------------------------------------------------------------------------------|
//! | **`schemata-core`**   | Schema definitions and compiler, request builder, reply interpreter, tool-call dispatcher, `StructuredClient` |
//! | **`schemata-types`**  | Ready-made schemas: math tutor, article summary, `product_search` tool        |
//! | **`schemata-openai`** | `Transport` for the OpenAI chat-completions API *(feature `openai`, default)* |
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use schemata::{
//!     StructuredClient,
//!     interpret::ResponseOutcome,
//!     types::{MathReasoning, math::math_tutor_request},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = schemata::openai::OpenAiAdapterBuilder::new_from_env().build()?;
//!     let client = StructuredClient::new(backend);
//!
//!     let request = math_tutor_request("how can I solve 8x + 7 = -23", "gpt-4o-2024-08-06")?;
//!     match client.complete_as::<MathReasoning>(&request).await?.outcome {
//!         ResponseOutcome::Decoded(reasoning) => println!("{}", reasoning.final_answer),
//!         ResponseOutcome::Refused(reason) => println!("refused: {reason}"),
//!         ResponseOutcome::Malformed { error, .. } => println!("malformed: {error}"),
//!     }
//!     Ok(())
//! }
//! ```

pub use schemata_core::*;
pub use schemata_types as types;

#[cfg(feature = "openai")]
pub use schemata_openai as openai;
