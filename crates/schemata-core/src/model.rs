//! Well-known model identifiers.
//!
//! Requests carry the model as a plain string so self-hosted or beta models
//! work without code changes.  [`OpenAiModel`] spares typing literal ids for
//! the common ones:
//!
//! ```rust
//! use schemata_core::model::OpenAiModel;
//! use schemata_core::request::RequestOptions;
//!
//! let options = RequestOptions::new().with_model(OpenAiModel::Gpt4o20240806);
//! assert_eq!(options.model.as_deref(), Some("gpt-4o-2024-08-06"));
//! ```

use std::fmt::Display;

/// Models known to support strict structured outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiModel {
    Gpt4o,
    Gpt4o20240806,
    Gpt4oMini,
    Gpt4_1,
    Gpt4_1Mini,
    O3Mini,
    O4Mini,
}

impl OpenAiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Gpt4o20240806 => "gpt-4o-2024-08-06",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiModel::Gpt4_1 => "gpt-4.1",
            OpenAiModel::Gpt4_1Mini => "gpt-4.1-mini",
            OpenAiModel::O3Mini => "o3-mini",
            OpenAiModel::O4Mini => "o4-mini",
        }
    }
}

impl Display for OpenAiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OpenAiModel> for String {
    fn from(model: OpenAiModel) -> Self {
        model.as_str().to_owned()
    }
}
