use std::collections::HashMap;

use schemata_core::{
    error::ContentError,
    transport::{BoxFuture, ContentSource},
};

/// In-memory [`ContentSource`]: a fixed map from locator to text.
///
/// Handy for tests and offline demos where fetching a live page is not an
/// option.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    pages: HashMap<String, String>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, locator: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.insert(locator.into(), text.into());
        self
    }

    pub fn insert(&mut self, locator: impl Into<String>, text: impl Into<String>) {
        self.pages.insert(locator.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<L, T> FromIterator<(L, T)> for StaticContentSource
where
    L: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self {
            pages: iter
                .into_iter()
                .map(|(locator, text)| (locator.into(), text.into()))
                .collect(),
        }
    }
}

impl ContentSource for StaticContentSource {
    fn fetch<'a>(&'a self, locator: &'a str) -> BoxFuture<'a, Result<String, ContentError>> {
        let found = self
            .pages
            .get(locator)
            .cloned()
            .ok_or_else(|| ContentError::Unreachable {
                locator: locator.to_owned(),
                reason: "no such page".into(),
            });
        Box::pin(async move { found })
    }
}
