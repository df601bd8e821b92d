//! The `product_search` function tool.
//!
//! ```rust
//! use schemata_types::product::{PRODUCT_SEARCH, product_search_tool};
//!
//! let tool = product_search_tool().unwrap();
//! assert_eq!(tool.name(), PRODUCT_SEARCH);
//! assert!(tool.parameters().strict());
//! ```

use std::fmt;

use schemars::JsonSchema;
use schemata_core::{
    dispatch::{ToolDeclaration, ToolInvocation},
    error::SchemaError,
    schema::{Field, FieldKind, SchemaDefinition},
};
use serde::{Deserialize, Serialize};

pub const PRODUCT_SEARCH: &str = "product_search";

pub const PRODUCT_SEARCH_PROMPT: &str = "You are a clothes recommendation agent, specialized in finding the perfect match for a user. \
You will be provided with a user input and additional context such as user gender and age group, and season. \
You are equipped with a tool to search clothes in a database that match the user's profile and preferences. \
Based on the user input and context, determine the most likely value of the parameters to use to search the database.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Shoes,
    Jackets,
    Tops,
    Bottoms,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Shoes,
        ProductCategory::Jackets,
        ProductCategory::Tops,
        ProductCategory::Bottoms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Shoes => "shoes",
            ProductCategory::Jackets => "jackets",
            ProductCategory::Tops => "tops",
            ProductCategory::Bottoms => "bottoms",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of a `product_search` call.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSearch {
    pub category: ProductCategory,
    pub subcategory: String,
    pub color: String,
}

impl ProductSearch {
    /// Decode the arguments of a resolved invocation.
    pub fn from_invocation(invocation: &ToolInvocation) -> Result<Self, serde_json::Error> {
        invocation.arguments_as()
    }
}

fn product_search_parameters() -> SchemaDefinition {
    let categories = FieldKind::enumeration(ProductCategory::ALL.iter().map(ProductCategory::as_str));

    SchemaDefinition::builder("product_search_parameters")
        .field(
            Field::new("category", categories)
                .with_description("The broad category of the product"),
        )
        .field(
            Field::new("subcategory", FieldKind::String)
                .with_description("The sub category of the product, within the broader category"),
        )
        .field(
            Field::new("color", FieldKind::String)
                .with_description("The color of the product"),
        )
        .build()
}

/// Declaration of `product_search(category, subcategory, color)`.
pub fn product_search_tool() -> Result<ToolDeclaration, SchemaError> {
    ToolDeclaration::new(
        PRODUCT_SEARCH,
        "Search for a match in the product database",
        &product_search_parameters(),
    )
}
