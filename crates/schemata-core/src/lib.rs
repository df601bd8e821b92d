//! # `schemata-core`
//!
//! Provider-agnostic pipeline for schema-constrained ("structured output")
//! requests:
//!
//! | Stage                | Entry point                                   |
//! |----------------------|-----------------------------------------------|
//! | declare a shape      | [`schema::SchemaDefinition::builder`]         |
//! | compile it           | [`schema::compile`]                           |
//! | assemble a request   | [`request::RequestBuilder::build`]            |
//! | classify a reply     | [`interpret::interpret`]                      |
//! | resolve tool calls   | [`dispatch::resolve`]                         |
//! | run the whole cycle  | [`StructuredClient`] over a [`transport::Transport`] |
//!
//! The network exchange itself is delegated to a transport crate such as
//! `schemata-openai`.

pub mod dispatch;
pub mod error;
pub mod interpret;
pub mod message;
pub mod model;
pub mod reply;
pub mod request;
pub mod schema;
pub mod transport;
pub mod validate;

mod client;

pub use client::{Completion, StructuredClient, ToolCompletion};
