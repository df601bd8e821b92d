//! OpenAI transport for `schemata-core`.
//!
//! Translates a [`schemata_core::request::Request`] into a
//! `POST /chat/completions` body (`response_format` of type `json_schema`,
//! strict function tools) and the first returned choice back into a
//! [`schemata_core::reply::RawReply`].

mod adapter;
pub mod api_v1;
mod client;
pub mod error;
mod transport_impl;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub use client::{OpenAiClient, RetryPolicy};
