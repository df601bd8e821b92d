//! Classification of a raw reply into exactly one terminal outcome.
//!
//! Priority order:
//!
//! 1. a non-blank refusal yields [`ResponseOutcome::Refused`], whatever the
//!    content says;
//! 2. content that parses and validates against the schema yields
//!    [`ResponseOutcome::Decoded`];
//! 3. anything else yields [`ResponseOutcome::Malformed`].
//!
//! Outcomes are data, never errors, so every caller has to handle the
//! refusal and malformed branches explicitly.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::ValidationError, reply::RawReply, schema::CompiledSchema, validate::decode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome<T = Value> {
    /// Payload that passed local validation.
    Decoded(T),
    /// The service declined; carries its reason.
    Refused(String),
    /// The service broke the schema contract despite strict mode.
    Malformed { raw: String, error: ValidationError },
}

impl<T> ResponseOutcome<T> {
    pub fn is_decoded(&self) -> bool {
        matches!(self, ResponseOutcome::Decoded(_))
    }

    pub fn decoded(self) -> Option<T> {
        match self {
            ResponseOutcome::Decoded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseOutcome<U> {
        match self {
            ResponseOutcome::Decoded(payload) => ResponseOutcome::Decoded(f(payload)),
            ResponseOutcome::Refused(reason) => ResponseOutcome::Refused(reason),
            ResponseOutcome::Malformed { raw, error } => ResponseOutcome::Malformed { raw, error },
        }
    }
}

impl ResponseOutcome<Value> {
    /// Turn a decoded JSON payload into `T`.
    ///
    /// A payload that validated but does not fit `T` becomes
    /// [`ResponseOutcome::Malformed`] with [`ValidationError::Deserialize`].
    pub fn into_typed<T: DeserializeOwned>(self) -> ResponseOutcome<T> {
        match self {
            ResponseOutcome::Decoded(payload) => {
                let raw = payload.to_string();
                match serde_json::from_value(payload) {
                    Ok(typed) => ResponseOutcome::Decoded(typed),
                    Err(e) => ResponseOutcome::Malformed {
                        raw,
                        error: ValidationError::Deserialize(e.to_string()),
                    },
                }
            }
            ResponseOutcome::Refused(reason) => ResponseOutcome::Refused(reason),
            ResponseOutcome::Malformed { raw, error } => ResponseOutcome::Malformed { raw, error },
        }
    }
}

/// Classify `reply` against `schema`.
pub fn interpret(reply: &RawReply, schema: &CompiledSchema) -> ResponseOutcome {
    if let Some(reason) = reply.refusal_text() {
        tracing::info!(schema = schema.name(), reason, "service refused the request");
        return ResponseOutcome::Refused(reason.to_owned());
    }

    let raw = reply.content.as_deref().unwrap_or_default();
    match decode(raw, schema.definition()) {
        Ok(payload) => ResponseOutcome::Decoded(payload),
        Err(error) => {
            tracing::warn!(schema = schema.name(), %error, "reply violates the response schema");
            ResponseOutcome::Malformed {
                raw: raw.to_owned(),
                error,
            }
        }
    }
}
