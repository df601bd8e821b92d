//! Error taxonomy exposed by **`schemata-core`**.
//!
//! Each stage of the pipeline has its own error enum so callers can tell a
//! pre-flight mistake ([`SchemaError`], [`ConfigError`]) apart from a failure
//! of the remote exchange ([`TransportError`]) or a tool-call mismatch
//! ([`DispatchError`]).  Provider crates convert their internal errors into a
//! [`TransportError`] before handing them back.
//!
//! Refusals and malformed replies are **not** errors: they are terminal
//! outcomes carried as data by [`crate::interpret::ResponseOutcome`].

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SchemataError>;

/// Umbrella error returned by the high-level [`crate::StructuredClient`].
#[derive(Debug, Error)]
pub enum SchemataError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Passed through unchanged from the transport collaborator.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Content(#[from] ContentError),

    /// Failure while serialising or deserialising JSON payloads.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A [`crate::schema::SchemaDefinition`] could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A closed-world object leaves one of its declared fields optional.
    #[error("object `{path}` is closed-world but field `{field}` is not required")]
    NonStrictObject { path: String, field: String },

    /// The enforcement service cannot express this construct.
    #[error("`{path}` uses a type the enforcement service cannot express: {kind}")]
    UnsupportedType { path: String, kind: String },

    #[error("invalid name `{0}`: expected 1-64 characters of [A-Za-z0-9_-]")]
    InvalidName(String),

    #[error("object `{path}` declares field `{field}` more than once")]
    DuplicateField { path: String, field: String },

    #[error("enumeration at `{path}` has no variants")]
    EmptyEnum { path: String },
}

/// A request is malformed and was rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no model identifier configured")]
    MissingModel,

    #[error("conversation has no messages")]
    EmptyMessages,

    #[error("temperature {0} is outside 0.0..=2.0")]
    InvalidTemperature(f64),

    /// Strict mode was requested for a schema containing open-world objects.
    #[error("strict mode requested but schema `{name}` contains open-world objects")]
    NonStrictSchema { name: String },

    #[error("tool `{0}` is declared more than once")]
    DuplicateTool(String),

    #[error("request carries no response schema")]
    MissingResponseSchema,

    #[error("request declares no tools")]
    NoTools,
}

/// Failure reported by the transport collaborator.
///
/// The core never interprets these; they surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connectivity(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("service returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The reply envelope itself could not be decoded. This is distinct from
    /// a malformed *content* payload, which is a regular outcome.
    #[error("couldn't decode service reply: {0}")]
    Decode(String),

    /// Generic forwarding of any transport-specific error that doesn't fit
    /// another category.
    #[error("transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// A returned tool call does not match the declared tools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("service called undeclared tool `{name}` (call `{call_id}`)")]
    UnknownTool { call_id: String, name: String },

    #[error("arguments for tool `{name}` (call `{call_id}`) are invalid: {error}")]
    InvalidArguments {
        call_id: String,
        name: String,
        raw: String,
        error: ValidationError,
    },
}

impl DispatchError {
    /// Identifier of the call this error belongs to, for answering it.
    pub fn call_id(&self) -> &str {
        match self {
            DispatchError::UnknownTool { call_id, .. }
            | DispatchError::InvalidArguments { call_id, .. } => call_id,
        }
    }
}

/// Why a payload does not conform to its schema.
///
/// Paths are rendered as `$.field[index].nested`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("reply has no content")]
    EmptyContent,

    #[error("content is not valid JSON: {0}")]
    Parse(String),

    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("unexpected field `{path}` in closed-world object")]
    UnexpectedField { path: String },

    #[error("`{path}` expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: &'static str,
    },

    #[error("`{path}` value `{value}` is not a declared variant")]
    NotInEnum { path: String, value: String },

    #[error("`{path}` is null but the field is not nullable")]
    UnexpectedNull { path: String },

    /// The payload validated but could not be turned into the caller's type.
    #[error("payload does not fit the target type: {0}")]
    Deserialize(String),
}

/// The content-source collaborator failed to produce text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("content source `{locator}` is unreachable: {reason}")]
    Unreachable { locator: String, reason: String },

    #[error("content source `{0}` yielded no text")]
    Empty(String),
}
