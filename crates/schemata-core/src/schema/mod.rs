//! Declarative description of a structured output shape.
//!
//! A [`SchemaDefinition`] is a tree of named, typed [`Field`]s.  It is
//! constructed once through [`SchemaDefinition::builder`], never mutated
//! afterwards, and can be reused for any number of requests.  Turning it into
//! a wire document is the job of [`compile`].
//!
//! ```rust
//! use schemata_core::schema::{FieldKind, SchemaDefinition};
//!
//! let step = SchemaDefinition::builder("step")
//!     .required("explanation", FieldKind::String)
//!     .required("output", FieldKind::String)
//!     .build();
//!
//! let reasoning = SchemaDefinition::builder("math_reasoning")
//!     .required("steps", FieldKind::array(FieldKind::Object(step)))
//!     .required("final_answer", FieldKind::String)
//!     .build();
//!
//! let compiled = schemata_core::schema::compile(&reasoning).unwrap();
//! assert!(compiled.strict());
//! ```

mod compile;
mod derive;

pub use compile::{CompiledSchema, compile};
pub(crate) use compile::validate_name;

/// Type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// A string restricted to the listed variants.
    Enum(Vec<String>),
    Array(Box<FieldKind>),
    Object(SchemaDefinition),
    /// Object with dynamic keys. Declarable, but rejected by [`compile`].
    Map(Box<FieldKind>),
}

impl FieldKind {
    pub fn array(item: FieldKind) -> Self {
        FieldKind::Array(Box::new(item))
    }

    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Enum(variants.into_iter().map(Into::into).collect())
    }

    pub fn map(value: FieldKind) -> Self {
        FieldKind::Map(Box::new(value))
    }

    /// Human-readable name used in validation errors.
    pub(crate) fn describe(&self) -> String {
        match self {
            FieldKind::String => "string".into(),
            FieldKind::Integer => "integer".into(),
            FieldKind::Number => "number".into(),
            FieldKind::Boolean => "boolean".into(),
            FieldKind::Enum(variants) => format!("one of [{}]", variants.join(", ")),
            FieldKind::Array(item) => format!("array of {}", item.describe()),
            FieldKind::Object(def) => format!("object `{}`", def.name()),
            FieldKind::Map(value) => format!("map of {}", value.describe()),
        }
    }
}

/// A named member of an object node.
///
/// Fields are **required** and **non-nullable** unless stated otherwise.  A
/// nullable field must still be present but may carry `null`, which is how
/// strict schemas express optional values.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    description: Option<String>,
    required: bool,
    nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: true,
            nullable: false,
        }
    }

    /// Allow the field to be omitted. Only legal on open-world objects.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// An object node: a name, an ordered set of fields and the closed-world flag.
///
/// The root and every nested object carry their own flag.  When it is set
/// (the default) no properties beyond the declared ones are permitted and
/// every field must be required.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    name: String,
    description: Option<String>,
    fields: Vec<Field>,
    closed: bool,
}

impl SchemaDefinition {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            inner: SchemaDefinition {
                name: name.into(),
                description: None,
                fields: Vec::new(),
                closed: true,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Shorthand for [`compile`].
    pub fn compile(&self) -> Result<CompiledSchema, crate::error::SchemaError> {
        compile(self)
    }
}

/// Fluent builder for [`SchemaDefinition`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    inner: SchemaDefinition,
}

impl SchemaBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.inner.fields.push(field);
        self
    }

    pub fn required(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(Field::new(name, kind))
    }

    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(Field::new(name, kind).optional())
    }

    /// Permit properties beyond the declared ones.
    pub fn open(mut self) -> Self {
        self.inner.closed = false;
        self
    }

    pub fn build(self) -> SchemaDefinition {
        self.inner
    }
}
