//! Derive a [`SchemaDefinition`] from Rust type information.
//!
//! The JSON Schema is produced with [`schemars`] and then folded back into
//! the explicit definition tree, so a typed output declared with
//! `#[derive(JsonSchema)]` goes through the same compiler and validator as a
//! hand-built one.
//!
//! Closed-world objects come from `#[serde(deny_unknown_fields)]`.  Inside
//! such an object an `Option<T>` field becomes required and nullable, so the
//! service must always emit the key but may send `null` for `None`.  Do not
//! mark it `#[schemars(required)]`: schemars then drops the `null` branch.
//! Fields that are skippable without admitting `null` (e.g.
//! `#[serde(default)]`) stay optional and fail to compile as strict.
//!
//! ```rust
//! use schemata_core::schema::SchemaDefinition;
//! use schemars::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! #[serde(deny_unknown_fields)]
//! struct Hello { greeting: String }
//!
//! let def = SchemaDefinition::from_type::<Hello>().unwrap();
//! assert_eq!(def.name(), "Hello");
//! assert!(def.is_closed());
//! ```

use schemars::{JsonSchema, r#gen::SchemaSettings};
use serde_json::{Map, Value};

use crate::error::SchemaError;

use super::{Field, FieldKind, SchemaDefinition};

impl SchemaDefinition {
    /// Build a definition for `T`, named after the schema title.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedType`] for constructs the definition tree
    /// cannot represent (untagged unions, unconstrained values, tuples).
    pub fn from_type<T>() -> Result<Self, SchemaError>
    where
        T: JsonSchema,
    {
        let root = root_schema_for::<T>()?;
        let name = root
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| T::schema_name());

        object_from_schema(name, &root, "$")
    }

    /// Same as [`Self::from_type`] but with an explicit name.
    pub fn from_type_named<T>(name: impl Into<String>) -> Result<Self, SchemaError>
    where
        T: JsonSchema,
    {
        let root = root_schema_for::<T>()?;
        object_from_schema(name.into(), &root, "$")
    }
}

fn root_schema_for<T: JsonSchema>() -> Result<Map<String, Value>, SchemaError> {
    // Inline everything so there are no `$ref`s to resolve.
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let root = settings.into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(root) {
        Ok(Value::Object(obj)) => Ok(obj),
        _ => Err(unsupported("$", "non-object root schema")),
    }
}

fn object_from_schema(
    name: String,
    schema: &Map<String, Value>,
    path: &str,
) -> Result<SchemaDefinition, SchemaError> {
    let empty = Map::new();
    let properties = match schema.get("properties") {
        Some(Value::Object(props)) => props,
        Some(_) => return Err(unsupported(path, "non-object `properties`")),
        None => &empty,
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let closed = schema.get("additionalProperties") == Some(&Value::Bool(false));

    let mut builder = SchemaDefinition::builder(name);
    if let Some(description) = schema.get("description").and_then(Value::as_str) {
        builder = builder.description(description);
    }
    if !closed {
        builder = builder.open();
    }

    for (field_name, field_schema) in properties {
        let field_path = format!("{path}.{field_name}");
        let (kind, nullable) = kind_from_schema(field_name, field_schema, &field_path)?;

        // Closed objects express `Option<T>` as required + nullable.
        let mut field = Field::new(field_name.clone(), kind);
        if !required.contains(&field_name.as_str()) && !(closed && nullable) {
            field = field.optional();
        }
        if nullable {
            field = field.nullable();
        }
        if let Some(description) = field_schema.get("description").and_then(Value::as_str) {
            field = field.with_description(description);
        }
        builder = builder.field(field);
    }

    Ok(builder.build())
}

/// Map a property schema to a kind plus its nullability.
fn kind_from_schema(
    name: &str,
    schema: &Value,
    path: &str,
) -> Result<(FieldKind, bool), SchemaError> {
    let Value::Object(obj) = schema else {
        return Err(unsupported(path, "unconstrained value"));
    };

    if let Some(Value::Array(branches)) = obj.get("anyOf").or_else(|| obj.get("oneOf")) {
        let non_null: Vec<&Value> = branches.iter().filter(|b| !is_null_schema(b)).collect();
        return match non_null.as_slice() {
            [single] if non_null.len() < branches.len() => {
                let (kind, _) = kind_from_schema(name, single, path)?;
                Ok((kind, true))
            }
            _ => Err(unsupported(path, "union of several types")),
        };
    }

    if let Some(Value::Array(parts)) = obj.get("allOf") {
        return match parts.as_slice() {
            [single] => kind_from_schema(name, single, path),
            _ => Err(unsupported(path, "intersection of several types")),
        };
    }

    let (ty, mut nullable) = match obj.get("type") {
        Some(Value::String(ty)) => (ty.as_str(), false),
        Some(Value::Array(types)) => {
            let non_null: Vec<&str> = types
                .iter()
                .filter_map(Value::as_str)
                .filter(|t| *t != "null")
                .collect();
            match non_null.as_slice() {
                [single] => (*single, non_null.len() < types.len()),
                _ => return Err(unsupported(path, "union of several types")),
            }
        }
        _ if obj.contains_key("enum") => ("string", false),
        _ => return Err(unsupported(path, "value without a type")),
    };

    if let Some(Value::Array(variants)) = obj.get("enum") {
        let mut names = Vec::with_capacity(variants.len());
        for variant in variants {
            match variant {
                Value::String(s) => names.push(s.clone()),
                Value::Null => nullable = true,
                _ => return Err(unsupported(path, "non-string enumeration")),
            }
        }
        return Ok((FieldKind::Enum(names), nullable));
    }

    let kind = match ty {
        "string" => FieldKind::String,
        "integer" => FieldKind::Integer,
        "number" => FieldKind::Number,
        "boolean" => FieldKind::Boolean,
        "array" => match obj.get("items") {
            Some(items @ Value::Object(_)) => {
                let (item, _) = kind_from_schema(name, items, &format!("{path}[]"))?;
                FieldKind::array(item)
            }
            _ => return Err(unsupported(path, "tuple or untyped array")),
        },
        "object" => match obj.get("additionalProperties") {
            Some(value @ Value::Object(_)) if !obj.contains_key("properties") => {
                let (value, _) = kind_from_schema(name, value, &format!("{path}.*"))?;
                FieldKind::map(value)
            }
            _ => FieldKind::Object(object_from_schema(name.to_owned(), obj, path)?),
        },
        other => return Err(unsupported(path, other)),
    };

    Ok((kind, nullable))
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn unsupported(path: &str, kind: &str) -> SchemaError {
    SchemaError::UnsupportedType {
        path: path.to_owned(),
        kind: kind.to_owned(),
    }
}
