use std::{collections::BTreeSet, sync::Arc};

use serde_json::{Map, Value, json};

use crate::error::SchemaError;

use super::{FieldKind, SchemaDefinition};

/// Wire-level constraint document derived 1:1 from a [`SchemaDefinition`].
///
/// Cloning is cheap; the source definition is shared so the interpreter can
/// re-validate replies without recompiling.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    name: String,
    strict: bool,
    document: Value,
    definition: Arc<SchemaDefinition>,
}

impl CompiledSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` when every object node of the tree is closed-world.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// The JSON-Schema document to forward to the enforcement service.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    /// Canonical serialization of [`Self::document`].
    pub fn to_bytes(&self) -> Vec<u8> {
        self.document.to_string().into_bytes()
    }
}

/// Compile a definition into its wire document.
///
/// Pure and deterministic: equal definitions always yield byte-identical
/// documents.
///
/// # Errors
///
/// * [`SchemaError::InvalidName`] – root name is not `[A-Za-z0-9_-]{1,64}`.
/// * [`SchemaError::NonStrictObject`] – a closed-world object has a field
///   that is not required.
/// * [`SchemaError::UnsupportedType`] – the tree contains a dynamic-key map.
/// * [`SchemaError::DuplicateField`] / [`SchemaError::EmptyEnum`].
pub fn compile(definition: &SchemaDefinition) -> Result<CompiledSchema, SchemaError> {
    validate_name(definition.name())?;

    let mut strict = true;
    let document = compile_object(definition, "$", &mut strict)?;

    Ok(CompiledSchema {
        name: definition.name().to_owned(),
        strict,
        document,
        definition: Arc::new(definition.clone()),
    })
}

pub(crate) fn validate_name(name: &str) -> Result<(), SchemaError> {
    let valid = (1..=64).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidName(name.to_owned()))
    }
}

fn compile_object(
    definition: &SchemaDefinition,
    path: &str,
    strict: &mut bool,
) -> Result<Value, SchemaError> {
    let mut properties = Map::new();
    let mut required = Vec::with_capacity(definition.fields().len());
    let mut seen = BTreeSet::new();

    for field in definition.fields() {
        if !seen.insert(field.name()) {
            return Err(SchemaError::DuplicateField {
                path: path.to_owned(),
                field: field.name().to_owned(),
            });
        }

        if definition.is_closed() && !field.is_required() {
            return Err(SchemaError::NonStrictObject {
                path: path.to_owned(),
                field: field.name().to_owned(),
            });
        }

        let field_path = format!("{path}.{}", field.name());
        let mut schema = compile_kind(field.kind(), &field_path, strict)?;
        if field.is_nullable() {
            schema = make_nullable(schema);
        }
        if let (Some(description), Value::Object(obj)) = (field.description(), &mut schema) {
            obj.insert("description".into(), Value::String(description.to_owned()));
        }

        properties.insert(field.name().to_owned(), schema);
        if field.is_required() {
            required.push(Value::String(field.name().to_owned()));
        }
    }

    let mut object = Map::new();
    object.insert("type".into(), Value::String("object".into()));
    if let Some(description) = definition.description() {
        object.insert("description".into(), Value::String(description.to_owned()));
    }
    object.insert("properties".into(), Value::Object(properties));
    object.insert("required".into(), Value::Array(required));

    if definition.is_closed() {
        object.insert("additionalProperties".into(), Value::Bool(false));
    } else {
        *strict = false;
    }

    Ok(Value::Object(object))
}

fn compile_kind(kind: &FieldKind, path: &str, strict: &mut bool) -> Result<Value, SchemaError> {
    let schema = match kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::Integer => json!({ "type": "integer" }),
        FieldKind::Number => json!({ "type": "number" }),
        FieldKind::Boolean => json!({ "type": "boolean" }),
        FieldKind::Enum(variants) => {
            if variants.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    path: path.to_owned(),
                });
            }
            json!({ "type": "string", "enum": variants })
        }
        FieldKind::Array(item) => {
            let items = compile_kind(item, &format!("{path}[]"), strict)?;
            json!({ "type": "array", "items": items })
        }
        FieldKind::Object(definition) => compile_object(definition, path, strict)?,
        FieldKind::Map(_) => {
            return Err(SchemaError::UnsupportedType {
                path: path.to_owned(),
                kind: "map with dynamic keys".into(),
            });
        }
    };

    Ok(schema)
}

/// Admit `null` next to the compiled type.
///
/// Scalars and arrays use a type union, objects are wrapped in `anyOf`.
fn make_nullable(schema: Value) -> Value {
    let mut obj = match schema {
        Value::Object(obj) => obj,
        other => return other,
    };

    let ty = obj.get("type").and_then(Value::as_str).map(str::to_owned);
    match ty {
        Some(ty) if ty != "object" => {
            obj.insert("type".into(), json!([ty, "null"]));
            if let Some(Value::Array(variants)) = obj.get_mut("enum") {
                variants.push(Value::Null);
            }
            Value::Object(obj)
        }
        _ => json!({ "anyOf": [Value::Object(obj), { "type": "null" }] }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn math_reasoning() -> SchemaDefinition {
        let step = SchemaDefinition::builder("step")
            .required("explanation", FieldKind::String)
            .required("output", FieldKind::String)
            .build();

        SchemaDefinition::builder("math_reasoning")
            .required("steps", FieldKind::array(FieldKind::Object(step)))
            .required("final_answer", FieldKind::String)
            .build()
    }

    #[test]
    fn compiles_nested_closed_objects() {
        let compiled = compile(&math_reasoning()).unwrap();

        assert_eq!(compiled.name(), "math_reasoning");
        assert!(compiled.strict());
        assert_eq!(
            compiled.document(),
            &json!({
                "type": "object",
                "properties": {
                    "steps": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "explanation": { "type": "string" },
                                "output": { "type": "string" }
                            },
                            "required": ["explanation", "output"],
                            "additionalProperties": false
                        }
                    },
                    "final_answer": { "type": "string" }
                },
                "required": ["steps", "final_answer"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn compilation_is_deterministic() {
        let def = math_reasoning();
        let first = compile(&def).unwrap();
        let second = compile(&def.clone()).unwrap();

        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn keys_follow_declaration_order() {
        let def = SchemaDefinition::builder("ordered")
            .required("zeta", FieldKind::String)
            .required("alpha", FieldKind::Integer)
            .build();

        let bytes = compile(&def).unwrap().to_bytes();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"type":"object","properties":{"zeta":{"type":"string"},"alpha":{"type":"integer"}},"required":["zeta","alpha"],"additionalProperties":false}"#
        );
    }

    #[test]
    fn rejects_optional_field_in_nested_closed_object() {
        let inner = SchemaDefinition::builder("concept")
            .required("title", FieldKind::String)
            .optional("description", FieldKind::String)
            .build();
        let def = SchemaDefinition::builder("summary")
            .required("concepts", FieldKind::array(FieldKind::Object(inner)))
            .build();

        assert_eq!(
            compile(&def).unwrap_err(),
            SchemaError::NonStrictObject {
                path: "$.concepts[]".into(),
                field: "description".into(),
            }
        );
    }

    #[test]
    fn open_objects_may_have_optional_fields_but_are_not_strict() {
        let def = SchemaDefinition::builder("loose")
            .required("a", FieldKind::String)
            .optional("b", FieldKind::Integer)
            .open()
            .build();

        let compiled = compile(&def).unwrap();
        assert!(!compiled.strict());
        assert_eq!(compiled.document()["required"], json!(["a"]));
        assert!(compiled.document().get("additionalProperties").is_none());
    }

    #[test]
    fn rejects_dynamic_key_maps() {
        let def = SchemaDefinition::builder("tags")
            .required("labels", FieldKind::map(FieldKind::String))
            .build();

        assert!(matches!(
            compile(&def),
            Err(SchemaError::UnsupportedType { path, .. }) if path == "$.labels"
        ));
    }

    #[test]
    fn rejects_bad_names_duplicates_and_empty_enums() {
        let bad_name = SchemaDefinition::builder("has space").build();
        assert_eq!(
            compile(&bad_name).unwrap_err(),
            SchemaError::InvalidName("has space".into())
        );

        let dup = SchemaDefinition::builder("dup")
            .required("x", FieldKind::String)
            .required("x", FieldKind::Integer)
            .build();
        assert!(matches!(
            compile(&dup),
            Err(SchemaError::DuplicateField { field, .. }) if field == "x"
        ));

        let empty = SchemaDefinition::builder("empty")
            .required("choice", FieldKind::Enum(vec![]))
            .build();
        assert!(matches!(compile(&empty), Err(SchemaError::EmptyEnum { .. })));
    }

    #[test]
    fn nullable_fields_admit_null() {
        let inner = SchemaDefinition::builder("inner")
            .required("x", FieldKind::Integer)
            .build();
        let def = SchemaDefinition::builder("nullable")
            .field(Field::new("color", FieldKind::enumeration(["red"])).nullable())
            .field(Field::new("inner", FieldKind::Object(inner)).nullable())
            .field(
                Field::new("note", FieldKind::String)
                    .nullable()
                    .with_description("free text"),
            )
            .build();

        let doc = compile(&def).unwrap().document().clone();
        assert_eq!(
            doc["properties"]["color"],
            json!({ "type": ["string", "null"], "enum": ["red", null] })
        );
        assert_eq!(doc["properties"]["inner"]["anyOf"][1], json!({ "type": "null" }));
        assert_eq!(
            doc["properties"]["note"],
            json!({ "type": ["string", "null"], "description": "free text" })
        );
    }
}
