//! Local structural validation of JSON payloads against a
//! [`SchemaDefinition`].
//!
//! Server-side enforcement is never trusted on its own: every payload is
//! checked here before it is handed to the caller.  The check covers presence
//! of required fields, absence of undeclared fields in closed-world objects
//! and the runtime kind of every value.

use serde_json::Value;

use crate::{
    error::ValidationError,
    schema::{FieldKind, SchemaDefinition},
};

/// Parse `raw` as JSON and validate it against `definition`.
pub fn decode(raw: &str, definition: &SchemaDefinition) -> Result<Value, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::Parse(e.to_string()))?;
    validate(&value, definition)?;
    Ok(value)
}

/// Validate an already parsed value. The root must be an object.
pub fn validate(value: &Value, definition: &SchemaDefinition) -> Result<(), ValidationError> {
    validate_object(value, definition, "$")
}

fn validate_object(
    value: &Value,
    definition: &SchemaDefinition,
    path: &str,
) -> Result<(), ValidationError> {
    let Value::Object(map) = value else {
        return Err(ValidationError::TypeMismatch {
            path: path.to_owned(),
            expected: format!("object `{}`", definition.name()),
            found: json_kind(value),
        });
    };

    for field in definition.fields() {
        let field_path = format!("{path}.{}", field.name());
        match map.get(field.name()) {
            None if field.is_required() => {
                return Err(ValidationError::MissingField { path: field_path });
            }
            None => {}
            Some(Value::Null) if field.is_nullable() => {}
            Some(Value::Null) => return Err(ValidationError::UnexpectedNull { path: field_path }),
            Some(value) => validate_kind(value, field.kind(), &field_path)?,
        }
    }

    if definition.is_closed()
        && let Some(extra) = map.keys().find(|key| definition.field(key).is_none())
    {
        return Err(ValidationError::UnexpectedField {
            path: format!("{path}.{extra}"),
        });
    }

    Ok(())
}

fn validate_kind(value: &Value, kind: &FieldKind, path: &str) -> Result<(), ValidationError> {
    match (kind, value) {
        (FieldKind::String, Value::String(_))
        | (FieldKind::Number, Value::Number(_))
        | (FieldKind::Boolean, Value::Bool(_)) => Ok(()),
        // `3.0` is a float to serde, so it would not decode into an integer type.
        (FieldKind::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
        (FieldKind::Enum(variants), Value::String(s)) => {
            if variants.iter().any(|v| v == s) {
                Ok(())
            } else {
                Err(ValidationError::NotInEnum {
                    path: path.to_owned(),
                    value: s.clone(),
                })
            }
        }
        (FieldKind::Array(item), Value::Array(items)) => {
            for (index, element) in items.iter().enumerate() {
                validate_kind(element, item, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        (FieldKind::Object(definition), _) => validate_object(value, definition, path),
        (FieldKind::Map(inner), Value::Object(map)) => {
            for (key, element) in map {
                validate_kind(element, inner, &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        (expected, found) => Err(ValidationError::TypeMismatch {
            path: path.to_owned(),
            expected: expected.describe(),
            found: json_kind(found),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::Field;

    fn product_search() -> SchemaDefinition {
        SchemaDefinition::builder("product_search")
            .required(
                "category",
                FieldKind::enumeration(["shoes", "jackets", "tops", "bottoms"]),
            )
            .required("subcategory", FieldKind::String)
            .required("color", FieldKind::String)
            .build()
    }

    #[test]
    fn accepts_conforming_payload() {
        let raw = r#"{"category":"jackets","subcategory":"rain jackets","color":"black"}"#;
        let value = decode(raw, &product_search()).unwrap();
        assert_eq!(value["color"], "black");
    }

    #[test]
    fn reports_missing_unexpected_and_enum_errors() {
        let def = product_search();

        assert_eq!(
            decode(r#"{"category":"shoes","subcategory":"boots"}"#, &def),
            Err(ValidationError::MissingField {
                path: "$.color".into()
            })
        );
        assert_eq!(
            decode(
                r#"{"category":"shoes","subcategory":"boots","color":"red","size":42}"#,
                &def
            ),
            Err(ValidationError::UnexpectedField {
                path: "$.size".into()
            })
        );
        assert_eq!(
            decode(
                r#"{"category":"hats","subcategory":"caps","color":"red"}"#,
                &def
            ),
            Err(ValidationError::NotInEnum {
                path: "$.category".into(),
                value: "hats".into()
            })
        );
    }

    #[test]
    fn reports_empty_and_unparseable_content() {
        let def = product_search();
        assert_eq!(decode("  ", &def), Err(ValidationError::EmptyContent));
        assert!(matches!(
            decode("{\"category\":", &def),
            Err(ValidationError::Parse(_))
        ));
    }

    #[test]
    fn checks_nested_kinds_with_paths() {
        let step = SchemaDefinition::builder("step")
            .required("explanation", FieldKind::String)
            .required("output", FieldKind::String)
            .build();
        let def = SchemaDefinition::builder("math_reasoning")
            .required("steps", FieldKind::array(FieldKind::Object(step)))
            .required("final_answer", FieldKind::String)
            .build();

        let value = json!({
            "steps": [
                { "explanation": "subtract 7", "output": "8x = -30" },
                { "explanation": "divide", "output": 3 }
            ],
            "final_answer": "x = -15/4"
        });

        assert_eq!(
            validate(&value, &def),
            Err(ValidationError::TypeMismatch {
                path: "$.steps[1].output".into(),
                expected: "string".into(),
                found: "number",
            })
        );
    }

    #[test]
    fn nullability_and_open_objects() {
        let def = SchemaDefinition::builder("loose")
            .field(Field::new("count", FieldKind::Integer).nullable())
            .field(Field::new("label", FieldKind::String))
            .optional("extra", FieldKind::Boolean)
            .open()
            .build();

        assert!(validate(&json!({ "count": null, "label": "x", "other": 1 }), &def).is_ok());
        assert!(validate(&json!({ "count": 2, "label": "x" }), &def).is_ok());
        assert_eq!(
            validate(&json!({ "count": 2.0, "label": "x" }), &def),
            Err(ValidationError::TypeMismatch {
                path: "$.count".into(),
                expected: "integer".into(),
                found: "number",
            })
        );
        assert_eq!(
            validate(&json!({ "count": 1, "label": null }), &def),
            Err(ValidationError::UnexpectedNull {
                path: "$.label".into()
            })
        );
        assert!(matches!(
            validate(&json!({ "count": 1.5, "label": "x" }), &def),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }
}
