//! Recursive schema evaluator.
//!
//! Pure and deterministic: `(schema, value) -> Result<(), ValidationError>`.
//! Evaluation is fail-fast — the first failing rule for a node wins and the
//! remaining rules for that node are skipped.

use serde::Serialize;
use serde_json::Value;

use super::{JsonSchema, SchemaType};

/// Which rule rejected the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationReason {
    Type,
    Enum,
    MinItems,
    MaxItems,
    Required,
    AdditionalProperties,
    AnyOf,
}

/// A single validation failure with a locator into the offending value.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub message: String,
    /// `$.a.b[2]`-style locator into the input.
    pub path: String,
    pub reason: ValidationReason,
    /// Diagnostic payload, e.g. the sub-error of a failed `anyOf`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Validate `value` against `schema`, reporting the first violation found.
pub fn validate(schema: &JsonSchema, value: &Value) -> Result<(), ValidationError> {
    validate_at(schema, value, "$")
}

fn validate_at(schema: &JsonSchema, value: &Value, path: &str) -> Result<(), ValidationError> {
    if let Some(expected) = schema.schema_type {
        if !type_matches(expected, value) {
            return Err(ValidationError {
                message: format!(
                    "expected {}, got {}",
                    expected.name(),
                    json_type_name(value)
                ),
                path: path.to_string(),
                reason: ValidationReason::Type,
                details: None,
            });
        }
    }

    if let Some(allowed) = &schema.enum_values {
        if !allowed.iter().any(|v| v == value) {
            return Err(ValidationError {
                message: format!("value is not one of the allowed literals: {}", value),
                path: path.to_string(),
                reason: ValidationReason::Enum,
                details: None,
            });
        }
    }

    if let Some(alternatives) = &schema.any_of {
        let mut last_error = None;
        for alternative in alternatives {
            match validate_at(alternative, value, path) {
                Ok(()) => {
                    last_error = None;
                    break;
                }
                Err(e) => last_error = Some(e),
            }
        }
        if let Some(sub) = last_error {
            return Err(ValidationError {
                message: format!("value matched none of {} alternatives", alternatives.len()),
                path: path.to_string(),
                reason: ValidationReason::AnyOf,
                details: serde_json::to_value(&sub).ok(),
            });
        }
    }

    if applies_array_rule(schema) {
        if let Value::Array(elements) = value {
            if let Some(min) = schema.min_items {
                if elements.len() < min {
                    return Err(ValidationError {
                        message: format!("expected at least {} items, got {}", min, elements.len()),
                        path: path.to_string(),
                        reason: ValidationReason::MinItems,
                        details: None,
                    });
                }
            }
            if let Some(max) = schema.max_items {
                if elements.len() > max {
                    return Err(ValidationError {
                        message: format!("expected at most {} items, got {}", max, elements.len()),
                        path: path.to_string(),
                        reason: ValidationReason::MaxItems,
                        details: None,
                    });
                }
            }
            if let Some(items) = &schema.items {
                for (index, element) in elements.iter().enumerate() {
                    validate_at(items, element, &format!("{}[{}]", path, index))?;
                }
            }
        }
    }

    if applies_object_rule(schema) {
        if let Value::Object(map) = value {
            if let Some(required) = &schema.required {
                for key in required {
                    if !map.contains_key(key) {
                        return Err(ValidationError {
                            message: format!("missing required property '{}'", key),
                            path: path.to_string(),
                            reason: ValidationReason::Required,
                            details: None,
                        });
                    }
                }
            }
            if let Some(properties) = &schema.properties {
                for (key, sub_schema) in properties {
                    if let Some(sub_value) = map.get(key) {
                        validate_at(sub_schema, sub_value, &format!("{}.{}", path, key))?;
                    }
                }
            }
            // Locator points at the offending key, not the containing object.
            if schema.additional_properties == Some(false) {
                for key in map.keys() {
                    let declared = schema
                        .properties
                        .as_ref()
                        .is_some_and(|p| p.contains_key(key));
                    if !declared {
                        return Err(ValidationError {
                            message: format!("unexpected property '{}'", key),
                            path: format!("{}.{}", path, key),
                            reason: ValidationReason::AdditionalProperties,
                            details: None,
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn type_matches(expected: SchemaType, value: &Value) -> bool {
    match expected {
        SchemaType::Object => value.is_object(),
        SchemaType::Array => value.is_array(),
        SchemaType::String => value.is_string(),
        // serde_json cannot hold NaN/Infinity, but the contract says finite.
        SchemaType::Number => value.as_f64().is_some_and(f64::is_finite),
        SchemaType::Boolean => value.is_boolean(),
        SchemaType::Null => value.is_null(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn applies_array_rule(schema: &JsonSchema) -> bool {
    schema.schema_type == Some(SchemaType::Array)
        || schema.items.is_some()
        || schema.min_items.is_some()
        || schema.max_items.is_some()
}

fn applies_object_rule(schema: &JsonSchema) -> bool {
    schema.schema_type == Some(SchemaType::Object)
        || schema.properties.is_some()
        || schema.required.is_some()
        || schema.additional_properties.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unconstrained_node_accepts_anything() {
        let schema = JsonSchema::any();
        for value in [json!(null), json!(42), json!("x"), json!([1, 2]), json!({"a": 1})] {
            assert!(validate(&schema, &value).is_ok());
        }
    }

    #[test]
    fn type_rule_checks_before_structure() {
        let schema = JsonSchema::object().require(["op"]);
        let err = validate(&schema, &json!("not an object")).unwrap_err();
        assert_eq!(err.reason, ValidationReason::Type);
        assert_eq!(err.path, "$");
    }

    #[test]
    fn nested_path_locators() {
        let schema = JsonSchema::object().prop(
            "shade",
            JsonSchema::object().prop("intensity", JsonSchema::number()),
        );
        let err = validate(&schema, &json!({"shade": {"intensity": "high"}})).unwrap_err();
        assert_eq!(err.path, "$.shade.intensity");
        assert_eq!(err.reason, ValidationReason::Type);
    }

    #[test]
    fn array_element_path_uses_index() {
        let schema = JsonSchema::array_of(JsonSchema::number());
        let err = validate(&schema, &json!([1, 2, "three"])).unwrap_err();
        assert_eq!(err.path, "$[2]");
        assert_eq!(err.reason, ValidationReason::Type);
    }

    #[test]
    fn number_tuple_enforces_length() {
        let schema = JsonSchema::number_tuple(3);
        assert!(validate(&schema, &json!([0, 1.5, -2])).is_ok());
        let err = validate(&schema, &json!([0, 1])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::MinItems);
        let err = validate(&schema, &json!([0, 1, 2, 3])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::MaxItems);
    }
}
