//! Integration tests for the schema validation engine.
//!
//! Covers the fail-fast rule order, locator conventions, and the declared
//! tool schemas that gate grouped operations.

use blockhost::schema::{validate, JsonSchema, ValidationReason};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn unconstrained_schema_accepts_every_value() {
    let schema = JsonSchema::any();
    for value in [
        json!(null),
        json!(true),
        json!(-3.5),
        json!("anything"),
        json!([1, "mixed", null]),
        json!({"nested": {"deep": [{}]}}),
    ] {
        assert!(validate(&schema, &value).is_ok(), "rejected {}", value);
    }
}

#[test]
fn required_property_missing() {
    let schema = JsonSchema::object().require(["op"]);
    let err = validate(&schema, &json!({})).unwrap_err();
    assert_eq!(err.reason, ValidationReason::Required);
    assert_eq!(err.path, "$");
    assert!(err.message.contains("op"));
}

#[test]
fn additional_properties_reports_offending_key() {
    let schema = JsonSchema::object()
        .prop("a", JsonSchema::number())
        .closed();
    let err = validate(&schema, &json!({"a": 1, "b": 2})).unwrap_err();
    assert_eq!(err.reason, ValidationReason::AdditionalProperties);
    // Convention: the locator points at the unexpected key, not the object.
    assert_eq!(err.path, "$.b");
}

#[test]
fn closed_object_with_no_declared_properties_rejects_everything() {
    let schema = JsonSchema::object().closed();
    assert!(validate(&schema, &json!({})).is_ok());
    let err = validate(&schema, &json!({"stray": 1})).unwrap_err();
    assert_eq!(err.reason, ValidationReason::AdditionalProperties);
    assert_eq!(err.path, "$.stray");
}

#[test]
fn enum_rejects_unlisted_literal() {
    let schema = JsonSchema::string_enum(["a", "b"]);
    assert!(validate(&schema, &json!("a")).is_ok());
    assert!(validate(&schema, &json!("b")).is_ok());
    let err = validate(&schema, &json!("c")).unwrap_err();
    assert_eq!(err.reason, ValidationReason::Enum);
}

#[test]
fn any_of_accepts_either_shape_and_rejects_others() {
    let schema = JsonSchema::any_of([
        JsonSchema::boolean(),
        JsonSchema::object()
            .prop("enabled", JsonSchema::boolean())
            .require(["enabled"])
            .closed(),
    ]);

    assert!(validate(&schema, &json!(true)).is_ok());
    assert!(validate(&schema, &json!({"enabled": true})).is_ok());

    let err = validate(&schema, &json!("true")).unwrap_err();
    assert_eq!(err.reason, ValidationReason::AnyOf);
    assert_eq!(err.path, "$");
    // The last alternative's sub-error rides along for diagnostics.
    assert!(err.details.is_some());
}

#[test]
fn type_failure_wins_over_structural_rules() {
    // A string can never reach the required check of an object schema.
    let schema = JsonSchema::object().require(["op"]);
    let err = validate(&schema, &json!("fill")).unwrap_err();
    assert_eq!(err.reason, ValidationReason::Type);
}

#[test]
fn first_failing_element_short_circuits() {
    let schema = JsonSchema::array_of(JsonSchema::number());
    let err = validate(&schema, &json!([1, "two", "three"])).unwrap_err();
    assert_eq!(err.path, "$[1]");
    assert_eq!(err.reason, ValidationReason::Type);
}

#[test]
fn min_and_max_items_enforced() {
    let schema = JsonSchema::array_of(JsonSchema::string())
        .min_items(1)
        .max_items(2);
    let err = validate(&schema, &json!([])).unwrap_err();
    assert_eq!(err.reason, ValidationReason::MinItems);
    let err = validate(&schema, &json!(["a", "b", "c"])).unwrap_err();
    assert_eq!(err.reason, ValidationReason::MaxItems);
    assert!(validate(&schema, &json!(["a"])).is_ok());
}

#[test]
fn nested_locator_spells_out_the_full_path() {
    let schema = JsonSchema::object().prop(
        "ops",
        JsonSchema::array_of(
            JsonSchema::object().prop(
                "shade",
                JsonSchema::object().prop("intensity", JsonSchema::number()),
            ),
        ),
    );
    let value = json!({"ops": [{"shade": {"intensity": 0.5}}, {"shade": {"intensity": "x"}}]});
    let err = validate(&schema, &value).unwrap_err();
    assert_eq!(err.path, "$.ops[1].shade.intensity");
}

#[test]
fn reason_serializes_with_wire_names() {
    let schema = JsonSchema::object()
        .prop("a", JsonSchema::number())
        .closed();
    let err = validate(&schema, &json!({"b": 1})).unwrap_err();
    let wire = serde_json::to_value(&err).unwrap();
    assert_eq!(wire["reason"], json!("additionalProperties"));
    assert_eq!(wire["path"], json!("$.b"));
}

proptest! {
    /// A schema with no type and no structural keys accepts any JSON value.
    #[test]
    fn prop_unconstrained_schema_always_ok(value in arb_json(3)) {
        prop_assert!(validate(&JsonSchema::any(), &value).is_ok());
    }

    /// Validation of a string enum never panics and only ever reports
    /// type or enum failures.
    #[test]
    fn prop_string_enum_fails_closed(value in arb_json(3)) {
        let schema = JsonSchema::string_enum(["a", "b"]);
        match validate(&schema, &value) {
            Ok(()) => prop_assert!(value == serde_json::json!("a") || value == serde_json::json!("b")),
            Err(e) => prop_assert!(matches!(
                e.reason,
                ValidationReason::Type | ValidationReason::Enum
            )),
        }
    }
}

/// Small recursive JSON value generator.
fn arb_json(depth: u32) -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z]{0,8}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(depth, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|m| {
                serde_json::Value::Object(m.into_iter().collect())
            }),
        ]
    })
}
