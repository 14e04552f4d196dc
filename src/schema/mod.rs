//! Declarative schemas for tool payloads.
//!
//! Tool inputs that cannot be typed up front (free-form update objects,
//! paint operation lists) are validated against a [`JsonSchema`] before any
//! mutation is attempted. Schemas are built once per tool definition and
//! reused across calls.

mod validate;

pub use validate::{validate, ValidationError, ValidationReason};

use serde_json::Value;
use std::collections::BTreeMap;

/// JSON value types a schema node can constrain to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn name(self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
        }
    }
}

/// A recursive schema node — the JSON-Schema subset the tool layer needs.
///
/// A node with no type and no structural keys imposes no constraint; this is
/// intentional and used for free-form fields such as a generic trigger value.
#[derive(Debug, Clone, Default)]
pub struct JsonSchema {
    pub schema_type: Option<SchemaType>,
    pub enum_values: Option<Vec<Value>>,
    pub any_of: Option<Vec<JsonSchema>>,
    pub properties: Option<BTreeMap<String, JsonSchema>>,
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<bool>,
    pub items: Option<Box<JsonSchema>>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl JsonSchema {
    /// Unconstrained node — accepts any value.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn object() -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            ..Self::default()
        }
    }

    pub fn array_of(items: JsonSchema) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self {
            schema_type: Some(SchemaType::String),
            ..Self::default()
        }
    }

    pub fn number() -> Self {
        Self {
            schema_type: Some(SchemaType::Number),
            ..Self::default()
        }
    }

    pub fn boolean() -> Self {
        Self {
            schema_type: Some(SchemaType::Boolean),
            ..Self::default()
        }
    }

    /// String constrained to a closed set of literals.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema_type: Some(SchemaType::String),
            enum_values: Some(values.into_iter().map(|s| Value::String(s.into())).collect()),
            ..Self::default()
        }
    }

    /// Value must satisfy at least one alternative, checked in order.
    pub fn any_of<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = JsonSchema>,
    {
        Self {
            any_of: Some(alternatives.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Fixed-length numeric tuple, e.g. a `[x, y, z]` vector.
    pub fn number_tuple(len: usize) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(Self::number())),
            min_items: Some(len),
            max_items: Some(len),
            ..Self::default()
        }
    }

    pub fn prop(mut self, key: impl Into<String>, schema: JsonSchema) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), schema);
        self
    }

    pub fn require<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Reject keys not declared in `properties`.
    pub fn closed(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}
