//! Tool handler implementations. The `#[tool]` entry points live in
//! `server.rs`; the bodies here do the actual work.

mod animations;
mod elements;
mod session;
mod textures;
mod validate;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BlockhostError;
use crate::mcp::error::ToolError;
use crate::mcp::schemas::{known_operations, operation_schema};
use crate::mcp::types::GroupedInput;
use crate::schema::validate as validate_schema;

/// The two-stage gate for grouped tools: look up the operation's declared
/// schema, validate the raw parameter map against it, and only then
/// deserialize into the typed request enum. Nothing reaches a mutator
/// without passing here first.
pub(crate) fn decode_request<T: DeserializeOwned>(
    tool: &'static str,
    input: GroupedInput,
) -> Result<T, ToolError> {
    let schema = operation_schema(tool, &input.operation).ok_or_else(|| {
        ToolError::unknown_operation(tool, &input.operation, &known_operations(tool))
    })?;

    validate_schema(schema, &Value::Object(input.params.clone()))?;

    // Reconstruct the full tagged request for deserialization. The declared
    // schemas are looser than the typed enums (no integer constraint, see
    // `schemas.rs`), so a schema-valid payload can still fail here; that is
    // a caller error, not an internal one.
    let mut full = input.params;
    full.insert("operation".to_string(), Value::String(input.operation));
    serde_json::from_value(Value::Object(full)).map_err(|e| {
        ToolError::from(BlockhostError::Serialization(format!(
            "Invalid {} parameters: {}",
            tool, e
        )))
    })
}
