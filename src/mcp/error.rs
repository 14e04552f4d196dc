use crate::error::BlockhostError;
use crate::schema::{ValidationError, ValidationReason};
use rmcp::model::{Content, IntoContents};
use serde::Serialize;

/// Structured error response for MCP tool calls.
/// Provides error_code + suggestion so LLMs can auto-fix.
#[derive(Debug, Serialize)]
pub struct ToolError {
    pub error_code: String,
    pub message: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl ToolError {
    pub fn unknown_operation(tool: &str, operation: &str, known: &[&str]) -> Self {
        ToolError {
            error_code: "UNKNOWN_OPERATION".into(),
            message: format!("Tool '{}' has no operation '{}'", tool, operation),
            suggestion: format!("Use one of: {}", known.join(", ")),
            field: Some("operation".into()),
            example: None,
        }
    }

    pub fn not_found(entity_type: &str, name: &str) -> Self {
        ToolError {
            error_code: "NOT_FOUND".into(),
            message: format!("{} '{}' not found in the session model", entity_type, name),
            suggestion: "List the session entities to see what exists, or create it first.".into(),
            field: Some("name".into()),
            example: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ToolError {
            error_code: "INTERNAL_ERROR".into(),
            message: message.into(),
            suggestion: "Retry the operation or simplify the request.".into(),
            field: None,
            example: None,
        }
    }
}

impl IntoContents for ToolError {
    fn into_contents(self) -> Vec<Content> {
        let json = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        vec![Content::text(json)]
    }
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        let suggestion = match err.reason {
            ValidationReason::Required => {
                "Add the missing property to the payload.".to_string()
            }
            ValidationReason::AdditionalProperties => {
                "Remove the unexpected property or check its spelling.".to_string()
            }
            ValidationReason::Enum => {
                "Use one of the allowed literal values.".to_string()
            }
            ValidationReason::AnyOf => {
                "The value matched none of the accepted shapes; check the sub-error in details."
                    .to_string()
            }
            _ => "Check the value's type and shape against the tool description.".to_string(),
        };
        ToolError {
            error_code: "VALIDATION_ERROR".into(),
            message: err.message,
            suggestion,
            field: Some(err.path),
            example: err.details,
        }
    }
}

impl From<BlockhostError> for ToolError {
    fn from(err: BlockhostError) -> Self {
        match err {
            BlockhostError::Validation(e) => e.into(),
            BlockhostError::Host(msg) => ToolError {
                error_code: "HOST_ERROR".into(),
                message: msg,
                suggestion: "The editor rejected the operation. Check that the project is open."
                    .into(),
                field: None,
                example: None,
            },
            BlockhostError::Serialization(msg) => ToolError {
                error_code: "INVALID_PARAMS".into(),
                message: msg,
                suggestion: "Check parameter format and valid values.".into(),
                field: None,
                example: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{validate, JsonSchema};
    use serde_json::json;

    #[test]
    fn test_validation_error_carries_path_as_field() {
        let schema = JsonSchema::object()
            .prop("width", JsonSchema::number())
            .require(["width"]);
        let err = validate(&schema, &json!({"width": "wide"})).unwrap_err();
        let tool_err = ToolError::from(err);
        assert_eq!(tool_err.error_code, "VALIDATION_ERROR");
        assert_eq!(tool_err.field.as_deref(), Some("$.width"));
    }

    #[test]
    fn test_unknown_operation_lists_alternatives() {
        let err = ToolError::unknown_operation("elements", "explode", &["create_bones"]);
        assert_eq!(err.error_code, "UNKNOWN_OPERATION");
        assert!(err.suggestion.contains("create_bones"));
    }

    #[test]
    fn test_host_error_classification() {
        let err = ToolError::from(BlockhostError::Host("no project open".into()));
        assert_eq!(err.error_code, "HOST_ERROR");
    }

    #[test]
    fn test_into_contents_produces_json() {
        let err = ToolError::internal("boom");
        let contents = err.into_contents();
        assert_eq!(contents.len(), 1);
    }
}
