//! Input validation for tool invocations.
//!
//! Raw MCP arguments arrive as a JSON object. `validate()` deserializes
//! them once, at the boundary, into the tool's typed parameter record.
//! When that fails, every declared parameter is checked against the
//! derived schema so the caller learns about all offending fields at once.

use std::fmt;

use rmcp::model::JsonObject;
use serde::Deserialize;
use thiserror::Error;

use super::params::ToolArguments;
use super::registry::ToolDefinition;

/// One problem found with one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Arguments did not match the tool's schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub tool: &'static str,
    pub issues: Vec<FieldIssue>,
}

fn render_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate raw arguments for the given tool.
///
/// Extra keys the tool does not declare are ignored.
pub fn validate(
    definition: &ToolDefinition,
    arguments: &JsonObject,
) -> Result<ToolArguments, ValidationError> {
    definition.parse(arguments).map_err(|error| {
        let mut issues = field_issues(definition, arguments);
        if issues.is_empty() {
            issues.push(FieldIssue {
                field: "arguments".to_string(),
                message: error.to_string(),
            });
        }
        ValidationError {
            tool: definition.name,
            issues,
        }
    })
}

fn field_issues(definition: &ToolDefinition, arguments: &JsonObject) -> Vec<FieldIssue> {
    let required = definition.required_params();

    definition
        .param_names()
        .into_iter()
        .filter_map(|field| {
            let message = match arguments.get(&field) {
                Some(value) => String::deserialize(value).err()?.to_string(),
                None if required.contains(&field) => "required".to_string(),
                None => return None,
            };
            Some(FieldIssue { field, message })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::params::{Arguments, Param};
    use crate::domains::tools::registry::ToolRegistry;
    use serde_json::{Value, json};

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn definition(name: &str) -> &'static ToolDefinition {
        ToolRegistry::new().get(name).unwrap()
    }

    fn fields(err: &ValidationError) -> Vec<&str> {
        err.issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn test_required_param_present() {
        let result = validate(
            definition("get_transaction_info"),
            &args(json!({ "transaction_hash": "0xabc" })),
        )
        .unwrap();
        assert_eq!(result.get(Param::TransactionHash), Some("0xabc"));
    }

    #[test]
    fn test_required_param_missing() {
        let err = validate(definition("get_transaction_info"), &args(json!({}))).unwrap_err();
        assert_eq!(fields(&err), vec!["transaction_hash"]);
        assert_eq!(err.tool, "get_transaction_info");
        assert_eq!(err.to_string(), "transaction_hash: required");
    }

    #[test]
    fn test_wrong_types_reported_for_every_field() {
        let err = validate(
            definition("get_address_token_transfers"),
            &args(json!({ "address_hash": 12, "type": null, "filter": "to" })),
        )
        .unwrap_err();

        assert_eq!(fields(&err), vec!["address_hash", "type"]);
        assert_eq!(
            err.to_string(),
            "address_hash: invalid type: integer `12`, expected a string; \
             type: invalid type: null, expected a string"
        );
    }

    #[test]
    fn test_missing_and_wrong_type_together() {
        let err = validate(
            definition("refetch_token_instance_metadata"),
            &args(json!({ "address_hash": "0xabc", "id": 7 })),
        )
        .unwrap_err();

        assert_eq!(fields(&err), vec!["id", "recaptcha_response"]);
    }

    #[test]
    fn test_optional_params_absent() {
        let result = validate(definition("get_transactions"), &args(json!({}))).unwrap();
        for param in Param::ALL {
            assert_eq!(result.get(param), None);
        }
    }

    #[test]
    fn test_extra_params_ignored() {
        let result = validate(
            definition("get_blocks"),
            &args(json!({ "type": "uncle", "address_hash": "0xabc", "limit": 5 })),
        )
        .unwrap();

        assert_eq!(result.get(Param::Type), Some("uncle"));
        assert_eq!(result.get(Param::AddressHash), None);
    }
}
