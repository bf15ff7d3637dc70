//! Typed remote-callable procedures over `ContactService`, for programmatic callers.
//!
//! Each tool has an id, a human name, a description, and JSON Schemas for its
//! input and output generated from the Rust types. Errors use the same codes
//! as the HTTP error body.

mod contact;
pub mod stdio;

pub use contact::{
    ContactIdInput, ContactList, ContactTools, CreateContactInput, DeleteResult, GetContactsInput,
    UpdateContactInput, CONTACT_CREATE, CONTACT_DELETE, CONTACT_GET_ALL, CONTACT_GET_BY_ID, CONTACT_UPDATE,
};

use crate::error::{AppError, ValidationError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Failure of one tool invocation.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{code}: {message}")]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolError {
    pub fn unknown_tool(id: &str) -> Self {
        ToolError {
            code: "unknown_tool".into(),
            message: format!("no tool named '{}'", id),
            details: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ToolError {
            code: "invalid_request".into(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<AppError> for ToolError {
    fn from(e: AppError) -> Self {
        let d = e.detail();
        ToolError {
            code: d.code,
            message: d.message,
            details: d.details,
        }
    }
}

/// Decode a tool input, reporting shape errors as validation failures. A missing input is `{}`.
fn decode<T: serde::de::DeserializeOwned>(input: Value) -> Result<T, AppError> {
    let input = if input.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| {
        let mut issues = ValidationError::default();
        issues.push("input", "schema", e.to_string());
        AppError::Validation(issues)
    })
}

fn schema_of<T: utoipa::PartialSchema>() -> Value {
    serde_json::to_value(T::schema()).unwrap_or(Value::Null)
}
