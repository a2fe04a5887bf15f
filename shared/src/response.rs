//! Response envelope of the hosted record API
//!
//! Every call answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "...",
//!     "data": { ... },
//!     "results": [{ "success": false, "message": "...", "errors": [...] }]
//! }
//! ```
//! `results` carries one outcome per record for batch writes and deletes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Explicit `null` decodes like an omitted field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    /// Overall verdict for the request
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Record list (fetch) or single record (get by id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Per-record outcomes (create, update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl RemoteResponse {
    /// Successful response without payload
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// Successful response with payload
    pub fn ok_with_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    /// Successful response carrying per-record outcomes
    pub fn with_results(results: Vec<RecordResult>) -> Self {
        Self {
            success: true,
            results: Some(results),
            ..Default::default()
        }
    }

    /// Rejected request
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Payload with JSON `null` treated as absent
    pub fn payload(&self) -> Option<&Value> {
        self.data.as_ref().filter(|v| !v.is_null())
    }
}

/// Outcome for one record of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Field-level validation errors
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    /// Record-level message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordResult {
    pub fn succeeded(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn failed_fields(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            errors,
            ..Default::default()
        }
    }

    /// User-facing messages carried by this outcome
    ///
    /// One entry per field error, then the record message if any.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(ToString::to_string)
            .chain(self.message.iter().cloned())
            .collect()
    }
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default, deserialize_with = "null_as_default")]
    pub field_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl FieldError {
    pub fn new(field_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_label: field_label.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_label, self.message)
    }
}
