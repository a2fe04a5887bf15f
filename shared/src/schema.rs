//! Entity schemas and the field normalizer
//!
//! Every attribute of a hosted table has two spellings: the remote one
//! (`first_name_c`) that the hosted API accepts, and the legacy camelCase one
//! (`firstName`) that older callers still produce. Reads accept either,
//! preferring the remote value; writes only ever carry remote keys.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::request::SortType;

/// Record identifier key
pub const ID_FIELD: &str = "Id";

/// Display name key, present on every hosted table
pub const NAME_FIELD: &str = "Name";

/// Creation timestamp maintained by the hosted API
pub const CREATED_ON_FIELD: &str = "CreatedOn";

/// One attribute under both naming conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPair {
    pub remote: &'static str,
    pub legacy: &'static str,
}

impl FieldPair {
    pub const fn new(remote: &'static str, legacy: &'static str) -> Self {
        Self { remote, legacy }
    }

    /// Resolve this attribute on a raw record
    ///
    /// Returns the remote value when present and non-null, otherwise the
    /// legacy value when present and non-null.
    pub fn pick<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        non_null(record.get(self.remote)).or_else(|| non_null(record.get(self.legacy)))
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Static description of one entity type
#[derive(Debug)]
pub struct Schema {
    /// Hosted table name (e.g. `room_c`)
    pub table: &'static str,
    /// Capitalised entity name used in error messages
    pub title: &'static str,
    /// Lowercase singular, used in log lines
    pub label: &'static str,
    /// Lowercase plural, used in log lines
    pub plural: &'static str,
    /// Writable attributes
    pub fields: &'static [FieldPair],
    /// Default list ordering
    pub order_by: Option<(&'static str, SortType)>,
}

impl Schema {
    /// Names requested from the hosted API (display name first)
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(NAME_FIELD).chain(self.fields.iter().map(|f| f.remote))
    }

    /// Whether `key` may appear in a write payload
    pub fn is_writable(&self, key: &str) -> bool {
        key == ID_FIELD || key == NAME_FIELD || self.fields.iter().any(|f| f.remote == key)
    }

    /// Rewrite a raw record into remote shape
    ///
    /// `Id` and `Name` pass through; every attribute is resolved through
    /// [`FieldPair::pick`] independently, so a record may mix both shapes.
    /// Keys outside the schema are dropped.
    pub fn normalize(&self, record: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();
        for key in [ID_FIELD, NAME_FIELD] {
            if let Some(value) = non_null(record.get(key)) {
                out.insert(key.to_string(), value.clone());
            }
        }
        for pair in self.fields {
            if let Some(value) = pair.pick(record) {
                out.insert(pair.remote.to_string(), value.clone());
            }
        }
        out
    }

    /// Normalize a raw record and decode it into a typed value
    pub fn decode<T: DeserializeOwned>(&self, record: &Value) -> Result<T, serde_json::Error> {
        match record {
            Value::Object(map) => serde_json::from_value(Value::Object(self.normalize(map))),
            other => serde_json::from_value(other.clone()),
        }
    }
}
