//! Data models
//!
//! One typed record and one draft per entity. Records are decoded from the
//! hosted API through [`Schema::decode`], so legacy field names are accepted
//! on the way in; drafts serialize to remote field names only.
//! All IDs are `i64`.

pub mod booking;
pub mod guest;
pub mod profile;
pub mod role;
pub mod room;
pub mod serde_helpers;
pub mod task;

// Re-exports
pub use booking::*;
pub use guest::*;
pub use profile::*;
pub use role::*;
pub use room::*;
pub use task::*;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::{ID_FIELD, NAME_FIELD, Schema};

/// Target of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// New record; create-time defaults apply
    Create,
    /// Existing record; the id is echoed in the payload
    Update(i64),
}

/// A stored record of one hosted table
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Draft: EntityDraft;

    const SCHEMA: &'static Schema;

    fn id(&self) -> i64;

    /// Decode a raw record in either field shape
    fn from_record(record: &Value) -> Result<Self, serde_json::Error> {
        Self::SCHEMA.decode(record)
    }
}

/// Caller-supplied attributes for a create or update
pub trait EntityDraft: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    const SCHEMA: &'static Schema;

    /// Fill unset attributes that have a create-time default
    fn apply_defaults(&mut self) {}

    /// `Name` written with the record, if one can be derived
    fn display_name(&self) -> Option<String>;

    /// Decode caller input in either field shape
    fn from_record(record: &Value) -> Result<Self, serde_json::Error> {
        Self::SCHEMA.decode(record)
    }

    /// Build the single-record write payload
    ///
    /// Only writable remote keys are emitted; unset attributes are omitted
    /// so an update touches only what the caller supplied.
    fn to_write_record(&self, mode: WriteMode) -> Result<Map<String, Value>, serde_json::Error> {
        let mut draft = self.clone();
        if mode == WriteMode::Create {
            draft.apply_defaults();
        }

        let mut record = match serde_json::to_value(&draft)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.retain(|key, value| !value.is_null() && key != ID_FIELD && Self::SCHEMA.is_writable(key));

        if let Some(name) = draft.display_name() {
            record.insert(NAME_FIELD.to_string(), Value::String(name));
        }
        if let WriteMode::Update(id) = mode {
            record.insert(ID_FIELD.to_string(), Value::from(id));
        }
        Ok(record)
    }
}

/// Every hosted table known to this crate
pub fn schemas() -> [&'static Schema; 5] {
    [Booking::SCHEMA, Room::SCHEMA, Task::SCHEMA, Profile::SCHEMA, Guest::SCHEMA]
}

/// Look up a schema by table name
pub fn schema_for(table: &str) -> Option<&'static Schema> {
    schemas().into_iter().find(|s| s.table == table)
}

/// Current time in the hosted API's timestamp format
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
        (None, None) => None,
    }
}
