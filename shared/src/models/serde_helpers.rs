//! Serde helpers for loosely typed hosted fields
//!
//! The hosted API and legacy callers disagree on value shapes:
//! - integers may arrive as numbers or numeric strings
//! - lookup fields may arrive as `{ "Id": 3, "Name": "..." }`
//! - multi-value fields travel as one `", "`-joined string

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

fn int_from_value(value: &Value, allow_lookup: bool) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) if allow_lookup => map.get("Id").and_then(|v| int_from_value(v, false)),
        _ => None,
    }
}

/// Record id: number or numeric string
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_i64(*id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        int_from_value(&value, false)
            .ok_or_else(|| de::Error::custom(format!("invalid record id: {value}")))
    }
}

/// Optional integer: number or numeric string
pub mod loose_int {
    use super::*;

    pub fn serialize<S>(value: &Option<i64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => int_from_value(&value, false)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid integer: {value}"))),
        }
    }
}

/// Optional lookup reference: number, numeric string or `{ "Id": n }`
pub mod lookup_id {
    use super::*;

    pub fn serialize<S>(value: &Option<i64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => int_from_value(&value, true)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid lookup id: {value}"))),
        }
    }
}

/// Optional string list, transmitted as `"a, b, c"`
pub mod comma_list {
    use super::*;

    pub const SEPARATOR: &str = ", ";

    /// Split a transmitted list, dropping blank entries
    pub fn split(joined: &str) -> Vec<String> {
        joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn serialize<S>(items: &Option<Vec<String>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match items {
            Some(items) => s.serialize_str(&items.join(SEPARATOR)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(joined)) => Ok(Some(split(&joined))),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    other => Err(de::Error::custom(format!("invalid list entry: {other}"))),
                })
                .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(de::Error::custom(format!("invalid list: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, with = "super::lookup_id", skip_serializing_if = "Option::is_none")]
        room: Option<i64>,
        #[serde(default, with = "super::loose_int", skip_serializing_if = "Option::is_none")]
        capacity: Option<i64>,
        #[serde(default, with = "super::comma_list", skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn test_lookup_id_shapes() {
        for raw in [json!(4), json!("4"), json!({ "Id": 4, "Name": "Room 4" })] {
            let probe: Probe = serde_json::from_value(json!({ "room": raw })).unwrap();
            assert_eq!(probe.room, Some(4));
        }
        let probe: Probe = serde_json::from_value(json!({ "room": null })).unwrap();
        assert_eq!(probe.room, None);
        assert!(serde_json::from_value::<Probe>(json!({ "room": "four" })).is_err());
    }

    #[test]
    fn test_loose_int_rejects_lookup_objects() {
        let probe: Probe = serde_json::from_value(json!({ "capacity": "2" })).unwrap();
        assert_eq!(probe.capacity, Some(2));
        assert!(serde_json::from_value::<Probe>(json!({ "capacity": { "Id": 2 } })).is_err());
    }

    #[test]
    fn test_comma_list_round_trip() {
        let probe: Probe = serde_json::from_value(json!({ "tags": ["WiFi", " TV ", ""] })).unwrap();
        assert_eq!(probe.tags, Some(vec!["WiFi".to_string(), "TV".to_string()]));

        let wire = serde_json::to_value(&probe).unwrap();
        assert_eq!(wire, json!({ "tags": "WiFi, TV" }));

        let back: Probe = serde_json::from_value(wire).unwrap();
        assert_eq!(back.tags, probe.tags);
    }
}
