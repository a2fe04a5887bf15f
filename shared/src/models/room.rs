//! Room Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers;
use super::{Entity, EntityDraft};
use crate::request::SortType;
use crate::schema::{FieldPair, Schema};

pub const ROOM_STATUS_AVAILABLE: &str = "Available";
pub const ROOM_STATUS_OCCUPIED: &str = "Occupied";
pub const ROOM_STATUS_MAINTENANCE: &str = "Maintenance";

static ROOM_FIELDS: &[FieldPair] = &[
    FieldPair::new("number_c", "number"),
    FieldPair::new("type_c", "type"),
    FieldPair::new("capacity_c", "capacity"),
    FieldPair::new("amenities_c", "amenities"),
    FieldPair::new("status_c", "status"),
    FieldPair::new("price_per_night_c", "pricePerNight"),
    FieldPair::new("photos_c", "photos"),
];

pub static ROOM_SCHEMA: Schema = Schema {
    table: "room_c",
    title: "Room",
    label: "room",
    plural: "rooms",
    fields: ROOM_FIELDS,
    order_by: Some(("number_c", SortType::Asc)),
};

/// Room record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "Id", with = "serde_helpers::record_id")]
    pub id: i64,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "number_c", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "type_c", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(rename = "capacity_c", default, with = "serde_helpers::loose_int", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    /// Travels as a `", "`-joined string
    #[serde(rename = "amenities_c", default, with = "serde_helpers::comma_list", skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "price_per_night_c", default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Decimal>,
    #[serde(rename = "photos_c", default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<String>,
}

impl Room {
    pub fn has_status(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

impl Entity for Room {
    type Draft = RoomDraft;

    const SCHEMA: &'static Schema = &ROOM_SCHEMA;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update room payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "number_c", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "type_c", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(rename = "capacity_c", default, with = "serde_helpers::loose_int", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(rename = "amenities_c", default, with = "serde_helpers::comma_list", skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "price_per_night_c", default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Decimal>,
    #[serde(rename = "photos_c", default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<String>,
}

impl EntityDraft for RoomDraft {
    const SCHEMA: &'static Schema = &ROOM_SCHEMA;

    fn apply_defaults(&mut self) {
        self.status.get_or_insert_with(|| ROOM_STATUS_AVAILABLE.to_string());
    }

    fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.number.as_ref().map(|n| format!("Room {n}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WriteMode;
    use serde_json::json;

    #[test]
    fn test_legacy_room_written_in_remote_shape() {
        let draft = RoomDraft::from_record(&json!({
            "number": "101",
            "type": "Standard",
            "pricePerNight": 120
        }))
        .unwrap();
        let record = draft.to_write_record(WriteMode::Create).unwrap();

        assert_eq!(record["Name"], json!("Room 101"));
        assert_eq!(record["number_c"], json!("101"));
        assert_eq!(record["type_c"], json!("Standard"));
        assert_eq!(record["status_c"], json!("Available"));
        assert_eq!(record["price_per_night_c"].as_f64(), Some(120.0));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_amenities_joined_on_write_split_on_read() {
        let draft = RoomDraft::from_record(&json!({
            "number_c": "204",
            "amenities": ["WiFi", "Mini Bar", "Sea View"]
        }))
        .unwrap();
        let record = draft.to_write_record(WriteMode::Update(3)).unwrap();
        assert_eq!(record["amenities_c"], json!("WiFi, Mini Bar, Sea View"));

        let room = Room::from_record(&serde_json::Value::Object(record)).unwrap();
        assert_eq!(
            room.amenities,
            Some(vec!["WiFi".to_string(), "Mini Bar".to_string(), "Sea View".to_string()])
        );
    }

    #[test]
    fn test_remote_value_wins_over_legacy() {
        let room = Room::from_record(&json!({
            "Id": "8",
            "number_c": "301",
            "number": "999",
            "status": "Occupied",
            "capacity_c": "3"
        }))
        .unwrap();

        assert_eq!(room.id, 8);
        assert_eq!(room.number.as_deref(), Some("301"));
        assert!(room.has_status(ROOM_STATUS_OCCUPIED));
        assert_eq!(room.capacity, Some(3));
    }
}
