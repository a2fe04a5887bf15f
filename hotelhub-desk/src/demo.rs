//! Demo data for the in-memory backend

use hotelhub_client::MemoryRecordStore;
use serde_json::{Map, Value, json};
use shared::Entity;
use shared::models::{Booking, Profile, Room, Task};

fn rows(value: Value) -> Vec<Map<String, Value>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Fill `store` with a small hotel
pub fn seed(store: &MemoryRecordStore) {
    store.seed(
        Room::SCHEMA.table,
        rows(json!([
            { "Name": "Room 101", "number_c": "101", "type_c": "Standard", "capacity_c": 2,
              "amenities_c": "WiFi, TV", "status_c": "Occupied", "price_per_night_c": 120 },
            { "Name": "Room 102", "number_c": "102", "type_c": "Standard", "capacity_c": 2,
              "amenities_c": "WiFi, TV", "status_c": "Available", "price_per_night_c": 120 },
            { "Name": "Room 201", "number_c": "201", "type_c": "Deluxe", "capacity_c": 3,
              "amenities_c": "WiFi, TV, Minibar", "status_c": "Occupied", "price_per_night_c": 180 },
            { "Name": "Room 301", "number_c": "301", "type_c": "Suite", "capacity_c": 4,
              "amenities_c": "WiFi, TV, Minibar, Jacuzzi", "status_c": "Maintenance", "price_per_night_c": 320 }
        ])),
    );

    store.seed(
        Booking::SCHEMA.table,
        rows(json!([
            { "Name": "John Smith", "guest_id_c": 1, "guest_name_c": "John Smith", "room_id_c": 1,
              "room_number_c": "101", "check_in_c": "2026-10-14", "check_out_c": "2026-10-18",
              "total_amount_c": 480, "status_c": "Checked In", "booking_source_c": "Direct",
              "CreatedOn": "2026-10-01T09:12:00.000Z" },
            { "Name": "Michael Davis", "guest_id_c": 3, "guest_name_c": "Michael Davis", "room_id_c": 3,
              "room_number_c": "201", "check_in_c": "2026-10-16", "check_out_c": "2026-10-19",
              "total_amount_c": 540, "status_c": "Confirmed", "booking_source_c": "Online",
              "CreatedOn": "2026-10-05T15:40:00.000Z" },
            { "Name": "Emily Wilson", "guest_id_c": 4, "guest_name_c": "Emily Wilson", "room_id_c": 2,
              "room_number_c": "102", "check_in_c": "2026-10-20", "check_out_c": "2026-10-22",
              "total_amount_c": 240, "status_c": "Cancelled", "booking_source_c": "Phone",
              "CreatedOn": "2026-10-07T11:05:00.000Z" }
        ])),
    );

    store.seed(
        Task::SCHEMA.table,
        rows(json!([
            { "Name": "Task for Room 301", "room_id_c": 4, "room_number_c": "301",
              "assigned_to_c": "Sam Porter", "type_c": "Maintenance", "priority_c": "High",
              "status_c": "In Progress", "description_c": "Jacuzzi pump replacement",
              "created_at_c": "2026-10-15T08:00:00.000Z" },
            { "Name": "Task for Room 102", "room_id_c": 2, "room_number_c": "102",
              "assigned_to_c": "Sam Porter", "type_c": "Cleaning", "priority_c": "Medium",
              "status_c": "Pending", "created_at_c": "2026-10-16T10:30:00.000Z" }
        ])),
    );

    store.seed(
        Profile::SCHEMA.table,
        rows(json!([
            { "Name": "Alice Moreno", "first_name_c": "Alice", "last_name_c": "Moreno",
              "email_c": "alice.moreno@hotelhubpro.com", "role_c": "MANAGER",
              "department_c": "Management", "join_date_c": "2021-03-01", "status_c": "Active" },
            { "Name": "Rita Okafor", "first_name_c": "Rita", "last_name_c": "Okafor",
              "email_c": "rita.okafor@hotelhubpro.com", "role_c": "RECEPTION",
              "department_c": "Front Desk", "join_date_c": "2023-06-12", "status_c": "Active" },
            { "Name": "Sam Porter", "first_name_c": "Sam", "last_name_c": "Porter",
              "email_c": "sam.porter@hotelhubpro.com", "role_c": "STAFF",
              "department_c": "Housekeeping", "join_date_c": "2024-09-30", "status_c": "Active" },
            { "Name": "John Smith", "first_name_c": "John", "last_name_c": "Smith",
              "email_c": "john.smith@email.com", "role_c": "GUEST",
              "join_date_c": "2025-01-04", "status_c": "Active" }
        ])),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fills_every_table() {
        let store = MemoryRecordStore::new();
        seed(&store);

        assert_eq!(store.len("room_c"), 4);
        assert_eq!(store.len("booking_c"), 3);
        assert_eq!(store.len("task_c"), 2);
        assert_eq!(store.len("profile_c"), 4);
    }
}
