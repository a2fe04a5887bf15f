//! Housekeeping/maintenance Task Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;
use super::{Entity, EntityDraft, now_timestamp};
use crate::request::SortType;
use crate::schema::{FieldPair, Schema};

pub const TASK_PRIORITY_MEDIUM: &str = "Medium";
pub const TASK_STATUS_PENDING: &str = "Pending";

static TASK_FIELDS: &[FieldPair] = &[
    FieldPair::new("room_id_c", "roomId"),
    FieldPair::new("room_number_c", "roomNumber"),
    FieldPair::new("assigned_to_c", "assignedTo"),
    FieldPair::new("type_c", "type"),
    FieldPair::new("priority_c", "priority"),
    FieldPair::new("status_c", "status"),
    FieldPair::new("description_c", "description"),
    FieldPair::new("created_at_c", "createdAt"),
    FieldPair::new("completed_at_c", "completedAt"),
];

pub static TASK_SCHEMA: Schema = Schema {
    table: "task_c",
    title: "Task",
    label: "task",
    plural: "tasks",
    fields: TASK_FIELDS,
    order_by: Some(("created_at_c", SortType::Desc)),
};

/// Task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Id", with = "serde_helpers::record_id")]
    pub id: i64,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "room_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(rename = "room_number_c", default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(rename = "assigned_to_c", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(rename = "type_c", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(rename = "priority_c", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "description_c", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "created_at_c", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "completed_at_c", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Entity for Task {
    type Draft = TaskDraft;

    const SCHEMA: &'static Schema = &TASK_SCHEMA;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update task payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "room_id_c", default, with = "serde_helpers::lookup_id", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(rename = "room_number_c", default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(rename = "assigned_to_c", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(rename = "type_c", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(rename = "priority_c", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "description_c", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "created_at_c", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "completed_at_c", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl EntityDraft for TaskDraft {
    const SCHEMA: &'static Schema = &TASK_SCHEMA;

    fn apply_defaults(&mut self) {
        self.priority.get_or_insert_with(|| TASK_PRIORITY_MEDIUM.to_string());
        self.status.get_or_insert_with(|| TASK_STATUS_PENDING.to_string());
        self.created_at.get_or_insert_with(now_timestamp);
    }

    fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| {
            self.room_number
                .as_ref()
                .map(|n| format!("Task for Room {n}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WriteMode;
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let draft = TaskDraft::from_record(&json!({
            "roomNumber": "102",
            "type": "Cleaning"
        }))
        .unwrap();
        let record = draft.to_write_record(WriteMode::Create).unwrap();

        assert_eq!(record["Name"], json!("Task for Room 102"));
        assert_eq!(record["priority_c"], json!("Medium"));
        assert_eq!(record["status_c"], json!("Pending"));
        assert!(record["created_at_c"].as_str().is_some_and(|s| s.ends_with('Z')));
    }

    #[test]
    fn test_update_keeps_explicit_values() {
        let draft = TaskDraft {
            priority: Some("High".into()),
            completed_at: Some("2024-05-01T10:00:00.000Z".into()),
            ..Default::default()
        };
        let record = draft.to_write_record(WriteMode::Update(2)).unwrap();

        assert_eq!(record["priority_c"], json!("High"));
        assert!(!record.contains_key("status_c"));
        assert!(!record.contains_key("created_at_c"));
        assert!(!record.contains_key("Name"));
    }
}
