//! Profile Model
//!
//! Profiles back both the user directory and the staff view; a staff member
//! is a profile whose role is one of [`Role::STAFF_ROLES`].

use serde::{Deserialize, Serialize};

use super::serde_helpers;
use super::{Entity, EntityDraft, Role, join_name, now_timestamp};
use crate::request::SortType;
use crate::schema::{FieldPair, Schema};

pub const PROFILE_STATUS_ACTIVE: &str = "Active";

/// Remote key of the role attribute
pub const ROLE_FIELD: &str = "role_c";

static PROFILE_FIELDS: &[FieldPair] = &[
    FieldPair::new("first_name_c", "firstName"),
    FieldPair::new("last_name_c", "lastName"),
    FieldPair::new("email_c", "email"),
    FieldPair::new("phone_c", "phone"),
    FieldPair::new(ROLE_FIELD, "role"),
    FieldPair::new("department_c", "department"),
    FieldPair::new("join_date_c", "joinDate"),
    FieldPair::new("avatar_c", "avatar"),
    FieldPair::new("address_c", "address"),
    FieldPair::new("emergency_contact_c", "emergencyContact"),
    FieldPair::new("status_c", "status"),
];

pub static PROFILE_SCHEMA: Schema = Schema {
    table: "profile_c",
    title: "Profile",
    label: "profile",
    plural: "profiles",
    fields: PROFILE_FIELDS,
    order_by: Some(("join_date_c", SortType::Desc)),
};

/// Profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "Id", with = "serde_helpers::record_id")]
    pub id: i64,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "first_name_c", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "last_name_c", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "email_c", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "phone_c", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "role_c", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "department_c", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "join_date_c", default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(rename = "avatar_c", default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "address_c", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "emergency_contact_c", default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Profile {
    pub fn is_staff(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_staff)
    }

    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Stand-in profile used when the directory is empty
    pub fn default_admin() -> Self {
        Self {
            id: 1,
            name: Some("Admin User".into()),
            first_name: Some("Admin".into()),
            last_name: Some("User".into()),
            email: Some("admin@hotelhubpro.com".into()),
            phone: Some("+1-555-0100".into()),
            role: Some(Role::Admin),
            department: Some("Management".into()),
            join_date: Some(now_timestamp()),
            avatar: Some(String::new()),
            address: Some("123 Hotel Street, City, State".into()),
            emergency_contact: Some("+1-555-0199".into()),
            status: Some(PROFILE_STATUS_ACTIVE.into()),
        }
    }
}

impl Entity for Profile {
    type Draft = ProfileDraft;

    const SCHEMA: &'static Schema = &PROFILE_SCHEMA;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update profile payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "first_name_c", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "last_name_c", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "email_c", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "phone_c", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "role_c", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "department_c", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "join_date_c", default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(rename = "avatar_c", default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "address_c", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "emergency_contact_c", default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(rename = "status_c", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EntityDraft for ProfileDraft {
    const SCHEMA: &'static Schema = &PROFILE_SCHEMA;

    fn apply_defaults(&mut self) {
        self.role.get_or_insert(Role::DEFAULT_STAFF);
        self.join_date.get_or_insert_with(now_timestamp);
        self.status.get_or_insert_with(|| PROFILE_STATUS_ACTIVE.to_string());
    }

    fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| join_name(self.first_name.as_deref(), self.last_name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WriteMode;
    use serde_json::json;

    #[test]
    fn test_profile_defaults_to_staff() {
        let draft = ProfileDraft::from_record(&json!({
            "firstName": "Maria",
            "lastName": "Lopez",
            "email": "maria@hotel.test"
        }))
        .unwrap();
        let record = draft.to_write_record(WriteMode::Create).unwrap();

        assert_eq!(record["Name"], json!("Maria Lopez"));
        assert_eq!(record["role_c"], json!("STAFF"));
        assert_eq!(record["status_c"], json!("Active"));
        assert!(record.contains_key("join_date_c"));
    }

    #[test]
    fn test_role_from_legacy_key() {
        let profile = Profile::from_record(&json!({ "Id": 4, "role": "MANAGER" })).unwrap();
        assert_eq!(profile.role, Some(Role::Manager));
        assert!(profile.is_staff());

        let guest = Profile::from_record(&json!({ "Id": 5, "role_c": "GUEST" })).unwrap();
        assert!(!guest.is_staff());
    }

    #[test]
    fn test_default_admin() {
        let admin = Profile::default_admin();
        assert_eq!(admin.role, Some(Role::Admin));
        assert_eq!(admin.full_name().as_deref(), Some("Admin User"));
    }
}
