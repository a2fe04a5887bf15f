//! Guest Model
//!
//! Guests have no hosted table yet; they live in the in-process guest store.
//! The schema still describes both field shapes so guest input is normalized
//! like every other entity.

use serde::{Deserialize, Serialize};

use super::serde_helpers;
use super::{Entity, EntityDraft, join_name};
use crate::schema::{FieldPair, Schema};

static GUEST_FIELDS: &[FieldPair] = &[
    FieldPair::new("first_name_c", "firstName"),
    FieldPair::new("last_name_c", "lastName"),
    FieldPair::new("email_c", "email"),
    FieldPair::new("phone_c", "phone"),
    FieldPair::new("vip_status_c", "vipStatus"),
    FieldPair::new("preferences_c", "preferences"),
    FieldPair::new("stay_history_c", "stayHistory"),
];

pub static GUEST_SCHEMA: Schema = Schema {
    table: "guest_c",
    title: "Guest",
    label: "guest",
    plural: "guests",
    fields: GUEST_FIELDS,
    order_by: None,
};

/// Guest record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
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
    #[serde(rename = "vip_status_c", default)]
    pub vip_status: bool,
    #[serde(rename = "preferences_c", default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(rename = "stay_history_c", default, skip_serializing_if = "Option::is_none")]
    pub stay_history: Option<String>,
}

impl Guest {
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Guest-list search predicate
    ///
    /// Case-insensitive match on "first last" and email; phone numbers are
    /// matched as typed. An empty term matches everyone.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        let full_name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );

        full_name.to_lowercase().contains(&needle)
            || self
                .email
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
            || self.phone.as_deref().unwrap_or_default().contains(term)
    }

    /// Build a stored guest from a draft and an assigned id
    pub fn from_draft(id: i64, draft: GuestDraft) -> Self {
        Self {
            id,
            name: draft.display_name(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            vip_status: draft.vip_status.unwrap_or(false),
            preferences: draft.preferences,
            stay_history: draft.stay_history,
        }
    }

    /// Fixed sample guests the store starts with
    pub fn samples() -> Vec<Guest> {
        let sample = |id, first: &str, last: &str, vip, preferences: &str, history: &str| Guest {
            id,
            name: None,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: Some(format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase())),
            phone: Some(format!("+1-555-010{id}")),
            vip_status: vip,
            preferences: Some(preferences.to_string()),
            stay_history: Some(history.to_string()),
        };

        vec![
            sample(1, "John", "Smith", true, "Non-smoking room, late checkout", "3 previous stays"),
            sample(2, "Sarah", "Johnson", false, "Ground floor room, early checkin", "1 previous stay"),
            sample(3, "Michael", "Davis", true, "High floor, city view, spa services", "5 previous stays"),
            sample(4, "Emily", "Wilson", false, "Quiet room, away from elevators", "2 previous stays"),
            sample(5, "David", "Brown", false, "Business center access, early breakfast", "1 previous stay"),
        ]
    }
}

impl Entity for Guest {
    type Draft = GuestDraft;

    const SCHEMA: &'static Schema = &GUEST_SCHEMA;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create/update guest payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestDraft {
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
    #[serde(rename = "vip_status_c", default, skip_serializing_if = "Option::is_none")]
    pub vip_status: Option<bool>,
    #[serde(rename = "preferences_c", default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(rename = "stay_history_c", default, skip_serializing_if = "Option::is_none")]
    pub stay_history: Option<String>,
}

impl EntityDraft for GuestDraft {
    const SCHEMA: &'static Schema = &GUEST_SCHEMA;

    fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| join_name(self.first_name.as_deref(), self.last_name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_samples() {
        let samples = Guest::samples();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].email.as_deref(), Some("john.smith@email.com"));
        assert_eq!(samples[4].phone.as_deref(), Some("+1-555-0105"));
        assert!(samples[2].vip_status);
    }

    #[test]
    fn test_search_predicate() {
        let guest = &Guest::samples()[1];
        assert!(guest.matches(""));
        assert!(guest.matches("sarah j"));
        assert!(guest.matches("JOHNSON@"));
        assert!(guest.matches("555-0102"));
        assert!(!guest.matches("davis"));
    }

    #[test]
    fn test_draft_from_legacy_shape() {
        let draft = GuestDraft::from_record(&json!({
            "firstName": "Lena",
            "last_name_c": "Park",
            "vipStatus": true
        }))
        .unwrap();
        let guest = Guest::from_draft(9, draft);

        assert_eq!(guest.id, 9);
        assert_eq!(guest.name.as_deref(), Some("Lena Park"));
        assert!(guest.vip_status);
    }
}
