//! Role Model
//!
//! Roles are stored on profile records as upper-case strings. Any value the
//! hosted table holds that is not one of the known roles is kept verbatim in
//! [`Role::Other`] so it survives a read-modify-write.

use serde::{Deserialize, Serialize};

/// Profile role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Guest,
    Staff,
    Reception,
    Manager,
    Admin,
    Other(String),
}

impl Role {
    /// Roles that make a profile a staff member
    pub const STAFF_ROLES: [Role; 4] = [Role::Staff, Role::Reception, Role::Manager, Role::Admin];

    /// Lowest-privilege staff role
    pub const DEFAULT_STAFF: Role = Role::Staff;

    /// Known roles from least to most privileged
    pub fn hierarchy() -> [Role; 5] {
        [Role::Guest, Role::Staff, Role::Reception, Role::Manager, Role::Admin]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Guest => "GUEST",
            Role::Staff => "STAFF",
            Role::Reception => "RECEPTION",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_staff(&self) -> bool {
        Self::STAFF_ROLES.contains(self)
    }

    /// Permissions granted to this role
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::Admin => &[
                "manage_users",
                "manage_bookings",
                "manage_rooms",
                "view_reports",
                "manage_billing",
                "system_admin",
            ],
            Role::Manager => &["manage_bookings", "manage_rooms", "view_reports", "manage_staff"],
            Role::Reception => &["manage_bookings", "view_guests", "basic_reports"],
            Role::Staff => &["view_tasks", "update_room_status", "update_maintenance_status"],
            Role::Guest => &["view_bookings", "manage_profile"],
            Role::Other(_) => &[],
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions().contains(&permission)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "GUEST" => Role::Guest,
            "STAFF" => Role::Staff,
            "RECEPTION" => Role::Reception,
            "MANAGER" => Role::Manager,
            "ADMIN" => Role::Admin,
            _ => Role::Other(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::from(raw.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_staff_roles() {
        assert!(Role::Staff.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(!Role::Guest.is_staff());
        assert!(!Role::from("HOUSEKEEPING").is_staff());
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role: Role = serde_json::from_value(json!("HOUSEKEEPING")).unwrap();
        assert_eq!(role, Role::Other("HOUSEKEEPING".into()));
        assert_eq!(serde_json::to_value(&role).unwrap(), json!("HOUSEKEEPING"));
        assert_eq!(serde_json::to_value(Role::Manager).unwrap(), json!("MANAGER"));
    }

    #[test]
    fn test_permissions() {
        assert!(Role::Manager.has_permission("manage_staff"));
        assert!(!Role::Reception.has_permission("manage_staff"));
        assert!(Role::Other("X".into()).permissions().is_empty());
        assert_eq!(Role::hierarchy()[0], Role::Guest);
        assert_eq!(Role::hierarchy()[4], Role::Admin);
    }
}
