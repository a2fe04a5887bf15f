//! Staff directory
//!
//! Staff members are profiles whose role is in [`Role::STAFF_ROLES`]. The
//! directory stores nothing itself; every call goes through the profile
//! service and applies the role predicate on the way in or out.

use shared::models::{Profile, ProfileDraft, Role};

use super::EntityService;
use super::remote::ProfileService;
use crate::{ClientError, ClientResult};

/// Staff-role view over profiles
#[derive(Debug, Clone)]
pub struct StaffDirectory {
    profiles: ProfileService,
}

impl StaffDirectory {
    pub fn new(profiles: ProfileService) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    /// Staff members holding `role`
    ///
    /// Roles outside [`Role::STAFF_ROLES`] give an empty list without a
    /// query; everything this directory returns is a staff member. Use
    /// [`ProfileService::get_by_role`] for guest or other profiles.
    pub async fn get_by_role(&self, role: &Role) -> Vec<Profile> {
        if !role.is_staff() {
            return Vec::new();
        }
        self.profiles.get_by_role(role).await
    }
}

/// Force the draft's role into the staff set
///
/// `keep_missing` leaves an omitted role alone (partial update).
fn staff_draft(draft: &ProfileDraft, keep_missing: bool) -> ProfileDraft {
    let mut draft = draft.clone();
    let valid = match &draft.role {
        Some(role) => role.is_staff(),
        None => keep_missing,
    };
    if !valid {
        draft.role = Some(Role::DEFAULT_STAFF);
    }
    draft
}

impl EntityService for StaffDirectory {
    type Entity = Profile;
    type Draft = ProfileDraft;

    async fn get_all(&self) -> Vec<Profile> {
        self.profiles
            .get_all()
            .await
            .into_iter()
            .filter(Profile::is_staff)
            .collect()
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Profile> {
        let profile = self.profiles.get_by_id(id).await?;
        if !profile.is_staff() {
            tracing::warn!(profile_id = id, role = ?profile.role, "Profile is not a staff member");
            return Err(ClientError::NotStaff(id));
        }
        Ok(profile)
    }

    async fn create(&self, draft: &ProfileDraft) -> ClientResult<Profile> {
        self.profiles.create(&staff_draft(draft, false)).await
    }

    async fn update(&self, id: i64, draft: &ProfileDraft) -> ClientResult<Profile> {
        self.profiles.update(id, &staff_draft(draft, true)).await
    }

    async fn delete(&self, id: i64) -> bool {
        self.profiles.delete(id).await
    }
}
