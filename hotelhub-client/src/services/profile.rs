//! Profile queries beyond plain CRUD

use shared::models::{Profile, ROLE_FIELD, Role};
use shared::{Condition, Entity, FetchParams};

use super::EntityService;
use super::remote::ProfileService;

impl ProfileService {
    /// Profiles holding exactly `role`, in default profile order
    pub async fn get_by_role(&self, role: &Role) -> Vec<Profile> {
        let params = FetchParams::for_schema(Profile::SCHEMA)
            .filter(Condition::equal_to(ROLE_FIELD, role.as_str()));
        self.fetch(params).await
    }

    /// Profile of the signed-in user
    ///
    /// There is no session yet, so this is the first profile, or the
    /// built-in administrator when the directory is empty.
    pub async fn current_profile(&self) -> Profile {
        self.get_all()
            .await
            .into_iter()
            .next()
            .unwrap_or_else(Profile::default_admin)
    }
}
