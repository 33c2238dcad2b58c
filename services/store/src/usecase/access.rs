use uuid::Uuid;

use shopfront_domain::role::Role;

use crate::domain::repository::{AdminRepository, RoleResolver, UserRepository};
use crate::domain::types::RootIdentity;
use crate::error::StoreServiceError;

/// Classifies callers from the user directory, the admin registry and the
/// configured root identity.
pub struct AccessPolicy<U: UserRepository, A: AdminRepository> {
    pub users: U,
    pub admins: A,
    pub root: RootIdentity,
}

impl<U: UserRepository, A: AdminRepository> RoleResolver for AccessPolicy<U, A> {
    async fn classify(&self, caller: Option<Uuid>) -> Result<Role, StoreServiceError> {
        let Some(user_id) = caller else {
            return Ok(Role::None);
        };
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(Role::None);
        };
        if self.root.matches(&user.email) {
            return Ok(Role::SuperAdmin);
        }
        let role = self
            .admins
            .find_by_user(user_id)
            .await?
            .map_or(Role::None, |admin| admin.role.into());
        Ok(role)
    }
}
