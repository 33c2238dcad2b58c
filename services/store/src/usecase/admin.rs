use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use shopfront_domain::role::{AdminRole, Role};

use crate::domain::repository::{AdminRepository, RoleResolver, UserRepository};
use crate::domain::types::{
    AdminStatus, AdminUser, AdminWithUser, RootIdentity, UserSummary, normalize_email,
};
use crate::error::StoreServiceError;

// ── CheckAdminStatus ─────────────────────────────────────────────────────────

pub struct CheckAdminStatusUseCase<G: RoleResolver> {
    pub access: G,
}

impl<G: RoleResolver> CheckAdminStatusUseCase<G> {
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<AdminStatus, StoreServiceError> {
        let role = self.access.classify(caller).await?;
        Ok(AdminStatus {
            is_admin: role.is_admin(),
            role: role.as_admin_role(),
        })
    }
}

// ── ListAdmins ───────────────────────────────────────────────────────────────

pub struct ListAdminsUseCase<G: RoleResolver, A: AdminRepository, U: UserRepository> {
    pub access: G,
    pub admins: A,
    pub users: U,
}

impl<G: RoleResolver, A: AdminRepository, U: UserRepository> ListAdminsUseCase<G, A, U> {
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
    ) -> Result<Vec<AdminWithUser>, StoreServiceError> {
        self.access.require(caller, Role::Admin).await?;
        let admins = self.admins.list().await?;
        let user_ids: Vec<Uuid> = admins.iter().map(|admin| admin.user_id).collect();
        let users: HashMap<Uuid, UserSummary> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect();
        Ok(admins
            .into_iter()
            .map(|admin| {
                let user = users.get(&admin.user_id).cloned();
                AdminWithUser { admin, user }
            })
            .collect())
    }
}

// ── AddAdmin ─────────────────────────────────────────────────────────────────

pub struct AddAdminUseCase<G: RoleResolver, U: UserRepository, A: AdminRepository> {
    pub access: G,
    pub users: U,
    pub admins: A,
}

impl<G: RoleResolver, U: UserRepository, A: AdminRepository> AddAdminUseCase<G, U, A> {
    /// Grant `role` to the user registered under `email`.
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        email: &str,
        role: &str,
    ) -> Result<AdminUser, StoreServiceError> {
        let granted_by = self.access.require(caller, Role::SuperAdmin).await?;
        let role: AdminRole = role
            .parse()
            .map_err(|_| StoreServiceError::InvalidAdminRole)?;
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        let admin = AdminUser {
            id: Uuid::now_v7(),
            user_id: user.id,
            email: user.email,
            role,
            added_by: Some(granted_by),
            created_at: Utc::now(),
        };
        if !self.admins.create_if_absent(&admin).await? {
            return Err(StoreServiceError::AdminAlreadyExists);
        }
        tracing::info!(admin_id = %admin.id, user_id = %admin.user_id, %role, %granted_by, "admin added");
        Ok(admin)
    }
}

// ── RemoveAdmin ──────────────────────────────────────────────────────────────

pub struct RemoveAdminUseCase<G: RoleResolver, A: AdminRepository> {
    pub access: G,
    pub admins: A,
    pub root: RootIdentity,
}

impl<G: RoleResolver, A: AdminRepository> RemoveAdminUseCase<G, A> {
    /// The root identity's row is never removable, whoever asks.
    pub async fn execute(&self, caller: Option<Uuid>, admin_id: Uuid) -> Result<(), StoreServiceError> {
        let removed_by = self.access.require(caller, Role::SuperAdmin).await?;
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(StoreServiceError::AdminNotFound)?;
        if self.root.matches(&admin.email) {
            tracing::warn!(%admin_id, %removed_by, "refused to remove root admin");
            return Err(StoreServiceError::RootAdminProtected);
        }
        if !self.admins.delete(admin_id).await? {
            return Err(StoreServiceError::AdminNotFound);
        }
        tracing::info!(%admin_id, user_id = %admin.user_id, %removed_by, "admin removed");
        Ok(())
    }
}

// ── BootstrapSuperAdmin ──────────────────────────────────────────────────────

pub struct BootstrapSuperAdminUseCase<U: UserRepository, A: AdminRepository> {
    pub users: U,
    pub admins: A,
    pub root: RootIdentity,
}

impl<U: UserRepository, A: AdminRepository> BootstrapSuperAdminUseCase<U, A> {
    /// Record the root identity in the registry. Does nothing for any other
    /// caller or when the row already exists. Returns `true` if a row was
    /// inserted.
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<bool, StoreServiceError> {
        let user_id = caller.ok_or(StoreServiceError::Unauthenticated)?;
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if !self.root.matches(&user.email) {
            return Ok(false);
        }
        let admin = AdminUser {
            id: Uuid::now_v7(),
            user_id,
            email: user.email,
            role: AdminRole::SuperAdmin,
            added_by: None,
            created_at: Utc::now(),
        };
        let inserted = self.admins.create_if_absent(&admin).await?;
        if inserted {
            tracing::info!(%user_id, "root admin bootstrapped");
        }
        Ok(inserted)
    }
}
