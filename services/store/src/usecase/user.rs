use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, normalize_email};
use crate::error::StoreServiceError;

// ── SyncUser ─────────────────────────────────────────────────────────────────

/// Identity fields forwarded by the gateway.
pub struct SyncUserInput {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

pub struct SyncUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SyncUserUseCase<R> {
    pub async fn execute(&self, input: SyncUserInput) -> Result<User, StoreServiceError> {
        let email = input
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .ok_or(StoreServiceError::MissingData)?;
        let now = Utc::now();
        let user = User {
            id: input.user_id,
            email,
            name: input.name.filter(|name| !name.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        let stored = self.repo.upsert(&user).await?;
        tracing::info!(user_id = %stored.id, "user synced");
        Ok(stored)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, StoreServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)
    }
}
