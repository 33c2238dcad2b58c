use axum::{Json, extract::State};
use serde::Serialize;

use shopfront_auth_types::identity::Caller;

use crate::error::StoreServiceError;
use crate::state::AppState;
use crate::usecase::user::{GetUserUseCase, SyncUserInput, SyncUserUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── PUT /users/@me ───────────────────────────────────────────────────────────

pub async fn sync_me(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, StoreServiceError> {
    let identity = caller.identity().ok_or(StoreServiceError::Unauthenticated)?;
    let usecase = SyncUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(SyncUserInput {
            user_id: identity.user_id,
            email: identity.email.clone(),
            name: identity.name.clone(),
        })
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, StoreServiceError> {
    let user_id = caller.user_id().ok_or(StoreServiceError::Unauthenticated)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user.into()))
}
