use axum::extract::FromRequest;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreServiceError;

pub mod admin;
pub mod cart;
pub mod changes;
pub mod health;
pub mod order;
pub mod product;
pub mod user;

/// JSON request body whose rejections render as `INVALID_BODY`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(StoreServiceError))]
pub struct JsonBody<T>(pub T);

/// Body of `201 Created` responses.
#[derive(Serialize)]
pub struct IdResponse {
    pub id: String,
}

impl From<Uuid> for IdResponse {
    fn from(id: Uuid) -> Self {
        Self { id: id.to_string() }
    }
}

/// `{email, name}` of a referenced user.
#[derive(Serialize)]
pub struct UserSummaryResponse {
    pub email: String,
    pub name: Option<String>,
}

impl From<crate::domain::types::UserSummary> for UserSummaryResponse {
    fn from(summary: crate::domain::types::UserSummary) -> Self {
        Self {
            email: summary.email,
            name: summary.name,
        }
    }
}

/// Path ids are parsed here so malformed ones render as `INVALID_ID`.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, StoreServiceError> {
    raw.parse().map_err(|_| StoreServiceError::InvalidId)
}
