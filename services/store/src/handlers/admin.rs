use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_auth_types::identity::Caller;
use shopfront_domain::money::with_cents;
use shopfront_domain::role::AdminRole;

use crate::changes::StoreChange;
use crate::domain::types::{AdminWithUser, DashboardStats};
use crate::error::StoreServiceError;
use crate::handlers::{IdResponse, JsonBody, UserSummaryResponse, parse_id};
use crate::state::AppState;
use crate::usecase::admin::{
    AddAdminUseCase, BootstrapSuperAdminUseCase, CheckAdminStatusUseCase, ListAdminsUseCase,
    RemoveAdminUseCase,
};
use crate::usecase::dashboard::DashboardStatsUseCase;

// ── GET /admin/status ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    pub is_admin: bool,
    pub role: Option<AdminRole>,
}

pub async fn get_admin_status(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<AdminStatusResponse>, StoreServiceError> {
    let usecase = CheckAdminStatusUseCase {
        access: state.access(),
    };
    let status = usecase.execute(caller.user_id()).await?;
    Ok(Json(AdminStatusResponse {
        is_admin: status.is_admin,
        role: status.role,
    }))
}

// ── GET /admin/admins ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub role: AdminRole,
    pub added_by: Option<String>,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: Option<UserSummaryResponse>,
}

impl From<AdminWithUser> for AdminResponse {
    fn from(entry: AdminWithUser) -> Self {
        let admin = entry.admin;
        Self {
            id: admin.id.to_string(),
            user_id: admin.user_id.to_string(),
            email: admin.email,
            role: admin.role,
            added_by: admin.added_by.map(|id| id.to_string()),
            created_at: admin.created_at,
            user: entry.user.map(UserSummaryResponse::from),
        }
    }
}

pub async fn list_admins(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResponse>>, StoreServiceError> {
    let usecase = ListAdminsUseCase {
        access: state.access(),
        admins: state.admin_repo(),
        users: state.user_repo(),
    };
    let admins = usecase.execute(caller.user_id()).await?;
    Ok(Json(admins.into_iter().map(AdminResponse::from).collect()))
}

// ── POST /admin/admins ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddAdminRequest {
    pub email: String,
    pub role: String,
}

pub async fn add_admin(
    caller: Caller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AddAdminRequest>,
) -> Result<(StatusCode, Json<IdResponse>), StoreServiceError> {
    let usecase = AddAdminUseCase {
        access: state.access(),
        users: state.user_repo(),
        admins: state.admin_repo(),
    };
    let admin = usecase
        .execute(caller.user_id(), &body.email, &body.role)
        .await?;
    state.changes.publish(StoreChange::Admins);
    Ok((StatusCode::CREATED, Json(admin.id.into())))
}

// ── DELETE /admin/admins/{id} ────────────────────────────────────────────────

pub async fn remove_admin(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = RemoveAdminUseCase {
        access: state.access(),
        admins: state.admin_repo(),
        root: state.root.clone(),
    };
    usecase.execute(caller.user_id(), id).await?;
    state.changes.publish(StoreChange::Admins);
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/bootstrap ────────────────────────────────────────────────────

pub async fn bootstrap_super_admin(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = BootstrapSuperAdminUseCase {
        users: state.user_repo(),
        admins: state.admin_repo(),
        root: state.root.clone(),
    };
    if usecase.execute(caller.user_id()).await? {
        state.changes.publish(StoreChange::Admins);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/stats ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_products: u64,
    pub total_orders: u64,
    pub total_users: u64,
    pub total_admins: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: stats.total_products,
            total_orders: stats.total_orders,
            total_users: stats.total_users,
            total_admins: stats.total_admins,
            total_revenue: with_cents(stats.total_revenue),
            pending_orders: stats.pending_orders,
        }
    }
}

pub async fn get_dashboard_stats(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<DashboardStatsResponse>, StoreServiceError> {
    let usecase = DashboardStatsUseCase {
        access: state.access(),
        products: state.product_repo(),
        orders: state.order_repo(),
        users: state.user_repo(),
        admins: state.admin_repo(),
    };
    let stats = usecase.execute(caller.user_id()).await?;
    Ok(Json(stats.into()))
}
