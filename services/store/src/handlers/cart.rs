use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_auth_types::identity::Caller;
use shopfront_domain::money::with_cents;

use crate::changes::StoreChange;
use crate::domain::types::{CartLine, CartView};
use crate::error::StoreServiceError;
use crate::handlers::{JsonBody, parse_id};
use crate::handlers::product::ProductResponse;
use crate::state::AppState;
use crate::usecase::cart::{
    AddToCartUseCase, ClearCartUseCase, ListCartUseCase, RemoveCartItemUseCase,
    UpdateCartItemQuantityUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub subtotal: Decimal,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub product: ProductResponse,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item.id.to_string(),
            product_id: line.item.product_id.to_string(),
            quantity: line.item.quantity,
            subtotal: with_cents(line.subtotal),
            created_at: line.item.created_at,
            product: line.product.into(),
        }
    }
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: Decimal,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            items: view.items.into_iter().map(CartLineResponse::from).collect(),
            total: with_cents(view.total),
        }
    }
}

fn cart_changed(state: &AppState, user_id: Option<Uuid>) {
    if let Some(user_id) = user_id {
        state.changes.publish(StoreChange::Cart { user_id });
    }
}

// ── GET /cart ────────────────────────────────────────────────────────────────

pub async fn get_cart(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, StoreServiceError> {
    let usecase = ListCartUseCase {
        carts: state.cart_repo(),
        products: state.product_repo(),
    };
    let view = usecase.execute(caller.user_id()).await?;
    Ok(Json(view.into()))
}

// ── POST /cart/items ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

pub async fn add_cart_item(
    caller: Caller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AddToCartRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = AddToCartUseCase {
        carts: state.cart_repo(),
        products: state.product_repo(),
    };
    usecase
        .execute(caller.user_id(), body.product_id, body.quantity)
        .await?;
    cart_changed(&state, caller.user_id());
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /cart/items/{id} ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

pub async fn update_cart_item(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateQuantityRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateCartItemQuantityUseCase {
        carts: state.cart_repo(),
    };
    usecase.execute(caller.user_id(), id, body.quantity).await?;
    cart_changed(&state, caller.user_id());
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /cart/items/{id} ──────────────────────────────────────────────────

pub async fn remove_cart_item(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = RemoveCartItemUseCase {
        carts: state.cart_repo(),
    };
    usecase.execute(caller.user_id(), id).await?;
    cart_changed(&state, caller.user_id());
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /cart ─────────────────────────────────────────────────────────────

pub async fn clear_cart(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ClearCartUseCase {
        carts: state.cart_repo(),
    };
    usecase.execute(caller.user_id()).await?;
    cart_changed(&state, caller.user_id());
    Ok(StatusCode::NO_CONTENT)
}
