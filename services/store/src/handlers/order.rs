use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_auth_types::identity::Caller;
use shopfront_domain::money::with_cents;
use shopfront_domain::order::OrderStatus;

use crate::changes::StoreChange;
use crate::domain::types::{Order, OrderWithOwner, ShippingAddress};
use crate::error::StoreServiceError;
use crate::handlers::{IdResponse, JsonBody, UserSummaryResponse, parse_id};
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, GetOrderUseCase, ListAllOrdersUseCase,
    ListOrdersUseCase, OrderLineInput, UpdateOrderStatusUseCase,
};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressBody {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        Self {
            full_name: body.full_name,
            address: body.address,
            city: body.city,
            state: body.state,
            zip_code: body.zip_code,
            phone: body.phone,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            full_name: address.full_name,
            address: address.address,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            phone: address.phone,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddressBody,
    pub payment_method: &'static str,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            items: order
                .items
                .into_iter()
                .map(|line| OrderItemResponse {
                    product_id: line.product_id.to_string(),
                    product_name: line.product_name,
                    price: with_cents(line.price),
                    quantity: line.quantity,
                })
                .collect(),
            total_amount: with_cents(order.total_amount),
            status: order.status,
            shipping_address: order.shipping.into(),
            payment_method: order.payment_method.as_str(),
            created_at: order.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub user: Option<UserSummaryResponse>,
}

impl From<OrderWithOwner> for AdminOrderResponse {
    fn from(entry: OrderWithOwner) -> Self {
        Self {
            order: entry.order.into(),
            user: entry.owner.map(UserSummaryResponse::from),
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total_amount: Decimal,
    pub shipping_address: ShippingAddressBody,
}

pub async fn create_order(
    caller: Caller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateOrderRequest>,
) -> Result<(StatusCode, Json<IdResponse>), StoreServiceError> {
    let usecase = CreateOrderUseCase {
        orders: state.order_repo(),
    };
    let input = CreateOrderInput {
        items: body
            .items
            .into_iter()
            .map(|item| OrderLineInput {
                product_id: item.product_id,
                product_name: item.product_name,
                price: item.price,
                quantity: item.quantity,
            })
            .collect(),
        total_amount: body.total_amount,
        shipping: body.shipping_address.into(),
    };
    let id = usecase.execute(caller.user_id(), input).await?;
    if let Some(user_id) = caller.user_id() {
        state.changes.publish(StoreChange::Orders { user_id });
        state.changes.publish(StoreChange::Cart { user_id });
    }
    Ok((StatusCode::CREATED, Json(id.into())))
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, StoreServiceError> {
    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(caller.user_id()).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = GetOrderUseCase {
        orders: state.order_repo(),
    };
    let order = usecase.execute(caller.user_id(), id).await?;
    Ok(Json(order.into()))
}

// ── GET /admin/orders ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListAllOrdersQuery {
    pub status: Option<String>,
}

pub async fn list_all_orders(
    caller: Caller,
    State(state): State<AppState>,
    Query(query): Query<ListAllOrdersQuery>,
) -> Result<Json<Vec<AdminOrderResponse>>, StoreServiceError> {
    let usecase = ListAllOrdersUseCase {
        access: state.access(),
        orders: state.order_repo(),
        users: state.user_repo(),
    };
    let orders = usecase
        .execute(caller.user_id(), query.status.as_deref())
        .await?;
    Ok(Json(orders.into_iter().map(AdminOrderResponse::from).collect()))
}

// ── PATCH /admin/orders/{id}/status ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_order_status(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateStatusRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateOrderStatusUseCase {
        access: state.access(),
        orders: state.order_repo(),
    };
    let order = usecase.execute(caller.user_id(), id, &body.status).await?;
    state.changes.publish(StoreChange::Orders {
        user_id: order.user_id,
    });
    Ok(StatusCode::NO_CONTENT)
}
