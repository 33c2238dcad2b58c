use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use shopfront_domain::money::lines_total;
use shopfront_domain::order::{OrderStatus, PaymentMethod};
use shopfront_domain::role::Role;

use crate::domain::repository::{OrderRepository, RoleResolver, UserRepository};
use crate::domain::types::{Order, OrderLine, OrderWithOwner, ShippingAddress, UserSummary};
use crate::error::StoreServiceError;

fn parse_status(status: &str) -> Result<OrderStatus, StoreServiceError> {
    status
        .parse::<OrderStatus>()
        .map_err(|_| StoreServiceError::InvalidOrderStatus)
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

/// A line as submitted by the client at checkout.
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
}

pub struct CreateOrderInput {
    pub items: Vec<OrderLineInput>,
    pub total_amount: Decimal,
    pub shipping: ShippingAddress,
}

pub struct CreateOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> CreateOrderUseCase<O> {
    /// Places a `pending` order and empties the caller's cart in the same
    /// transaction. The cart is cleared whatever the submitted items were.
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        input: CreateOrderInput,
    ) -> Result<Uuid, StoreServiceError> {
        let user_id = caller.ok_or(StoreServiceError::Unauthenticated)?;
        if input.items.is_empty() {
            return Err(StoreServiceError::EmptyOrder);
        }
        let items = input
            .items
            .into_iter()
            .map(|line| {
                let quantity = u32::try_from(line.quantity)
                    .ok()
                    .filter(|q| *q >= 1)
                    .ok_or(StoreServiceError::InvalidQuantity)?;
                if line.price < Decimal::ZERO {
                    return Err(StoreServiceError::InvalidPrice);
                }
                Ok(OrderLine {
                    product_id: line.product_id,
                    product_name: line.product_name,
                    price: line.price,
                    quantity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        input.shipping.validate()?;
        let expected = lines_total(items.iter().map(|line| (line.price, line.quantity)));
        if expected != input.total_amount {
            tracing::debug!(%expected, submitted = %input.total_amount, "order total mismatch");
            return Err(StoreServiceError::TotalMismatch);
        }

        let order = Order {
            id: Uuid::now_v7(),
            user_id,
            items,
            total_amount: expected,
            status: OrderStatus::Pending,
            shipping: input.shipping,
            payment_method: PaymentMethod::CashOnDelivery,
            created_at: Utc::now(),
        };
        self.orders.create_and_clear_cart(&order).await?;
        tracing::info!(order_id = %order.id, %user_id, total = %order.total_amount, "order placed");
        Ok(order.id)
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    /// The caller's orders, newest first. Empty for anonymous callers.
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<Vec<Order>, StoreServiceError> {
        match caller {
            Some(user_id) => self.orders.list_by_user(user_id).await,
            None => Ok(Vec::new()),
        }
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderUseCase<O> {
    pub async fn execute(&self, caller: Option<Uuid>, id: Uuid) -> Result<Order, StoreServiceError> {
        let user_id = caller.ok_or(StoreServiceError::Unauthenticated)?;
        self.orders
            .find_by_id(id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(StoreServiceError::OrderNotFound)
    }
}

// ── ListAllOrders (admin) ────────────────────────────────────────────────────

pub struct ListAllOrdersUseCase<G: RoleResolver, O: OrderRepository, U: UserRepository> {
    pub access: G,
    pub orders: O,
    pub users: U,
}

impl<G: RoleResolver, O: OrderRepository, U: UserRepository> ListAllOrdersUseCase<G, O, U> {
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        status: Option<&str>,
    ) -> Result<Vec<OrderWithOwner>, StoreServiceError> {
        self.access.require(caller, Role::Admin).await?;
        let status = status
            .filter(|s| !s.is_empty())
            .map(parse_status)
            .transpose()?;
        let orders = self.orders.list_all(status).await?;

        let mut owner_ids: Vec<Uuid> = orders.iter().map(|order| order.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners: HashMap<Uuid, UserSummary> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .iter()
            .map(|user| (user.id, UserSummary::from(user)))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let owner = owners.get(&order.user_id).cloned();
                OrderWithOwner { order, owner }
            })
            .collect())
    }
}

// ── UpdateOrderStatus (admin) ────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<G: RoleResolver, O: OrderRepository> {
    pub access: G,
    pub orders: O,
}

impl<G: RoleResolver, O: OrderRepository> UpdateOrderStatusUseCase<G, O> {
    /// Returns the order as stored after the update.
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        status: &str,
    ) -> Result<Order, StoreServiceError> {
        let admin_id = self.access.require(caller, Role::Admin).await?;
        let next = parse_status(status)?;
        let mut order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)?;
        if !order.status.can_transition_to(next) {
            return Err(StoreServiceError::InvalidStatusTransition {
                from: order.status.to_string(),
                to: next.to_string(),
            });
        }
        if order.status == next {
            return Ok(order);
        }
        if !self.orders.transition_status(id, next).await? {
            // The stored status changed after the read above; judge against it.
            let current = self
                .orders
                .find_by_id(id)
                .await?
                .ok_or(StoreServiceError::OrderNotFound)?;
            if current.status == next {
                return Ok(current);
            }
            return Err(StoreServiceError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: next.to_string(),
            });
        }
        tracing::info!(order_id = %id, %admin_id, from = %order.status, to = %next, "order status changed");
        order.status = next;
        Ok(order)
    }
}
