use std::collections::HashMap;

use uuid::Uuid;

use shopfront_domain::money::line_subtotal;

use crate::domain::repository::{CartRepository, ProductRepository};
use crate::domain::types::{CartItem, CartLine, CartView};
use crate::error::StoreServiceError;

fn authenticated(caller: Option<Uuid>) -> Result<Uuid, StoreServiceError> {
    caller.ok_or(StoreServiceError::Unauthenticated)
}

/// Ownership check. Absent and foreign items are indistinguishable.
async fn owned_item<C: CartRepository>(
    carts: &C,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<CartItem, StoreServiceError> {
    carts
        .find_by_id(item_id)
        .await?
        .filter(|item| item.user_id == user_id)
        .ok_or(StoreServiceError::CartItemNotFound)
}

// ── ListCart ─────────────────────────────────────────────────────────────────

pub struct ListCartUseCase<C: CartRepository, P: ProductRepository> {
    pub carts: C,
    pub products: P,
}

impl<C: CartRepository, P: ProductRepository> ListCartUseCase<C, P> {
    /// The caller's cart joined with live products. Items whose product has
    /// been deleted are dropped. Empty for anonymous callers.
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<CartView, StoreServiceError> {
        let Some(user_id) = caller else {
            return Ok(CartView::default());
        };
        let items = self.carts.list_by_user(user_id).await?;
        if items.is_empty() {
            return Ok(CartView::default());
        }
        let product_ids: Vec<Uuid> = items.iter().map(|item| item.product_id).collect();
        let products: HashMap<Uuid, _> = self
            .products
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let lines: Vec<CartLine> = items
            .into_iter()
            .filter_map(|item| {
                let product = products.get(&item.product_id)?.clone();
                let subtotal = line_subtotal(product.price, item.quantity);
                Some(CartLine {
                    item,
                    product,
                    subtotal,
                })
            })
            .collect();
        let total = lines.iter().map(|line| line.subtotal).sum();
        Ok(CartView {
            items: lines,
            total,
        })
    }
}

// ── AddToCart ────────────────────────────────────────────────────────────────

pub struct AddToCartUseCase<C: CartRepository, P: ProductRepository> {
    pub carts: C,
    pub products: P,
}

impl<C: CartRepository, P: ProductRepository> AddToCartUseCase<C, P> {
    /// Merge into the existing (user, product) row or insert one. Stock is
    /// not checked.
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, StoreServiceError> {
        let user_id = authenticated(caller)?;
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(StoreServiceError::InvalidQuantity)?;
        self.products
            .find_by_id(product_id)
            .await?
            .filter(|product| product.is_active)
            .ok_or(StoreServiceError::ProductNotFound)?;
        let item = self
            .carts
            .add_quantity(user_id, product_id, quantity)
            .await?;
        tracing::info!(%user_id, %product_id, quantity = item.quantity, "cart item added");
        Ok(item)
    }
}

// ── UpdateCartItemQuantity ───────────────────────────────────────────────────

pub struct UpdateCartItemQuantityUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> UpdateCartItemQuantityUseCase<C> {
    /// Sets the quantity absolutely. Zero or less removes the item.
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<(), StoreServiceError> {
        let user_id = authenticated(caller)?;
        owned_item(&self.carts, user_id, item_id).await?;
        match u32::try_from(quantity).ok().filter(|q| *q >= 1) {
            Some(quantity) => {
                self.carts.set_quantity(item_id, quantity).await?;
                tracing::info!(%user_id, %item_id, quantity, "cart item quantity set");
            }
            None => {
                self.carts.delete(item_id).await?;
                tracing::info!(%user_id, %item_id, "cart item removed");
            }
        }
        Ok(())
    }
}

// ── RemoveCartItem ───────────────────────────────────────────────────────────

pub struct RemoveCartItemUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> RemoveCartItemUseCase<C> {
    pub async fn execute(&self, caller: Option<Uuid>, item_id: Uuid) -> Result<(), StoreServiceError> {
        let user_id = authenticated(caller)?;
        owned_item(&self.carts, user_id, item_id).await?;
        self.carts.delete(item_id).await?;
        tracing::info!(%user_id, %item_id, "cart item removed");
        Ok(())
    }
}

// ── ClearCart ────────────────────────────────────────────────────────────────

pub struct ClearCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> ClearCartUseCase<C> {
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<(), StoreServiceError> {
        let user_id = authenticated(caller)?;
        let removed = self.carts.clear(user_id).await?;
        tracing::info!(%user_id, removed, "cart cleared");
        Ok(())
    }
}
