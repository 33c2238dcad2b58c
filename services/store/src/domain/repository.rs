#![allow(async_fn_in_trait)]

use uuid::Uuid;

use shopfront_domain::order::OrderStatus;
use shopfront_domain::role::Role;

use crate::domain::types::{AdminUser, CartItem, Order, OrderStats, Product, User};
use crate::error::StoreServiceError;

/// Repository for the mirrored user directory.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreServiceError>;
    /// `email` is expected in normalized form.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreServiceError>;
    /// Insert or refresh email/name. `created_at` of an existing row is kept.
    async fn upsert(&self, user: &User) -> Result<User, StoreServiceError>;
    async fn count(&self) -> Result<u64, StoreServiceError>;
}

/// Repository for catalog products.
pub trait ProductRepository: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Product>, StoreServiceError>;
    /// Every product in `category`, active or not.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreServiceError>;
    async fn list_all(&self) -> Result<Vec<Product>, StoreServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreServiceError>;
    async fn create(&self, product: &Product) -> Result<(), StoreServiceError>;
    /// Replace every mutable field. Returns `false` if the product does not exist.
    async fn update(&self, product: &Product) -> Result<bool, StoreServiceError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError>;
    /// Distinct categories of active products, sorted.
    async fn active_categories(&self) -> Result<Vec<String>, StoreServiceError>;
    async fn count(&self) -> Result<u64, StoreServiceError>;
}

/// Repository for per-user cart items.
pub trait CartRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, StoreServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, StoreServiceError>;
    /// Increment the (user, product) row by `quantity`, inserting it when absent.
    /// Concurrent first adds merge into one row. Fails with `InvalidQuantity`
    /// when the merged quantity would not fit the column.
    async fn add_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<CartItem, StoreServiceError>;
    async fn set_quantity(&self, id: Uuid, quantity: u32) -> Result<(), StoreServiceError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError>;
    /// Returns the number of rows deleted.
    async fn clear(&self, user_id: Uuid) -> Result<u64, StoreServiceError>;
}

/// Repository for placed orders.
pub trait OrderRepository: Send + Sync {
    /// Insert the order with its items and delete the owner's cart, atomically.
    async fn create_and_clear_cart(&self, order: &Order) -> Result<(), StoreServiceError>;
    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreServiceError>;
    /// Newest first, optionally restricted to one status.
    async fn list_all(&self, status: Option<OrderStatus>)
    -> Result<Vec<Order>, StoreServiceError>;
    /// Move the order to `next` only if its stored status is one of
    /// `next.predecessors()`. Returns `false` when no row matched.
    async fn transition_status(&self, id: Uuid, next: OrderStatus)
    -> Result<bool, StoreServiceError>;
    async fn stats(&self) -> Result<OrderStats, StoreServiceError>;
}

/// Repository for the admin registry.
pub trait AdminRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<AdminUser>, StoreServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreServiceError>;
    /// Oldest first.
    async fn list(&self) -> Result<Vec<AdminUser>, StoreServiceError>;
    /// Insert `admin` unless its user already has a row. Returns `true` if inserted.
    async fn create_if_absent(&self, admin: &AdminUser) -> Result<bool, StoreServiceError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError>;
    async fn count(&self) -> Result<u64, StoreServiceError>;
}

/// Port classifying callers by privilege.
pub trait RoleResolver: Send + Sync {
    /// `Role::None` for anonymous callers and for identities without a user record.
    async fn classify(&self, caller: Option<Uuid>) -> Result<Role, StoreServiceError>;

    /// The single authorization check. Returns the caller's id.
    ///
    /// Anonymous callers get `Unauthenticated`; callers classified below
    /// `min_role` get `Forbidden`. `Role::None` only requires an identity.
    async fn require(
        &self,
        caller: Option<Uuid>,
        min_role: Role,
    ) -> Result<Uuid, StoreServiceError> {
        let user_id = caller.ok_or(StoreServiceError::Unauthenticated)?;
        if min_role == Role::None {
            return Ok(user_id);
        }
        if self.classify(Some(user_id)).await? < min_role {
            return Err(StoreServiceError::Forbidden);
        }
        Ok(user_id)
    }
}
