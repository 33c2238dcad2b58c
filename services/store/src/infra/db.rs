use anyhow::Context as _;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use shopfront_domain::order::{OrderStatus, PaymentMethod};
use shopfront_domain::role::AdminRole;
use shopfront_store_schema::{admin_users, cart_items, order_items, orders, products, users};

use crate::domain::repository::{
    AdminRepository, CartRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::domain::types::{
    AdminUser, CartItem, Order, OrderLine, OrderStats, Product, ShippingAddress, User,
};
use crate::error::StoreServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn upsert(&self, user: &User) -> Result<User, StoreServiceError> {
        let model = users::Entity::insert(users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        })
        .on_conflict(
            OnConflict::column(users::Column::Id)
                .update_columns([
                    users::Column::Email,
                    users::Column::Name,
                    users::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .context("upsert user")?;
        Ok(user_from_model(model))
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn list_active(&self) -> Result<Vec<Product>, StoreServiceError> {
        let models = products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by_asc(products::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list active products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreServiceError> {
        let models = products::Entity::find()
            .filter(products::Column::Category.eq(category))
            .order_by_asc(products::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list products by category")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreServiceError> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list all products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find products by ids")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn create(&self, product: &Product) -> Result<(), StoreServiceError> {
        products::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            category: Set(product.category.clone()),
            image_url: Set(product.image_url.clone()),
            stock: Set(product.stock),
            is_active: Set(product.is_active),
            created_at: Set(product.created_at),
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreServiceError> {
        let result = products::Entity::update_many()
            .set(products::ActiveModel {
                name: Set(product.name.clone()),
                description: Set(product.description.clone()),
                price: Set(product.price),
                category: Set(product.category.clone()),
                image_url: Set(product.image_url.clone()),
                stock: Set(product.stock),
                is_active: Set(product.is_active),
                ..Default::default()
            })
            .filter(products::Column::Id.eq(product.id))
            .exec(&self.db)
            .await
            .context("update product")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected > 0)
    }

    async fn active_categories(&self) -> Result<Vec<String>, StoreServiceError> {
        let categories: Vec<String> = products::Entity::find()
            .select_only()
            .column(products::Column::Category)
            .distinct()
            .filter(products::Column::IsActive.eq(true))
            .order_by_asc(products::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list active categories")?;
        Ok(categories)
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        let count = products::Entity::find()
            .count(&self.db)
            .await
            .context("count products")?;
        Ok(count)
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category: model.category,
        image_url: model.image_url,
        stock: model.stock,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, StoreServiceError> {
        let models = cart_items::Entity::find()
            .filter(cart_items::Column::UserId.eq(user_id))
            .order_by_asc(cart_items::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list cart items")?;
        Ok(models.into_iter().map(cart_item_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, StoreServiceError> {
        let model = cart_items::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find cart item by id")?;
        Ok(model.map(cart_item_from_model))
    }

    async fn add_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<CartItem, StoreServiceError> {
        let quantity = i32::try_from(quantity).map_err(|_| StoreServiceError::InvalidQuantity)?;
        let stored = Expr::col((cart_items::Entity, cart_items::Column::Quantity));
        let model = cart_items::Entity::insert(cart_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([cart_items::Column::UserId, cart_items::Column::ProductId])
                .value(
                    cart_items::Column::Quantity,
                    stored.clone().add(Expr::cust("EXCLUDED.quantity")),
                )
                // A merge that would overflow the column leaves the row as it is.
                .action_and_where(stored.lte(i32::MAX - quantity))
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| match e {
            // The guard rejected the merge, so nothing was returned.
            DbErr::RecordNotFound(_) => StoreServiceError::InvalidQuantity,
            e => anyhow::Error::new(e).context("add cart item quantity").into(),
        })?;
        Ok(cart_item_from_model(model))
    }

    async fn set_quantity(&self, id: Uuid, quantity: u32) -> Result<(), StoreServiceError> {
        let quantity = i32::try_from(quantity).context("cart quantity out of range")?;
        cart_items::Entity::update_many()
            .set(cart_items::ActiveModel {
                quantity: Set(quantity),
                ..Default::default()
            })
            .filter(cart_items::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set cart item quantity")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let result = cart_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete cart item")?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self, user_id: Uuid) -> Result<u64, StoreServiceError> {
        let result = cart_items::Entity::delete_many()
            .filter(cart_items::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("clear cart")?;
        Ok(result.rows_affected)
    }
}

fn cart_item_from_model(model: cart_items::Model) -> CartItem {
    CartItem {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        // quantity > 0 is a table check constraint
        quantity: model.quantity.unsigned_abs(),
        created_at: model.created_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl DbOrderRepository {
    async fn with_items(
        &self,
        models: Vec<orders::Model>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        let items = models
            .load_many(order_items::Entity, &self.db)
            .await
            .context("load order items")?;
        models
            .into_iter()
            .zip(items)
            .map(|(model, items)| order_from_model(model, items))
            .collect()
    }
}

impl OrderRepository for DbOrderRepository {
    async fn create_and_clear_cart(&self, order: &Order) -> Result<(), StoreServiceError> {
        let order = order.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    orders::ActiveModel {
                        id: Set(order.id),
                        user_id: Set(order.user_id),
                        total_amount: Set(order.total_amount),
                        status: Set(order.status.as_str().to_owned()),
                        ship_full_name: Set(order.shipping.full_name.clone()),
                        ship_address: Set(order.shipping.address.clone()),
                        ship_city: Set(order.shipping.city.clone()),
                        ship_state: Set(order.shipping.state.clone()),
                        ship_zip_code: Set(order.shipping.zip_code.clone()),
                        ship_phone: Set(order.shipping.phone.clone()),
                        payment_method: Set(order.payment_method.as_str().to_owned()),
                        created_at: Set(order.created_at),
                    }
                    .insert(txn)
                    .await?;

                    let lines = order.items.iter().enumerate().map(|(position, line)| {
                        order_items::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            order_id: Set(order.id),
                            position: Set(position as i32),
                            product_id: Set(line.product_id),
                            product_name: Set(line.product_name.clone()),
                            price: Set(line.price),
                            quantity: Set(line.quantity as i32),
                        }
                    });
                    order_items::Entity::insert_many(lines).exec(txn).await?;

                    cart_items::Entity::delete_many()
                        .filter(cart_items::Column::UserId.eq(order.user_id))
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .context("create order and clear cart")?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list orders by user")?;
        self.with_items(models).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreServiceError> {
        let Some(model) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?
        else {
            return Ok(None);
        };
        let items = model
            .find_related(order_items::Entity)
            .all(&self.db)
            .await
            .context("find order items")?;
        order_from_model(model, items).map(Some)
    }

    async fn list_all(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        let mut query = orders::Entity::find();
        if let Some(status) = status {
            query = query.filter(orders::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list all orders")?;
        self.with_items(models).await
    }

    async fn transition_status(
        &self,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<bool, StoreServiceError> {
        let result = orders::Entity::update_many()
            .set(orders::ActiveModel {
                status: Set(next.as_str().to_owned()),
                ..Default::default()
            })
            .filter(orders::Column::Id.eq(id))
            .filter(orders::Column::Status.is_in(next.predecessors().map(OrderStatus::as_str)))
            .exec(&self.db)
            .await
            .context("update order status")?;
        Ok(result.rows_affected > 0)
    }

    async fn stats(&self) -> Result<OrderStats, StoreServiceError> {
        let total_orders = orders::Entity::find()
            .count(&self.db)
            .await
            .context("count orders")?;
        let pending_orders = orders::Entity::find()
            .filter(orders::Column::Status.eq(OrderStatus::Pending.as_str()))
            .count(&self.db)
            .await
            .context("count pending orders")?;
        let revenue: Option<Option<Decimal>> = orders::Entity::find()
            .select_only()
            .column_as(orders::Column::TotalAmount.sum(), "revenue")
            .into_tuple()
            .one(&self.db)
            .await
            .context("sum order totals")?;
        Ok(OrderStats {
            total_orders,
            total_revenue: revenue.flatten().unwrap_or(Decimal::ZERO),
            pending_orders,
        })
    }
}

fn order_from_model(
    model: orders::Model,
    mut items: Vec<order_items::Model>,
) -> Result<Order, StoreServiceError> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .context("decode order status")?;
    items.sort_by_key(|item| item.position);
    Ok(Order {
        id: model.id,
        user_id: model.user_id,
        items: items
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                product_name: item.product_name,
                price: item.price,
                quantity: item.quantity.unsigned_abs(),
            })
            .collect(),
        total_amount: model.total_amount,
        status,
        shipping: ShippingAddress {
            full_name: model.ship_full_name,
            address: model.ship_address,
            city: model.ship_city,
            state: model.ship_state,
            zip_code: model.ship_zip_code,
            phone: model.ship_phone,
        },
        payment_method: PaymentMethod::CashOnDelivery,
        created_at: model.created_at,
    })
}

// ── Admin repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: DatabaseConnection,
}

impl AdminRepository for DbAdminRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<AdminUser>, StoreServiceError> {
        let model = admin_users::Entity::find()
            .filter(admin_users::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find admin by user")?;
        model.map(admin_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreServiceError> {
        let model = admin_users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        model.map(admin_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<AdminUser>, StoreServiceError> {
        let models = admin_users::Entity::find()
            .order_by_asc(admin_users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list admins")?;
        models.into_iter().map(admin_from_model).collect()
    }

    async fn create_if_absent(&self, admin: &AdminUser) -> Result<bool, StoreServiceError> {
        let inserted = admin_users::Entity::insert(admin_to_active_model(admin))
            .on_conflict(
                OnConflict::column(admin_users::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("create admin if absent")?;
        Ok(inserted > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let result = admin_users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete admin")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        let count = admin_users::Entity::find()
            .count(&self.db)
            .await
            .context("count admins")?;
        Ok(count)
    }
}

fn admin_to_active_model(admin: &AdminUser) -> admin_users::ActiveModel {
    admin_users::ActiveModel {
        id: Set(admin.id),
        user_id: Set(admin.user_id),
        email: Set(admin.email.clone()),
        role: Set(admin.role.as_str().to_owned()),
        added_by: Set(admin.added_by),
        created_at: Set(admin.created_at),
    }
}

fn admin_from_model(model: admin_users::Model) -> Result<AdminUser, StoreServiceError> {
    let role = model
        .role
        .parse::<AdminRole>()
        .context("decode admin role")?;
    Ok(AdminUser {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        role,
        added_by: model.added_by,
        created_at: model.created_at,
    })
}
