use chrono::Utc;
use uuid::Uuid;

use shopfront_domain::role::Role;

use crate::domain::repository::{ProductRepository, RoleResolver};
use crate::domain::types::{Product, ProductFields};
use crate::error::StoreServiceError;

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ListProductsUseCase<P> {
    /// Active products, or every product of `category` regardless of the
    /// active flag when a category is given.
    pub async fn execute(&self, category: Option<&str>) -> Result<Vec<Product>, StoreServiceError> {
        match category.filter(|c| !c.is_empty()) {
            Some(category) => self.products.list_by_category(category).await,
            None => self.products.list_active().await,
        }
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> GetProductUseCase<P> {
    pub async fn execute(&self, id: Uuid) -> Result<Option<Product>, StoreServiceError> {
        self.products.find_by_id(id).await
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ListCategoriesUseCase<P> {
    pub async fn execute(&self) -> Result<Vec<String>, StoreServiceError> {
        self.products.active_categories().await
    }
}

// ── ListAllProducts (admin) ──────────────────────────────────────────────────

pub struct ListAllProductsUseCase<G: RoleResolver, P: ProductRepository> {
    pub access: G,
    pub products: P,
}

impl<G: RoleResolver, P: ProductRepository> ListAllProductsUseCase<G, P> {
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<Vec<Product>, StoreServiceError> {
        self.access.require(caller, Role::Admin).await?;
        self.products.list_all().await
    }
}

// ── CreateProduct (admin) ────────────────────────────────────────────────────

pub struct CreateProductUseCase<G: RoleResolver, P: ProductRepository> {
    pub access: G,
    pub products: P,
}

impl<G: RoleResolver, P: ProductRepository> CreateProductUseCase<G, P> {
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        fields: ProductFields,
    ) -> Result<Uuid, StoreServiceError> {
        let admin_id = self.access.require(caller, Role::Admin).await?;
        fields.validate()?;
        let product = Product {
            id: Uuid::now_v7(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            image_url: fields.image_url,
            stock: fields.stock,
            is_active: true,
            created_at: Utc::now(),
        };
        self.products.create(&product).await?;
        tracing::info!(product_id = %product.id, %admin_id, "product created");
        Ok(product.id)
    }
}

// ── UpdateProduct (admin) ────────────────────────────────────────────────────

pub struct UpdateProductUseCase<G: RoleResolver, P: ProductRepository> {
    pub access: G,
    pub products: P,
}

impl<G: RoleResolver, P: ProductRepository> UpdateProductUseCase<G, P> {
    pub async fn execute(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        fields: ProductFields,
        is_active: bool,
    ) -> Result<(), StoreServiceError> {
        let admin_id = self.access.require(caller, Role::Admin).await?;
        fields.validate()?;
        let existing = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::ProductNotFound)?;
        let product = Product {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            image_url: fields.image_url,
            stock: fields.stock,
            is_active,
            created_at: existing.created_at,
        };
        if !self.products.update(&product).await? {
            return Err(StoreServiceError::ProductNotFound);
        }
        tracing::info!(product_id = %id, %admin_id, "product updated");
        Ok(())
    }
}

// ── RemoveProduct (admin) ────────────────────────────────────────────────────

pub struct RemoveProductUseCase<G: RoleResolver, P: ProductRepository> {
    pub access: G,
    pub products: P,
}

impl<G: RoleResolver, P: ProductRepository> RemoveProductUseCase<G, P> {
    /// Hard delete. Cart rows pointing at the product become orphans and
    /// orders keep their snapshots.
    pub async fn execute(&self, caller: Option<Uuid>, id: Uuid) -> Result<(), StoreServiceError> {
        let admin_id = self.access.require(caller, Role::Admin).await?;
        if !self.products.delete(id).await? {
            return Err(StoreServiceError::ProductNotFound);
        }
        tracing::info!(product_id = %id, %admin_id, "product removed");
        Ok(())
    }
}
