use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_auth_types::identity::Caller;
use shopfront_domain::money::with_cents;

use crate::changes::StoreChange;
use crate::domain::types::{Product, ProductFields};
use crate::error::StoreServiceError;
use crate::handlers::{IdResponse, JsonBody, parse_id};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateProductUseCase, GetProductUseCase, ListAllProductsUseCase, ListCategoriesUseCase,
    ListProductsUseCase, RemoveProductUseCase, UpdateProductUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub stock: i32,
    pub is_active: bool,
    #[serde(serialize_with = "shopfront_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: with_cents(product.price),
            category: product.category,
            image_url: product.image_url,
            stock: product.stock,
            is_active: product.is_active,
            created_at: product.created_at,
        }
    }
}

fn into_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

// ── GET /products ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, StoreServiceError> {
    let usecase = ListProductsUseCase {
        products: state.product_repo(),
    };
    let products = usecase.execute(query.category.as_deref()).await?;
    Ok(Json(into_responses(products)))
}

// ── GET /products/categories ─────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, StoreServiceError> {
    let usecase = ListCategoriesUseCase {
        products: state.product_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ProductResponse>>, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = GetProductUseCase {
        products: state.product_repo(),
    };
    let product = usecase.execute(id).await?;
    Ok(Json(product.map(ProductResponse::from)))
}

// ── GET /admin/products ──────────────────────────────────────────────────────

pub async fn list_all_products(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, StoreServiceError> {
    let usecase = ListAllProductsUseCase {
        access: state.access(),
        products: state.product_repo(),
    };
    let products = usecase.execute(caller.user_id()).await?;
    Ok(Json(into_responses(products)))
}

// ── POST /admin/products ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub stock: i32,
}

impl From<ProductRequest> for ProductFields {
    fn from(body: ProductRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            price: body.price,
            category: body.category,
            image_url: body.image_url,
            stock: body.stock,
        }
    }
}

pub async fn create_product(
    caller: Caller,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<IdResponse>), StoreServiceError> {
    let usecase = CreateProductUseCase {
        access: state.access(),
        products: state.product_repo(),
    };
    let id = usecase.execute(caller.user_id(), body.into()).await?;
    state.changes.publish(StoreChange::Catalog);
    Ok((StatusCode::CREATED, Json(id.into())))
}

// ── PUT /admin/products/{id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(flatten)]
    pub fields: ProductRequest,
    pub is_active: bool,
}

pub async fn update_product(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateProductRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateProductUseCase {
        access: state.access(),
        products: state.product_repo(),
    };
    usecase
        .execute(caller.user_id(), id, body.fields.into(), body.is_active)
        .await?;
    state.changes.publish(StoreChange::Catalog);
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/products/{id} ──────────────────────────────────────────────

pub async fn remove_product(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StoreServiceError> {
    let id = parse_id(&id)?;
    let usecase = RemoveProductUseCase {
        access: state.access(),
        products: state.product_repo(),
    };
    usecase.execute(caller.user_id(), id).await?;
    state.changes.publish(StoreChange::Catalog);
    Ok(StatusCode::NO_CONTENT)
}
