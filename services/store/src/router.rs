use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use shopfront_core::error::not_found;
use shopfront_core::health::healthz;
use shopfront_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{
        add_admin, bootstrap_super_admin, get_admin_status, get_dashboard_stats, list_admins,
        remove_admin,
    },
    cart::{add_cart_item, clear_cart, get_cart, remove_cart_item, update_cart_item},
    changes::stream_changes,
    health::readyz,
    order::{create_order, get_order, list_all_orders, list_orders, update_order_status},
    product::{
        create_product, get_product, list_all_products, list_categories, list_products,
        remove_product, update_product,
    },
    user::{get_me, sync_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users/@me", get(get_me).put(sync_me))
        // Catalog
        .route("/products", get(list_products))
        .route("/products/categories", get(list_categories))
        .route("/products/{id}", get(get_product))
        .route("/admin/products", get(list_all_products).post(create_product))
        .route(
            "/admin/products/{id}",
            put(update_product).delete(remove_product),
        )
        // Cart
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_cart_item))
        .route(
            "/cart/items/{id}",
            patch(update_cart_item).delete(remove_cart_item),
        )
        // Orders
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/admin/orders", get(list_all_orders))
        .route("/admin/orders/{id}/status", patch(update_order_status))
        // Admin registry
        .route("/admin/status", get(get_admin_status))
        .route("/admin/admins", get(list_admins).post(add_admin))
        .route("/admin/admins/{id}", delete(remove_admin))
        .route("/admin/bootstrap", post(bootstrap_super_admin))
        .route("/admin/stats", get(get_dashboard_stats))
        // Live updates
        .route("/changes", get(stream_changes))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
