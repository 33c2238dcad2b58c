use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use shopfront_core::error::error_body;

/// Store service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreServiceError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("not authorized")]
    Forbidden,
    #[error("cannot remove the root administrator")]
    RootAdminProtected,
    #[error("product not found")]
    ProductNotFound,
    #[error("cart item not found")]
    CartItemNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("admin not found")]
    AdminNotFound,
    #[error("user is already an admin")]
    AdminAlreadyExists,
    #[error("cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    #[error("quantity must be between 1 and 2147483647")]
    InvalidQuantity,
    #[error("price must not be negative")]
    InvalidPrice,
    #[error("stock must not be negative")]
    InvalidStock,
    #[error("invalid order status")]
    InvalidOrderStatus,
    #[error("invalid admin role")]
    InvalidAdminRole,
    #[error("order has no items")]
    EmptyOrder,
    #[error("total amount does not match items")]
    TotalMismatch,
    #[error("missing shipping field: {0}")]
    MissingShippingField(&'static str),
    #[error("missing data")]
    MissingData,
    #[error("invalid id")]
    InvalidId,
    #[error("{detail}")]
    InvalidBody { status: StatusCode, detail: String },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StoreServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::RootAdminProtected => "ROOT_ADMIN_PROTECTED",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AdminNotFound => "ADMIN_NOT_FOUND",
            Self::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidStock => "INVALID_STOCK",
            Self::InvalidOrderStatus => "INVALID_ORDER_STATUS",
            Self::InvalidAdminRole => "INVALID_ADMIN_ROLE",
            Self::EmptyOrder => "EMPTY_ORDER",
            Self::TotalMismatch => "TOTAL_MISMATCH",
            Self::MissingShippingField(_) => "MISSING_SHIPPING_FIELD",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidBody { .. } => "INVALID_BODY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::RootAdminProtected => StatusCode::FORBIDDEN,
            Self::ProductNotFound
            | Self::CartItemNotFound
            | Self::OrderNotFound
            | Self::UserNotFound
            | Self::AdminNotFound => StatusCode::NOT_FOUND,
            Self::AdminAlreadyExists | Self::InvalidStatusTransition { .. } => {
                StatusCode::CONFLICT
            }
            Self::InvalidQuantity
            | Self::InvalidPrice
            | Self::InvalidStock
            | Self::InvalidOrderStatus
            | Self::InvalidAdminRole
            | Self::EmptyOrder
            | Self::TotalMismatch
            | Self::MissingShippingField(_)
            | Self::MissingData
            | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::InvalidBody { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Keeps axum's status (400, 415 or 422) and its description of the problem.
impl From<JsonRejection> for StoreServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for StoreServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        (self.status(), error_body(self.kind(), self.to_string())).into_response()
    }
}
