//! # Shop Error Types
//!
//! Typed error handling for the curio-shop storefront.
//! All storefront operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Checkout attempted with no cart entry
    #[error("Cart is empty")]
    EmptyCart,

    /// Product not found in the store
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Product was already sold to another buyer
    #[error("Product already sold: {product_id}")]
    ProductAlreadySold { product_id: String },

    /// Payment gateway session creation failed
    #[error("Payment initiation failed: {0}")]
    PaymentInit(String),

    /// Checkout intent unknown, expired, or already consumed
    #[error("Checkout intent not found or already used")]
    IntentNotFound,

    /// The commit transaction could not be applied
    #[error("Order commit failed: {0}")]
    OrderCommitFailed(String),

    /// Order id does not exist
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Order status value outside the defined set
    #[error("Invalid order status: {status}")]
    InvalidStatus { status: String },

    /// No authenticated identity on the request
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated but not allowed (admin routes)
    #[error("Access denied")]
    Forbidden,

    /// Generic missing resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShopError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShopError::Network(_) | ShopError::Provider { .. })
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::EmptyCart => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::ProductAlreadySold { .. } => 409,
            ShopError::PaymentInit(_) => 502,
            ShopError::IntentNotFound => 404,
            ShopError::OrderCommitFailed(_) => 500,
            ShopError::OrderNotFound { .. } => 404,
            ShopError::InvalidStatus { .. } => 400,
            ShopError::Unauthorized => 401,
            ShopError::Forbidden => 403,
            ShopError::NotFound(_) => 404,
            ShopError::Provider { .. } => 502,
            ShopError::Network(_) => 503,
            ShopError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ShopError::Network("timeout".into()).is_retryable());
        assert!(ShopError::Provider {
            provider: "stripe".into(),
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(!ShopError::EmptyCart.is_retryable());
        assert!(!ShopError::IntentNotFound.is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ShopError::EmptyCart.status_code(), 400);
        assert_eq!(
            ShopError::ProductNotFound {
                product_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            ShopError::ProductAlreadySold {
                product_id: "x".into()
            }
            .status_code(),
            409
        );
        assert_eq!(ShopError::Forbidden.status_code(), 403);
        assert_eq!(ShopError::Unauthorized.status_code(), 401);
    }
}
