//! # curio-core
//!
//! Core types and traits for the curio-shop storefront.
//!
//! This crate provides:
//! - `Product`, `Price`, and `Currency` for the catalog
//! - `CartView` for the single-slot cart
//! - `Order`, `OrderStatus`, and `CheckoutIntent` for the checkout flow
//! - `PaymentGateway` trait for payment providers
//! - `User` and `Role` for the trusted identity boundary
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use curio_core::{CheckoutCharge, PaymentGateway, Price, Product};
//!
//! // Look up the user's cart selection
//! let cart = store.get_cart(&user.id).ok_or(ShopError::EmptyCart)?;
//!
//! // Open a one-item session with the gateway
//! let charge = CheckoutCharge::single(cart.title.clone(), cart.price.clone(), intent.token.clone());
//! let session = gateway.create_session(&charge, &success_url, &cancel_url).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod cart;
pub mod error;
pub mod gateway;
pub mod order;
pub mod product;
pub mod user;

// Re-exports for convenience
pub use cart::CartView;
pub use error::{ShopError, ShopResult};
pub use gateway::{
    BoxedPaymentGateway, CheckoutCharge, CheckoutUrls, GatewaySession, PaymentGateway,
};
pub use order::{AdminOrderView, CheckoutIntent, Order, OrderStatus, OrderView};
pub use product::{Currency, Price, Product, ProductCatalog};
pub use user::{Role, User, UserRoster};
