//! # curio-stripe
//!
//! Stripe gateway for curio-shop, built on the Checkout Sessions API.
//!
//! The storefront hands Stripe a single line item (every piece is one of a
//! kind, quantity 1), Stripe hosts the payment page, and the customer comes
//! back through the success URL carrying the storefront's own single-use
//! checkout token. Nothing here mutates storefront state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use curio_stripe::StripeGateway;
//! use curio_core::{CheckoutCharge, PaymentGateway};
//!
//! // Create gateway from environment (STRIPE_SECRET_KEY)
//! let gateway = StripeGateway::from_env()?;
//!
//! let session = gateway.create_session(
//!     &charge,
//!     "https://curioshop.io/payment-success?pid=...&token=...",
//!     "https://curioshop.io/payment-cancel",
//! ).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeGateway;
pub use config::StripeConfig;
