//! # Payment Gateway Trait
//!
//! Seam between the checkout initiator and the external payment provider.
//! The storefront only ever asks the gateway one thing: open a hosted
//! checkout session for a single one-of-a-kind piece and hand back the
//! redirect URL. Everything after the redirect comes back through the
//! success/cancel return paths.

use crate::error::ShopResult;
use crate::product::Price;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The one-item charge a checkout session is opened for
#[derive(Debug, Clone)]
pub struct CheckoutCharge {
    /// Line-item name shown on the gateway's hosted page
    pub title: String,

    /// Unit amount in minor currency units
    pub unit_price: Price,

    /// Always 1 for this storefront
    pub quantity: u32,

    /// Correlation reference, also used as the provider idempotency key.
    /// This is the checkout-intent token.
    pub reference: String,

    /// Customer email for prefill (optional)
    pub customer_email: Option<String>,
}

impl CheckoutCharge {
    /// Build a single-unit charge
    pub fn single(title: impl Into<String>, unit_price: Price, reference: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            unit_price,
            quantity: 1,
            reference: reference.into(),
            customer_email: None,
        }
    }

    /// Builder: set customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone)]
pub struct GatewaySession {
    /// Provider's session id
    pub session_id: String,

    /// URL to redirect the customer to for payment
    pub checkout_url: String,

    /// When the session expires, if the provider reports it
    pub expires_at: Option<DateTime<Utc>>,
}

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session and return the redirect target.
    ///
    /// # Arguments
    /// * `charge` - The single line item to charge for
    /// * `success_url` - Return URL after successful payment (carries the
    ///   correlation token)
    /// * `cancel_url` - Return URL if the customer abandons the flow
    async fn create_session(
        &self,
        charge: &CheckoutCharge,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<GatewaySession>;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Configuration for the return URLs used in checkout
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the application (e.g., "https://curioshop.io")
    pub base_url: String,
    /// Success return path
    pub success_path: String,
    /// Cancel return path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            success_path: "/payment-success".to_string(),
            cancel_path: "/payment-cancel".to_string(),
        }
    }

    /// Success URL carrying the product id and the single-use intent token
    pub fn success_url(&self, product_id: &str, token: &str) -> String {
        format!(
            "{}{}?pid={}&token={}",
            self.base_url, self.success_path, product_id, token
        )
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
