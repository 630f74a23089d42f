//! # Order Types
//!
//! Durable order records and the checkout intent that guards their creation.
//!
//! An `Order` is created exactly once per confirmed payment and is immutable
//! afterwards except for its operator-controlled `status`. A `CheckoutIntent`
//! is minted when checkout begins and must be consumed, single-use, by the
//! payment confirmation handler; this is what makes a replayed confirmation
//! request harmless.

use crate::error::{ShopError, ShopResult};
use crate::product::Price;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Operator-facing lifecycle tag on a completed order.
///
/// No transition graph is enforced: any status may follow any other. This is
/// an accepted simplification of the moderation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Paid, awaiting shipment
    Pending,
    /// Handed to the courier
    Shipped,
    /// Received by the buyer
    Delivered,
    /// Cancelled by the operator
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ShopError;

    fn from_str(s: &str) -> ShopResult<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ShopError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A durable record of a completed purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id (generated)
    pub id: Uuid,

    /// Buying user id
    pub user_id: String,

    /// Purchased product id
    pub product_id: String,

    /// Always 1: every piece in the store is one of a kind
    pub quantity: u32,

    /// Total charged, captured from the product price at commit time
    pub total: Price,

    /// Operator-controlled status, starts at `pending`
    #[serde(default)]
    pub status: OrderStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order with generated id
    pub fn new(user_id: impl Into<String>, product_id: impl Into<String>, total: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            product_id: product_id.into(),
            quantity: 1,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// An order joined with product data, as shown to the buying user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: Uuid,
    pub product_id: String,
    pub product_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub quantity: u32,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order joined with product and customer data, as shown to the operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderView {
    pub id: Uuid,
    pub customer_name: String,
    pub product_title: String,
    pub quantity: u32,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// How long a minted checkout intent stays redeemable.
/// Matches the gateway's own session expiry.
const INTENT_TTL_HOURS: i64 = 24;

/// A provisional, not-yet-committed request to pay for the cart's contents.
///
/// The `token` is the opaque single-use credential embedded in the gateway
/// success URL; the confirmation handler consumes it instead of trusting the
/// bare product id in the query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutIntent {
    /// Opaque single-use token
    pub token: String,

    /// User the intent was minted for
    pub user_id: String,

    /// Product the intent covers
    pub product_id: String,

    /// Gateway session id, bound once the session is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Minting timestamp
    pub created_at: DateTime<Utc>,

    /// After this instant the token is no longer redeemable
    pub expires_at: DateTime<Utc>,
}

impl CheckoutIntent {
    /// Mint a fresh intent with a random token
    pub fn mint(user_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            product_id: product_id.into(),
            session_id: None,
            created_at: now,
            expires_at: now + Duration::hours(INTENT_TTL_HOURS),
        }
    }

    /// Check whether the token can still be redeemed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
