//! # Cart Types
//!
//! The cart is single-slot: each user holds at most one pending product
//! selection, and adding a new product replaces the previous one. This is
//! modeled as an upsert keyed on user id so there is never a window where a
//! concurrent reader sees an empty cart mid-replacement.

use crate::product::Price;
use serde::{Deserialize, Serialize};

/// The cart entry joined with current product data, as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    /// Selected product id
    pub product_id: String,

    /// Product title (denormalized for display)
    pub title: String,

    /// Current unit price
    pub price: Price,

    /// Whether the product is still available
    pub available: bool,

    /// Quantity is fixed at 1 for the single-slot cart, but surfaced so the
    /// cart view matches the order rows it turns into.
    pub quantity: u32,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
