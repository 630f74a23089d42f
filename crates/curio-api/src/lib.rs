//! # curio-api
//!
//! HTTP API layer for curio-shop.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The cart, checkout, and order endpoints
//! - Admin moderation endpoints
//!
//! Identity arrives from the external auth collaborator as an `x-user-id`
//! header naming an already-authenticated user; see [`auth`].
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/products` | List products |
//! | GET | `/products/{id}` | Get product |
//! | GET | `/cart` | Current cart view |
//! | POST | `/cart/add/{id}` | Select a product (replaces previous) |
//! | POST | `/cart/remove/{id}` | Clear the selection |
//! | POST | `/checkout` | Open a gateway session, redirect there |
//! | GET | `/payment-success` | Gateway success return; commits the order |
//! | GET | `/payment-cancel` | Gateway cancel return; no state change |
//! | GET | `/orders` | The user's orders |
//! | GET | `/admin/orders` | All orders (admin) |
//! | PATCH | `/admin/orders/{id}` | Set order status (admin) |
//! | PATCH | `/admin/products/{id}` | Toggle availability (admin) |
//! | GET | `/admin/wallet` | Platform wallet balance (admin) |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
