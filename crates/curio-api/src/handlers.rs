//! # Request Handlers
//!
//! Axum request handlers for the storefront. Storage and gateway failures in
//! the checkout path are translated into a redirect back to the cart view
//! rather than surfaced as raw errors; admin routes answer with JSON.

use crate::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use curio_core::{CheckoutCharge, Currency, Order, OrderStatus, Price, Product, ShopError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Admin status-update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// One of: pending, shipped, delivered, cancelled
    pub status: String,
}

/// Query parameters on the gateway success return
#[derive(Debug, Deserialize)]
pub struct SuccessParams {
    /// Product id correlation (informational; the token is what's trusted)
    pub pid: String,
    /// Single-use checkout token minted at checkout initiation
    pub token: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn shop_error_to_response(err: ShopError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Catalog & health
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "curio-shop",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.store.products();
    Json(serde_json::json!({
        "count": products.len(),
        "products": products,
    }))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .product(&product_id)
        .map(Json)
        .ok_or_else(|| shop_error_to_response(ShopError::ProductNotFound { product_id }))
}

// =============================================================================
// Cart
// =============================================================================

/// Current cart view: zero or one entry, joined with product data
pub async fn view_cart(State(state): State<AppState>, AuthUser(user): AuthUser) -> Response {
    let items: Vec<_> = state.store.get_cart(&user.id).into_iter().collect();
    Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    }))
    .into_response()
}

/// Select a product, replacing any previous selection
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(product_id): Path<String>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .set_cart(&user.id, &product_id)
        .map_err(shop_error_to_response)?;
    Ok(Redirect::to("/cart"))
}

/// Clear the selection if it matches the given product
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(product_id): Path<String>,
) -> Redirect {
    state.store.remove_cart(&user.id, &product_id);
    Redirect::to("/cart")
}

// =============================================================================
// Checkout
// =============================================================================

/// Begin checkout: read the cart, mint a single-use intent, open a gateway
/// session, and redirect the user there. No order exists yet; the order is
/// provisional until the confirmation handler commits it.
pub async fn begin_checkout(State(state): State<AppState>, AuthUser(user): AuthUser) -> Response {
    let cart = match state.store.get_cart(&user.id).ok_or(ShopError::EmptyCart) {
        Ok(cart) => cart,
        Err(e) => {
            warn!(user_id = %user.id, "checkout rejected: {}", e);
            return Redirect::to("/cart").into_response();
        }
    };

    let intent = state.store.mint_intent(&user.id, &cart.product_id);
    let success_url = state.urls.success_url(&cart.product_id, &intent.token);
    let cancel_url = state.urls.cancel_url();

    let charge = CheckoutCharge::single(cart.title.clone(), cart.price.clone(), intent.token.clone())
        .with_email(user.email.clone());

    match state
        .gateway
        .create_session(&charge, &success_url, &cancel_url)
        .await
    {
        Ok(session) => {
            if let Err(e) = state.store.bind_session(&intent.token, &session.session_id) {
                warn!("could not bind gateway session to intent: {}", e);
            }
            info!(user_id = %user.id, session_id = %session.session_id, "redirecting to payment gateway");
            Redirect::to(&session.checkout_url).into_response()
        }
        Err(e) => {
            // No session, no dangling intent, no order.
            state.store.revoke_intent(&intent.token);
            error!("{}", ShopError::PaymentInit(e.to_string()));
            Redirect::to("/cart").into_response()
        }
    }
}

/// Gateway success return: consume the checkout token and commit the order.
///
/// The request itself is an unauthenticated claim of payment success, so
/// everything rides on the single-use token; a replayed or tampered request
/// is bounced back to the cart with nothing written.
pub async fn payment_success(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<SuccessParams>,
) -> Response {
    match state
        .store
        .commit_order(&params.token, &params.pid, &user.id)
    {
        Ok(order) => Html(confirmation_page(&state, &order)).into_response(),
        Err(e) => {
            warn!("payment confirmation rejected: {}", e);
            Redirect::to("/cart").into_response()
        }
    }
}

/// Gateway cancel return: nothing changed, the cart is intact
pub async fn payment_cancel() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #2e1a1a 0%, #3e2116 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">&#10060;</div>
        <h1>Payment Cancelled</h1>
        <p style="color: #666;">No charges were made. Your cart is untouched.</p>
        <p><a href="/cart">Back to your cart</a></p>
    </div>
</body>
</html>
"#,
    )
}

fn confirmation_page(state: &AppState, order: &Order) -> String {
    let title = state
        .store
        .product(&order.product_id)
        .map(|p| p.title)
        .unwrap_or_else(|| order.product_id.clone());

    format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Successful</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a2e1f 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">&#9989;</div>
        <h1>Payment Successful!</h1>
        <p>{} is yours. Order <code>{}</code> for {}.</p>
        <p style="color: #666;">Track it on your <a href="/orders">orders page</a>.</p>
    </div>
</body>
</html>
"#,
        title,
        order.id,
        order.total.display()
    )
}

// =============================================================================
// Orders
// =============================================================================

/// The authenticated user's orders, newest first
pub async fn my_orders(State(state): State<AppState>, AuthUser(user): AuthUser) -> Response {
    let orders = state.store.orders_for_user(&user.id);
    Json(serde_json::json!({
        "count": orders.len(),
        "orders": orders,
    }))
    .into_response()
}

// =============================================================================
// Admin
// =============================================================================

/// All orders with customer names, newest first (admin)
pub async fn admin_orders(State(state): State<AppState>, AdminUser(_): AdminUser) -> Response {
    let orders = state.store.all_orders();
    Json(serde_json::json!({
        "count": orders.len(),
        "orders": orders,
    }))
    .into_response()
}

/// Set an order's status (admin)
pub async fn admin_set_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
    let status: OrderStatus = request.status.parse().map_err(shop_error_to_response)?;
    let order = state
        .store
        .set_order_status(order_id, status)
        .map_err(shop_error_to_response)?;
    Ok(Json(order))
}

/// Toggle a product's availability (admin). Last-write-wins against a
/// concurrent sale of the same product.
pub async fn admin_toggle_product(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(product_id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let available = state
        .store
        .toggle_availability(&product_id)
        .map_err(shop_error_to_response)?;
    Ok(Json(serde_json::json!({
        "id": product_id,
        "available": available,
    })))
}

/// Platform wallet balance (admin)
pub async fn admin_wallet(State(state): State<AppState>, AdminUser(_): AdminUser) -> Response {
    let balance = state.store.wallet_balance();
    Json(serde_json::json!({
        "balance": balance,
        "currency": Currency::INR.as_str(),
        "display": Price::from_minor(balance, Currency::INR).display(),
    }))
    .into_response()
}
