//! # Routes
//!
//! Axum router configuration for the storefront. Exactly one handler is
//! bound per method and path.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /products - List products
///   - GET  /products/{id} - Get product by id
///
/// - Cart & checkout (authenticated):
///   - GET  /cart - Current cart view
///   - POST /cart/add/{id} - Select a product
///   - POST /cart/remove/{id} - Clear the selection
///   - POST /checkout - Redirect to the payment gateway
///   - GET  /payment-success - Gateway success return (commits the order)
///   - GET  /payment-cancel - Gateway cancel return
///   - GET  /orders - The user's orders
///
/// - Admin:
///   - GET   /admin/orders - All orders
///   - PATCH /admin/orders/{id} - Set order status
///   - PATCH /admin/products/{id} - Toggle availability
///   - GET   /admin/wallet - Platform wallet balance
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product));

    let shop_routes = Router::new()
        .route("/cart", get(handlers::view_cart))
        .route("/cart/add/{product_id}", post(handlers::add_to_cart))
        .route("/cart/remove/{product_id}", post(handlers::remove_from_cart))
        .route("/checkout", post(handlers::begin_checkout))
        .route("/payment-success", get(handlers::payment_success))
        .route("/payment-cancel", get(handlers::payment_cancel))
        .route("/orders", get(handlers::my_orders));

    let admin_routes = Router::new()
        .route("/orders", get(handlers::admin_orders))
        .route("/orders/{order_id}", patch(handlers::admin_set_status))
        .route("/products/{product_id}", patch(handlers::admin_toggle_product))
        .route("/wallet", get(handlers::admin_wallet));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .merge(catalog_routes)
        .merge(shop_routes)
        .nest("/admin", admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
