//! Router-level tests for the checkout-to-fulfillment pipeline, driven
//! through the real router with a stub gateway standing in for Stripe.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use curio_api::routes::create_router;
use curio_api::state::{AppConfig, AppState};
use curio_core::{
    CheckoutCharge, CheckoutUrls, Currency, GatewaySession, PaymentGateway, Price, Product, Role,
    ShopResult, User,
};
use curio_store::Store;
use tower::ServiceExt;

/// Stands in for Stripe: echoes the success URL back inside the checkout
/// URL so tests can follow the redirect the way a paying customer would.
struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_session(
        &self,
        charge: &CheckoutCharge,
        success_url: &str,
        _cancel_url: &str,
    ) -> ShopResult<GatewaySession> {
        Ok(GatewaySession {
            session_id: format!("cs_stub_{}", charge.reference),
            checkout_url: format!("https://gateway.test/pay?return={}", success_url),
            expires_at: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        phone: String::new(),
        role,
    }
}

fn test_app() -> (Router, Store) {
    let store = Store::new();
    store.seed_user(user("u1", "Asha", Role::Customer));
    store.seed_user(user("a1", "Meera", Role::Admin));
    store.seed_product(Product::new(
        "p1",
        "Brass Astrolabe",
        Price::from_major(500, Currency::INR),
    ));
    store.seed_product(Product::new(
        "p2",
        "HMV Gramophone",
        Price::from_major(1200, Currency::INR),
    ));

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        base_url: "http://localhost:8080".to_string(),
        environment: "test".to_string(),
    };

    let state = AppState {
        store: store.clone(),
        gateway: Arc::new(StubGateway),
        urls: CheckoutUrls::new(&config.base_url),
        config,
    };

    (create_router(state), store)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(uid) = user_id {
        builder = builder.header("x-user-id", uid);
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap()
}

fn patch_json(uri: &str, user_id: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("x-user-id", user_id)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _store) = test_app();

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_cart_requires_identity() {
    let (app, _store) = test_app();

    let response = send(&app, get("/cart", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, get("/cart", Some("nobody"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cart_is_single_slot() {
    let (app, _store) = test_app();

    let response = send(&app, post("/cart/add/p1", "u1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    send(&app, post("/cart/add/p2", "u1")).await;

    let body = json_body(send(&app, get("/cart", Some("u1"))).await).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["product_id"], "p2");
    assert_eq!(body["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let (app, store) = test_app();

    let response = send(&app, post("/cart/add/ghost", "u1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(store.get_cart("u1").is_none());
}

#[tokio::test]
async fn test_remove_on_empty_cart_is_noop() {
    let (app, _store) = test_app();

    let response = send(&app, post("/cart/remove/p1", "u1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(send(&app, get("/cart", Some("u1"))).await).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects_back() {
    let (app, store) = test_app();

    let response = send(&app, post("/checkout", "u1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
    assert!(store.all_orders().is_empty());
}

#[tokio::test]
async fn test_end_to_end_purchase_and_replay() {
    let (app, store) = test_app();

    // Select the piece and head to checkout.
    send(&app, post("/cart/add/p1", "u1")).await;
    let response = send(&app, post("/checkout", "u1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let redirect = location(&response);
    assert!(redirect.starts_with("https://gateway.test/pay"));
    assert!(redirect.contains("pid=p1"));

    // Come back the way the gateway would send us.
    let token = redirect.split("token=").nth(1).unwrap().to_string();
    let success_uri = format!("/payment-success?pid=p1&token={token}");

    let response = send(&app, get(&success_uri, Some("u1"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Payment Successful"));

    // The commit applied all four effects.
    let orders = store.orders_for_user("u1");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, Price::from_major(500, Currency::INR));
    assert_eq!(orders[0].status.as_str(), "pending");
    assert!(!store.product("p1").unwrap().available);
    assert!(store.get_cart("u1").is_none());
    assert_eq!(store.wallet_balance(), 50_000);

    // A replayed confirmation commits nothing and credits nothing.
    let response = send(&app, get(&success_uri, Some("u1"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
    assert_eq!(store.orders_for_user("u1").len(), 1);
    assert_eq!(store.wallet_balance(), 50_000);
}

#[tokio::test]
async fn test_confirmation_with_forged_token() {
    let (app, store) = test_app();

    let response = send(&app, get("/payment-success?pid=p1&token=bogus", Some("u1"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
    assert!(store.all_orders().is_empty());
    assert!(store.product("p1").unwrap().available);
}

#[tokio::test]
async fn test_cancel_page_changes_nothing() {
    let (app, store) = test_app();
    send(&app, post("/cart/add/p1", "u1")).await;
    send(&app, post("/checkout", "u1")).await;

    let response = send(&app, get("/payment-cancel", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(store.all_orders().is_empty());
    assert_eq!(store.get_cart("u1").unwrap().product_id, "p1");
    assert!(store.product("p1").unwrap().available);
}

#[tokio::test]
async fn test_admin_routes_guarded() {
    let (app, _store) = test_app();

    let response = send(&app, get("/admin/orders", Some("u1"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "Access denied: admins only");

    let response = send(&app, get("/admin/orders", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, get("/admin/orders", Some("a1"))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_status_update() {
    let (app, store) = test_app();

    let intent = store.mint_intent("u1", "p1");
    let order = store.commit_order(&intent.token, "p1", "u1").unwrap();

    let uri = format!("/admin/orders/{}", order.id);
    let response = send(
        &app,
        patch_json(&uri, "a1", serde_json::json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "shipped");
    assert_eq!(body["total"]["amount"], 50_000);

    let response = send(
        &app,
        patch_json(&uri, "a1", serde_json::json!({"status": "teleported"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = format!("/admin/orders/{}", uuid::Uuid::new_v4());
    let response = send(
        &app,
        patch_json(&unknown, "a1", serde_json::json!({"status": "shipped"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_toggle_and_wallet() {
    let (app, store) = test_app();

    let response = send(&app, patch_json("/admin/products/p1", "a1", serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["available"], false);

    let body = json_body(
        send(&app, patch_json("/admin/products/p1", "a1", serde_json::json!({}))).await,
    )
    .await;
    assert_eq!(body["available"], true);

    let body = json_body(send(&app, get("/admin/wallet", Some("a1"))).await).await;
    assert_eq!(body["balance"], 0);

    let intent = store.mint_intent("u1", "p1");
    store.commit_order(&intent.token, "p1", "u1").unwrap();

    let body = json_body(send(&app, get("/admin/wallet", Some("a1"))).await).await;
    assert_eq!(body["balance"], 50_000);
    assert_eq!(body["currency"], "inr");
}
