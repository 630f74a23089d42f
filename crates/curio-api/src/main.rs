//! # Curio Shop
//!
//! Storefront for one-of-a-kind pieces: cart, Stripe checkout, order
//! tracking, and admin moderation.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export BASE_URL=http://localhost:8080
//!
//! # Run the server
//! curio-shop
//! ```

use curio_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.store.products().len());
    info!("Payment provider: {}", state.gateway.provider_name());

    let app = routes::create_router(state);

    info!("Curio Shop starting on http://{}", addr);

    if !is_prod {
        info!("Catalog:  GET  http://{}/products", addr);
        info!("Checkout: POST http://{}/checkout", addr);
        info!("Orders:   GET  http://{}/orders", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Curio Shop
  ----------
  One-of-a-kind storefront
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
