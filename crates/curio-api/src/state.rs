//! # Application State
//!
//! Shared state for the Axum application: the storefront store, the payment
//! gateway, return URLs, and server configuration.

use curio_core::{BoxedPaymentGateway, CheckoutUrls, ProductCatalog, UserRoster};
use curio_store::Store;
use curio_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for gateway return paths
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storefront tables and the commit transaction
    pub store: Store,
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Gateway return URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Stripe gateway, with the seed
    /// catalog and user roster loaded from config files.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let urls = CheckoutUrls::new(&config.base_url);

        let store = Store::new();
        store.load_catalog(load_product_catalog()?);
        store.load_roster(load_user_roster()?);

        let gateway = StripeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self {
            store,
            gateway: Arc::new(gateway),
            urls,
            config,
        })
    }
}

/// Load the seed product catalog from a config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using empty catalog");
    Ok(ProductCatalog::new())
}

/// Load the seeded user roster from a config file
fn load_user_roster() -> anyhow::Result<UserRoster> {
    let config_paths = [
        "config/users.toml",
        "../config/users.toml",
        "../../config/users.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let roster = UserRoster::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} users from {}", roster.users.len(), path);
            return Ok(roster);
        }
    }

    tracing::warn!("No user roster found, using empty roster");
    Ok(UserRoster::default())
}
