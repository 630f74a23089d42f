//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API for the storefront's
//! one-item purchases.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use curio_core::{
    CheckoutCharge, GatewaySession, PaymentGateway, ShopError, ShopResult,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe Checkout Session gateway
///
/// Uses Stripe's hosted checkout page for secure payments.
/// This is the recommended approach for PCI compliance.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the form body for a one-item payment session
    fn build_form(
        charge: &CheckoutCharge,
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            (
                "line_items[0][price_data][currency]".to_string(),
                charge.unit_price.currency.as_str().to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                charge.unit_price.amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                charge.title.clone(),
            ),
            (
                "line_items[0][quantity]".to_string(),
                charge.quantity.to_string(),
            ),
        ];

        if let Some(ref email) = charge.customer_email {
            form_params.push(("customer_email".to_string(), email.clone()));
        }

        form_params.push(("metadata[reference]".to_string(), charge.reference.clone()));

        form_params
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, charge), fields(reference = %charge.reference))]
    async fn create_session(
        &self,
        charge: &CheckoutCharge,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<GatewaySession> {
        debug!(
            "Creating Stripe checkout session: title={}, amount={}",
            charge.title, charge.unit_price.amount
        );

        let form_params = Self::build_form(charge, success_url, cancel_url);
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &charge.reference)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ShopError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(ShopError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                ShopError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, session_response.url
        );

        let expires_at = session_response
            .expires_at
            .map(|ts| DateTime::from_timestamp(ts, 0).unwrap_or(Utc::now() + Duration::hours(24)));

        Ok(GatewaySession {
            session_id: session_response.id,
            checkout_url: session_response.url,
            expires_at,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::{Currency, Price};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn charge() -> CheckoutCharge {
        CheckoutCharge::single(
            "Brass Astrolabe",
            Price::from_major(4500, Currency::INR),
            "tok-abc",
        )
        .with_email("asha@example.com")
    }

    fn gateway_for(server: &MockServer) -> StripeGateway {
        StripeGateway::new(StripeConfig::new("sk_test_key").with_api_base_url(server.uri()))
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Idempotency-Key", "tok-abc"))
            .and(body_string_contains("unit_amount%5D=450000"))
            .and(body_string_contains("currency%5D=inr"))
            .and(body_string_contains("quantity%5D=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/pay/cs_test_123",
                "expires_at": 1900000000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = gateway_for(&server)
            .create_session(
                &charge(),
                "http://localhost:8080/payment-success?pid=p1&token=tok-abc",
                "http://localhost:8080/payment-cancel",
            )
            .await
            .unwrap();

        assert_eq!(session.session_id, "cs_test_123");
        assert_eq!(
            session.checkout_url,
            "https://checkout.stripe.com/pay/cs_test_123"
        );
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_session_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
                "error": { "message": "Your card was declined." }
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_session(&charge(), "http://localhost/s", "http://localhost/c")
            .await
            .unwrap_err();

        match err {
            ShopError::Provider { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Your card was declined.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_session_network_error() {
        // Point at a port nothing listens on.
        let gateway =
            StripeGateway::new(StripeConfig::new("sk_test_key").with_api_base_url("http://127.0.0.1:1"));

        let err = gateway
            .create_session(&charge(), "http://localhost/s", "http://localhost/c")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Network(_)));
    }
}
