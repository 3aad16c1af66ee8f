//! # Stripe Payment Intents
//!
//! Implementation of the Stripe PaymentIntents API. The backend only
//! creates the intent; the client confirms the charge directly against
//! Stripe using the returned client secret.

use crate::config::StripeConfig;
use async_trait::async_trait;
use bistro_core::{ApiError, ApiResult, PaymentGateway, PaymentIntent, Price};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe payment gateway
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
    pub fn from_env() -> ApiResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn gateway_error(message: impl Into<String>) -> ApiError {
        ApiError::GatewayFailure {
            provider: "stripe".to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self), fields(amount = %amount.display()))]
    async fn create_intent(&self, amount: Price) -> ApiResult<PaymentIntent> {
        // Accepted payment methods: card and link
        let form_params: Vec<(&str, String)> = vec![
            ("amount", amount.amount.to_string()),
            ("currency", amount.currency.as_str().to_string()),
            ("payment_method_types[]", "card".to_string()),
            ("payment_method_types[]", "link".to_string()),
        ];

        debug!("creating Stripe payment intent");

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| Self::gateway_error(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::gateway_error(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error envelope
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(Self::gateway_error(error_response.error.message));
            }

            return Err(Self::gateway_error(format!("HTTP {}: {}", status, body)));
        }

        let intent_response: StripePaymentIntentResponse = serde_json::from_str(&body)
            .map_err(|e| {
                ApiError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(intent_id = %intent_response.id, "created Stripe payment intent");

        Ok(PaymentIntent {
            intent_id: intent_response.id,
            amount,
            client_secret: intent_response.client_secret,
            provider: "stripe".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::Currency;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> StripeGateway {
        let config = StripeConfig::new("sk_test_abc").with_base_url(server.uri());
        StripeGateway::new(config)
    }

    #[tokio::test]
    async fn test_create_intent_returns_client_secret() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_abc"))
            .and(body_string_contains("amount=2500"))
            .and(body_string_contains("currency=usd"))
            .and(body_string_contains("payment_method_types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pi_123",
                "client_secret": "pi_123_secret_456",
                "status": "requires_payment_method"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let intent = gateway
            .create_intent(Price::new(25.0, Currency::USD))
            .await
            .unwrap();

        assert_eq!(intent.intent_id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_456");
        assert_eq!(intent.provider, "stripe");
        assert_eq!(intent.amount.amount, 2500);
    }

    #[tokio::test]
    async fn test_stripe_error_envelope_becomes_gateway_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Amount must be at least 50 cents"
                }
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let err = gateway
            .create_intent(Price::from_minor_units(1, Currency::USD))
            .await
            .unwrap_err();

        match err {
            ApiError::GatewayFailure { provider, message } => {
                assert_eq!(provider, "stripe");
                assert!(message.contains("at least 50 cents"));
            }
            other => panic!("expected GatewayFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_serialization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let err = gateway
            .create_intent(Price::new(10.0, Currency::USD))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Serialization(_)));
    }
}
