//! # Application State
//!
//! Shared state for the Axum application. Every collaborator — token
//! service, access gate, stores, checkout coordinator — is built once at
//! startup and injected here; handlers never reach for globals.

use bistro_auth::{AccessGate, TokenService};
use bistro_core::{
    ApiError, BoxedPaymentGateway, CheckoutCoordinator, DynCartStore, DynMenuStore,
    DynPaymentStore, DynReviewStore, DynUserStore, InMemoryStore,
};
use bistro_stripe::StripeGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Token signing secret, fixed for the process lifetime
    pub token_secret: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ApiError::Configuration("ACCESS_TOKEN_SECRET not set".to_string()))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            token_secret,
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, ApiError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ApiError::Configuration(format!("invalid bind address {}:{}", self.host, self.port))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Token issuance
    pub tokens: Arc<TokenService>,
    /// Authorization predicate chains
    pub gate: AccessGate,
    /// Checkout coordinator (intent creation + finalize saga)
    pub coordinator: Arc<CheckoutCoordinator>,
    /// Stores
    pub users: DynUserStore,
    pub menu: DynMenuStore,
    pub reviews: DynReviewStore,
    pub carts: DynCartStore,
    pub payments: DynPaymentStore,
}

impl AppState {
    /// Create state from the environment, with the Stripe gateway and an
    /// in-memory store behind the repository traits.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let gateway = Arc::new(
            StripeGateway::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?,
        );
        let store = Arc::new(InMemoryStore::new());
        Ok(Self::from_parts(config, gateway, store))
    }

    /// Wire the state from explicit collaborators. Tests inject fakes here;
    /// a real document store slots in the same way.
    pub fn from_parts(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        store: Arc<InMemoryStore>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.token_secret));
        let users: DynUserStore = store.clone();
        let gate = AccessGate::new(tokens.clone(), users.clone());
        let coordinator = Arc::new(CheckoutCoordinator::new(
            gateway,
            store.clone(),
            store.clone(),
        ));

        Self {
            config: Arc::new(config),
            tokens,
            gate,
            coordinator,
            users,
            menu: store.clone(),
            reviews: store.clone(),
            carts: store.clone(),
            payments: store,
        }
    }
}
