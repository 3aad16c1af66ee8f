//! # bistro-stripe
//!
//! Stripe payment gateway adapter for bistro-gate-rs.
//!
//! Implements `bistro_core::PaymentGateway` over the Stripe
//! PaymentIntents API: the backend mints the intent, the client completes
//! the charge against Stripe with the returned client secret, and the
//! backend only hears about the outcome when the caller finalizes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bistro_stripe::StripeGateway;
//! use bistro_core::{Currency, PaymentGateway, Price};
//!
//! // Create gateway from environment (STRIPE_SECRET_KEY)
//! let gateway = StripeGateway::from_env()?;
//!
//! let intent = gateway.create_intent(Price::new(25.0, Currency::USD)).await?;
//! // Hand intent.client_secret to the client
//! ```

pub mod config;
pub mod intent;

pub use config::StripeConfig;
pub use intent::StripeGateway;
