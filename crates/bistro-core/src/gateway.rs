//! # Payment Gateway Trait
//!
//! Seam between the checkout coordinator and the payment provider.
//! Implementations: Stripe today; anything that can mint a charge intent
//! and hand back a client secret tomorrow.

use crate::error::ApiResult;
use crate::money::Price;
use crate::payment::PaymentIntent;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment gateway implementations.
///
/// The coordinator only ever asks a gateway for a charge intent; the client
/// completes the charge directly against the provider using the returned
/// secret, off-system.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a charge intent for the given amount.
    ///
    /// No local state is written on this path. A failure here is terminal
    /// for the attempt and reported to the caller; nothing retries it.
    async fn create_intent(&self, amount: Price) -> ApiResult<PaymentIntent>;

    /// Provider name (for logging and the intent's `provider` field)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
