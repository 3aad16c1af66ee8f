//! # Payment Types
//!
//! The gateway-owned payment intent (ephemeral, never persisted locally)
//! and the durable payment record written when a checkout completes.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A charge intent created at the payment gateway.
///
/// Only the client secret goes back to the caller; the intent itself lives
/// at the gateway and is never written to local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Gateway's intent ID
    pub intent_id: String,

    /// Amount to be charged
    pub amount: Price,

    /// Secret the client uses to complete the charge against the gateway
    pub client_secret: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,
}

/// A durably recorded, completed payment.
///
/// Created exactly once per completed checkout. Immutable afterwards except
/// for `cart_cleared`, which flips to true once every referenced cart item
/// has been removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique record ID (generated)
    pub id: Uuid,

    /// Email of the identity that paid
    pub owner_email: String,

    /// Amount paid
    pub amount: Price,

    /// Gateway transaction reference (proof of the completed charge)
    pub transaction_ref: String,

    /// Cart items this payment covers
    pub cart_item_ids: Vec<Uuid>,

    /// Saga marker: true once every item in `cart_item_ids` is gone
    pub cart_cleared: bool,

    /// When the record was written
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Create a new record for a completed charge. Starts with
    /// `cart_cleared = false`; the coordinator flips it after the clear.
    pub fn new(
        owner_email: impl Into<String>,
        amount: Price,
        transaction_ref: impl Into<String>,
        cart_item_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_email: owner_email.into(),
            amount,
            transaction_ref: transaction_ref.into(),
            cart_item_ids,
            cart_cleared: false,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of writing the payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResultSummary {
    /// ID of the payment record covering this transaction
    pub record_id: Uuid,

    /// True when this request found an existing record for the same
    /// transaction reference instead of writing a new one
    pub duplicate: bool,
}

/// Outcome of the cart clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResultSummary {
    /// Items actually removed by this request
    pub deleted_count: usize,

    /// Items already absent (idempotent no-ops)
    pub already_absent: usize,
}

/// Terminal summary of a finalized checkout: both halves of the
/// record-payment / clear-cart pair, reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub payment_result: PaymentResultSummary,
    pub delete_result: DeleteResultSummary,
}
