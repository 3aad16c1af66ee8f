//! # Checkout Coordinator
//!
//! Orchestrates the two-phase checkout:
//!
//! 1. `create_intent` asks the gateway for a charge intent and hands the
//!    client secret back. No local writes.
//! 2. The client completes the charge against the gateway, off-system.
//! 3. `finalize` durably records the payment, then clears the paid cart
//!    items. The record is written first and is the source of truth: cart
//!    items it references are owed a deletion, retried until confirmed.
//!
//! A payment record with undeleted cart items is a duplicate-billing risk;
//! a deleted cart item with no record is only a lost-cart nuisance. The
//! coordinator therefore never touches the cart before the record exists,
//! and never swallows a partial failure of the pair.

use crate::error::{ApiError, ApiResult};
use crate::gateway::BoxedPaymentGateway;
use crate::money::Price;
use crate::payment::{
    CheckoutSummary, DeleteResultSummary, PaymentIntent, PaymentRecord, PaymentResultSummary,
};
use crate::store::{DynCartStore, DynPaymentStore};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Attempts per cart item before the clear is reported as failed
const CART_CLEAR_ATTEMPTS: u32 = 3;

/// Proof of a completed charge, submitted by the caller to finalize
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedPayment {
    /// Identity that paid; every referenced cart item must belong to it
    pub owner_email: String,

    /// Amount charged
    pub amount: Price,

    /// Gateway transaction reference; finalize is idempotent on it
    pub transaction_ref: String,

    /// Cart items this payment covers
    pub cart_item_ids: Vec<Uuid>,
}

/// Coordinates payment-intent creation and checkout finalization.
///
/// Collaborators are injected at construction; the coordinator holds no
/// other state and is safe to share across concurrent requests.
pub struct CheckoutCoordinator {
    gateway: BoxedPaymentGateway,
    carts: DynCartStore,
    payments: DynPaymentStore,
}

impl CheckoutCoordinator {
    pub fn new(
        gateway: BoxedPaymentGateway,
        carts: DynCartStore,
        payments: DynPaymentStore,
    ) -> Self {
        Self {
            gateway,
            carts,
            payments,
        }
    }

    /// Create a charge intent at the gateway and return it.
    ///
    /// Terminal on failure: a gateway error is reported to the caller and
    /// not retried. Nothing is persisted locally on this path.
    #[instrument(skip(self))]
    pub async fn create_intent(&self, amount: Price) -> ApiResult<PaymentIntent> {
        if amount.amount <= 0 {
            return Err(ApiError::InvalidRequest(format!(
                "amount must be positive, got {}",
                amount.amount
            )));
        }

        let intent = self.gateway.create_intent(amount).await?;
        info!(
            provider = intent.provider,
            intent_id = %intent.intent_id,
            amount = %amount.display(),
            "created payment intent"
        );
        Ok(intent)
    }

    /// Record a completed payment, then clear the paid cart items.
    ///
    /// Idempotent on `transaction_ref`: a repeat submission writes no second
    /// record, but still drives the cart clear to completion (at-least-once).
    #[instrument(skip(self, payment), fields(owner = %payment.owner_email, txn = %payment.transaction_ref))]
    pub async fn finalize(&self, payment: CompletedPayment) -> ApiResult<CheckoutSummary> {
        if payment.cart_item_ids.is_empty() {
            return Err(ApiError::InvalidRequest(
                "no cart items to pay for".to_string(),
            ));
        }

        self.verify_ownership(&payment).await?;

        // RecordPayment. An existing record for this transaction wins; the
        // submitted payload must still agree with it on the owner.
        let (record, duplicate) = match self
            .payments
            .find_by_transaction_ref(&payment.transaction_ref)
            .await?
        {
            Some(existing) => {
                if existing.owner_email != payment.owner_email {
                    return Err(ApiError::Forbidden);
                }
                info!(record_id = %existing.id, "transaction already recorded");
                (existing, true)
            }
            None => {
                let record = PaymentRecord::new(
                    payment.owner_email.clone(),
                    payment.amount,
                    payment.transaction_ref.clone(),
                    payment.cart_item_ids.clone(),
                );
                self.payments.insert(record.clone()).await?;
                info!(record_id = %record.id, "payment recorded");
                (record, false)
            }
        };

        // ClearCart. Runs even on a duplicate submission: the record may
        // exist from an attempt whose clear never finished.
        let delete_result = self.clear_cart(&record).await?;

        if !record.cart_cleared {
            self.payments.mark_cart_cleared(record.id).await?;
        }

        Ok(CheckoutSummary {
            payment_result: PaymentResultSummary {
                record_id: record.id,
                duplicate,
            },
            delete_result,
        })
    }

    /// Every submitted cart item that still exists must belong to the payer
    async fn verify_ownership(&self, payment: &CompletedPayment) -> ApiResult<()> {
        for id in &payment.cart_item_ids {
            if let Some(item) = self.carts.find(*id).await? {
                if !item.is_owned_by(&payment.owner_email) {
                    warn!(cart_item = %id, "cart item owned by another identity");
                    return Err(ApiError::Forbidden);
                }
            }
        }
        Ok(())
    }

    /// Delete every cart item the record references, with bounded retry.
    /// Exhausting the retries surfaces a `StoreFailure`; the record stays
    /// behind as the durable claim that the deletions are still owed.
    async fn clear_cart(&self, record: &PaymentRecord) -> ApiResult<DeleteResultSummary> {
        let mut deleted = 0usize;
        let mut already_absent = 0usize;

        for id in &record.cart_item_ids {
            let removed = self.delete_with_retry(*id).await?;
            if removed {
                deleted += 1;
            } else {
                already_absent += 1;
            }
        }

        info!(
            record_id = %record.id,
            deleted,
            already_absent,
            "cart cleared"
        );

        Ok(DeleteResultSummary {
            deleted_count: deleted,
            already_absent,
        })
    }

    async fn delete_with_retry(&self, id: Uuid) -> ApiResult<bool> {
        let mut last_err = None;
        for attempt in 1..=CART_CLEAR_ATTEMPTS {
            match self.carts.delete(id).await {
                Ok(removed) => return Ok(removed),
                Err(err) if err.is_retryable() => {
                    warn!(cart_item = %id, attempt, error = %err, "cart delete failed, retrying");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            ApiError::Internal("cart clear retry loop exited without error".to_string())
        }))
    }
}
