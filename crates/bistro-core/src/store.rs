//! # Repository Traits
//!
//! Explicit store interfaces, injected where they are needed at
//! construction time. No module-level shared clients: the access gate gets
//! a `DynUserStore`, the coordinator gets cart and payment stores, and
//! nothing else can reach persistence.
//!
//! Connection setup for a real document store is a deployment concern and
//! lives behind these traits; `InMemoryStore` implements all of them for
//! default wiring and tests.

use crate::cart::CartItem;
use crate::catalog::{MenuItem, MenuItemPatch, Review};
use crate::error::ApiResult;
use crate::payment::PaymentRecord;
use crate::user::{Role, User};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of an idempotent insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Identity Store: user records keyed by email
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Idempotent on email: registering a duplicate is a no-op success
    async fn insert(&self, user: User) -> ApiResult<InsertOutcome>;

    async fn list(&self) -> ApiResult<Vec<User>>;

    /// Role changes go through here and nowhere else
    async fn set_role(&self, id: Uuid, role: Role) -> ApiResult<()>;

    async fn remove(&self, id: Uuid) -> ApiResult<()>;
}

/// Menu Store: the catalog behind the public listing endpoint
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<MenuItem>>;

    async fn find(&self, id: Uuid) -> ApiResult<Option<MenuItem>>;

    async fn insert(&self, item: MenuItem) -> ApiResult<()>;

    async fn update(&self, id: Uuid, patch: MenuItemPatch) -> ApiResult<()>;

    async fn remove(&self, id: Uuid) -> ApiResult<()>;
}

/// Review Store: read-only from this backend's point of view
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Review>>;
}

/// Cart Store: line items tagged with their owner
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn list_for_owner(&self, email: &str) -> ApiResult<Vec<CartItem>>;

    async fn find(&self, id: Uuid) -> ApiResult<Option<CartItem>>;

    async fn insert(&self, item: CartItem) -> ApiResult<()>;

    /// Idempotent delete-by-id. Returns true if a row was removed, false
    /// if the id was already gone (no-op success).
    async fn delete(&self, id: Uuid) -> ApiResult<bool>;
}

/// Payment Store: durable records of completed checkouts
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, record: PaymentRecord) -> ApiResult<()>;

    /// Lookup by gateway transaction reference, for finalize idempotence
    async fn find_by_transaction_ref(&self, transaction_ref: &str)
        -> ApiResult<Option<PaymentRecord>>;

    async fn list_for_owner(&self, email: &str) -> ApiResult<Vec<PaymentRecord>>;

    /// Flip the saga marker once every referenced cart item is gone
    async fn mark_cart_cleared(&self, id: Uuid) -> ApiResult<()>;
}

// Shared handles. Long-lived and safe for concurrent use by contract.
pub type DynUserStore = Arc<dyn UserStore>;
pub type DynMenuStore = Arc<dyn MenuStore>;
pub type DynReviewStore = Arc<dyn ReviewStore>;
pub type DynCartStore = Arc<dyn CartStore>;
pub type DynPaymentStore = Arc<dyn PaymentStore>;
