//! # bistro-core
//!
//! Core types and traits for the bistro ordering backend.
//!
//! This crate provides:
//! - `Role`, `User`, `MenuItem`, `CartItem`, `PaymentRecord` data contracts
//! - Repository traits (`UserStore`, `CartStore`, `PaymentStore`, ...) and
//!   an `InMemoryStore` implementing all of them
//! - `PaymentGateway` trait for charge-intent providers
//! - `CheckoutCoordinator` for the record-payment / clear-cart saga
//! - `ApiError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use bistro_core::{CheckoutCoordinator, CompletedPayment, Currency, Price};
//!
//! let coordinator = CheckoutCoordinator::new(gateway, carts, payments);
//!
//! // Phase one: mint a charge intent, return the client secret
//! let intent = coordinator.create_intent(Price::new(25.0, Currency::USD)).await?;
//!
//! // Phase two (after the client confirms the charge at the gateway):
//! let summary = coordinator.finalize(payment).await?;
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod money;
pub mod payment;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use cart::CartItem;
pub use catalog::{MenuItem, MenuItemPatch, Review};
pub use checkout::{CheckoutCoordinator, CompletedPayment};
pub use error::{ApiError, ApiResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use memory::InMemoryStore;
pub use money::{Currency, Price};
pub use payment::{
    CheckoutSummary, DeleteResultSummary, PaymentIntent, PaymentRecord, PaymentResultSummary,
};
pub use store::{
    CartStore, DynCartStore, DynMenuStore, DynPaymentStore, DynReviewStore, DynUserStore,
    InsertOutcome, MenuStore, PaymentStore, ReviewStore, UserStore,
};
pub use user::{Role, User};
