//! # bistro-api
//!
//! HTTP API layer for bistro-gate-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Token issuance and gated identity/menu/cart endpoints
//! - The two-phase checkout surface (intent creation, finalization)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/token` | Issue bearer token |
//! | GET | `/api/v1/admin/{email}` | Admin-status check |
//! | POST | `/api/v1/checkout/intent` | Create payment intent |
//! | POST | `/api/v1/payments` | Finalize checkout |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
