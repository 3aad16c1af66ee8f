//! # bistro-auth
//!
//! Authentication and authorization for the bistro ordering backend.
//!
//! Two pieces:
//!
//! 1. **TokenService** — signed, time-limited bearer tokens (HS256).
//!    Verification is pure: signature plus expiry, no storage.
//! 2. **AccessGate** — ordered, composable authorization predicates
//!    (`Authenticated`, `SelfOnly`, `Admin`) evaluated before a handler
//!    runs, short-circuiting on the first refusal.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bistro_auth::{AccessGate, Gate, GateRequest, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&secret));
//! let gate = AccessGate::new(tokens.clone(), users);
//!
//! // A route that only the subject themselves may call:
//! let claims = gate
//!     .check(
//!         &[Gate::Authenticated, Gate::SelfOnly],
//!         GateRequest::new(bearer).with_subject(&path_email),
//!     )
//!     .await?;
//! ```

pub mod gate;
pub mod token;

pub use gate::{bearer_token, AccessGate, Gate, GateRequest};
pub use token::{Claims, TokenService};
