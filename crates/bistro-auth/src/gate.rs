//! # Access Gate
//!
//! Authorization as data: each route names the ordered set of gates it
//! requires, and `AccessGate::check` evaluates them left to right,
//! short-circuiting on the first failure. No nested middleware callbacks,
//! no module-level store handles.

use crate::token::{Claims, TokenService};
use bistro_core::{ApiError, ApiResult, DynUserStore};
use std::sync::Arc;
use tracing::debug;

/// A single authorization predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Bearer token must be present and verify. Attaches the claims.
    Authenticated,

    /// Verified email must equal the subject email from the path/body.
    /// Identity-exact: an admin token for someone else is still refused.
    SelfOnly,

    /// Verified email's role in the identity store must be admin.
    /// Only meaningful after `Authenticated`.
    Admin,
}

/// The request-shaped inputs a gate chain can look at
#[derive(Debug, Clone, Copy, Default)]
pub struct GateRequest<'a> {
    /// Raw bearer token, if the request carried one
    pub bearer: Option<&'a str>,

    /// Subject identity from the request path or body, for `SelfOnly`
    pub subject_email: Option<&'a str>,
}

impl<'a> GateRequest<'a> {
    pub fn new(bearer: Option<&'a str>) -> Self {
        Self {
            bearer,
            subject_email: None,
        }
    }

    pub fn with_subject(mut self, subject_email: &'a str) -> Self {
        self.subject_email = Some(subject_email);
        self
    }
}

/// Strip the scheme from an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ").map(str::trim)
}

/// Evaluates gate chains. Built once at startup from the token service and
/// the identity store; shared across requests.
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<TokenService>,
    users: DynUserStore,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, users: DynUserStore) -> Self {
        Self { tokens, users }
    }

    /// Run the chain in order, failing on the first gate that refuses.
    /// Returns the verified claims for the handler to use.
    pub async fn check(&self, chain: &[Gate], request: GateRequest<'_>) -> ApiResult<Claims> {
        let mut verified: Option<Claims> = None;

        for gate in chain {
            match gate {
                Gate::Authenticated => {
                    let token = request.bearer.ok_or(ApiError::Unauthenticated)?;
                    verified = Some(self.tokens.verify(token)?);
                }
                Gate::SelfOnly => {
                    let claims = verified.as_ref().ok_or(ApiError::Unauthenticated)?;
                    let subject = request.subject_email.ok_or_else(|| {
                        ApiError::InvalidRequest("missing subject identity".to_string())
                    })?;
                    if claims.email != subject {
                        debug!(subject, claimed = %claims.email, "self check refused");
                        return Err(ApiError::Forbidden);
                    }
                }
                Gate::Admin => {
                    let claims = verified.as_ref().ok_or(ApiError::Unauthenticated)?;
                    let user = self.users.find_by_email(&claims.email).await?;
                    match user {
                        Some(u) if u.is_admin() => {}
                        _ => {
                            debug!(email = %claims.email, "admin check refused");
                            return Err(ApiError::Forbidden);
                        }
                    }
                }
            }
        }

        verified.ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{InMemoryStore, Role, User, UserStore};

    const SECRET: &str = "gate-secret";

    async fn gate_with_users() -> (AccessGate, Arc<TokenService>) {
        let store = Arc::new(InMemoryStore::new());

        UserStore::insert(store.as_ref(), User::new("user@x.com"))
            .await
            .unwrap();
        let admin = User::new("admin@x.com");
        let admin_id = admin.id;
        UserStore::insert(store.as_ref(), admin).await.unwrap();
        store.set_role(admin_id, Role::Admin).await.unwrap();

        let tokens = Arc::new(TokenService::new(SECRET));
        (AccessGate::new(tokens.clone(), store), tokens)
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(Some("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthenticated() {
        let (gate, _) = gate_with_users().await;

        let err = gate
            .check(&[Gate::Authenticated], GateRequest::new(None))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_authenticated_attaches_claims() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("user@x.com").unwrap();

        let claims = gate
            .check(&[Gate::Authenticated], GateRequest::new(Some(&token)))
            .await
            .unwrap();

        assert_eq!(claims.email, "user@x.com");
    }

    #[tokio::test]
    async fn test_self_gate_is_identity_exact() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("a@x.com").unwrap();

        let err = gate
            .check(
                &[Gate::Authenticated, Gate::SelfOnly],
                GateRequest::new(Some(&token)).with_subject("b@x.com"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn test_self_gate_refuses_even_admins() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("admin@x.com").unwrap();

        let err = gate
            .check(
                &[Gate::Authenticated, Gate::SelfOnly],
                GateRequest::new(Some(&token)).with_subject("user@x.com"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn test_self_gate_allows_matching_identity() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("user@x.com").unwrap();

        let claims = gate
            .check(
                &[Gate::Authenticated, Gate::SelfOnly],
                GateRequest::new(Some(&token)).with_subject("user@x.com"),
            )
            .await
            .unwrap();

        assert_eq!(claims.email, "user@x.com");
    }

    #[tokio::test]
    async fn test_admin_gate_denies_standard_users() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("user@x.com").unwrap();

        let err = gate
            .check(
                &[Gate::Authenticated, Gate::Admin],
                GateRequest::new(Some(&token)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn test_admin_gate_denies_unknown_identities() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("ghost@x.com").unwrap();

        let err = gate
            .check(
                &[Gate::Authenticated, Gate::Admin],
                GateRequest::new(Some(&token)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn test_admin_gate_allows_admins() {
        let (gate, tokens) = gate_with_users().await;
        let token = tokens.issue("admin@x.com").unwrap();

        let claims = gate
            .check(
                &[Gate::Authenticated, Gate::Admin],
                GateRequest::new(Some(&token)),
            )
            .await
            .unwrap();

        assert_eq!(claims.email, "admin@x.com");
    }

    #[tokio::test]
    async fn test_chain_short_circuits_on_bad_token() {
        let (gate, _) = gate_with_users().await;

        // Admin lookup never runs: the first gate already refused
        let err = gate
            .check(
                &[Gate::Authenticated, Gate::Admin],
                GateRequest::new(Some("garbage")),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
