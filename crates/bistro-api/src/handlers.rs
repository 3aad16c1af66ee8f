//! # Request Handlers
//!
//! Axum request handlers. Each protected handler names the exact ordered
//! gate chain it requires and runs it before touching any store.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use bistro_auth::{bearer_token, Gate, GateRequest};
use bistro_core::{
    ApiError, CartItem, CheckoutSummary, CompletedPayment, Currency, InsertOutcome, MenuItem,
    MenuItemPatch, PaymentRecord, Price, Review, Role, User,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(err: ApiError) -> Rejection {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()))
}

/// Token issuance request: the identity claims to sign
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Registration request (idempotent on email)
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// None when the email was already registered
    pub inserted_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Decimal price (e.g., 14.50)
    pub price: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Decimal price (e.g., 14.50)
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub email: String,
    pub menu_item_id: Uuid,
    pub name: String,
    /// Decimal price (e.g., 14.50)
    pub price: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Intent creation request: decimal amount to charge
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: String,
}

/// Checkout finalization: proof of a completed charge plus the cart items
/// being paid for. Amount is in minor units, as recorded by the gateway.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    pub owner_email: String,
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<Currency>,
    pub transaction_ref: String,
    pub cart_ids: Vec<Uuid>,
}

// =============================================================================
// Health
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "bistro-boss",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Token / identity handlers
// =============================================================================

/// Issue a token for the supplied identity claims
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, Rejection> {
    let token = state.tokens.issue(&request.email).map_err(reject)?;
    Ok(Json(TokenResponse { token }))
}

/// Admin-status check, restricted to the subject themselves
pub async fn admin_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Result<Json<AdminStatusResponse>, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::SelfOnly],
            GateRequest::new(bearer(&headers)).with_subject(&email),
        )
        .await
        .map_err(reject)?;

    let admin = state
        .users
        .find_by_email(&email)
        .await
        .map_err(reject)?
        .map(|u| u.is_admin())
        .unwrap_or(false);

    Ok(Json(AdminStatusResponse { admin }))
}

/// List all identities (admins only)
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<User>>, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    let users = state.users.list().await.map_err(reject)?;
    Ok(Json(users))
}

/// Register an identity. Idempotent on email: a duplicate is a no-op
/// success with no new record.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, Rejection> {
    let mut user = User::new(request.email);
    if let Some(name) = request.name {
        user = user.with_name(name);
    }
    let id = user.id;

    let outcome = state.users.insert(user).await.map_err(reject)?;
    let response = match outcome {
        InsertOutcome::Inserted => RegisterResponse {
            inserted_id: Some(id),
            message: "User registered".to_string(),
        },
        InsertOutcome::AlreadyExists => RegisterResponse {
            inserted_id: None,
            message: "User already exists".to_string(),
        },
    };
    Ok(Json(response))
}

/// Promote an identity to admin
pub async fn promote_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    state.users.set_role(id, Role::Admin).await.map_err(reject)?;
    info!(user_id = %id, "promoted to admin");
    Ok(StatusCode::NO_CONTENT)
}

/// Remove an identity
pub async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    state.users.remove(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Menu / review handlers
// =============================================================================

pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, Rejection> {
    let items = state.menu.list().await.map_err(reject)?;
    Ok(Json(items))
}

pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MenuItem>, Rejection> {
    let item = state
        .menu
        .find(id)
        .await
        .map_err(reject)?
        .ok_or_else(|| reject(ApiError::NotFound(format!("menu item {}", id))))?;
    Ok(Json(item))
}

pub async fn add_menu_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NewMenuItem>,
) -> Result<Json<MenuItem>, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    let currency = request.currency.unwrap_or_default();
    let mut item = MenuItem::new(
        request.name,
        request.category,
        Price::new(request.price, currency),
    );
    item.description = request.description;
    item.image_url = request.image_url;

    state.menu.insert(item.clone()).await.map_err(reject)?;
    Ok(Json(item))
}

pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<MenuItemUpdate>,
) -> Result<StatusCode, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    let currency = request.currency.unwrap_or_default();
    let patch = MenuItemPatch {
        name: request.name,
        category: request.category,
        description: request.description,
        price: request.price.map(|p| Price::new(p, currency)),
        image_url: request.image_url,
    };

    state.menu.update(id, patch).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::Admin],
            GateRequest::new(bearer(&headers)),
        )
        .await
        .map_err(reject)?;

    state.menu.remove(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, Rejection> {
    let reviews = state.reviews.list().await.map_err(reject)?;
    Ok(Json(reviews))
}

// =============================================================================
// Cart handlers
// =============================================================================

pub async fn list_cart(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>, Rejection> {
    let items = state
        .carts
        .list_for_owner(&query.email)
        .await
        .map_err(reject)?;
    Ok(Json(items))
}

pub async fn add_cart_item(
    State(state): State<AppState>,
    Json(request): Json<NewCartItem>,
) -> Result<Json<CartItem>, Rejection> {
    let currency = request.currency.unwrap_or_default();
    let item = CartItem::new(
        request.email,
        request.menu_item_id,
        request.name,
        Price::new(request.price, currency),
    );

    state.carts.insert(item.clone()).await.map_err(reject)?;
    Ok(Json(item))
}

/// Delete a cart item by id. Requires a token, and the item must belong to
/// the authenticated identity.
pub async fn delete_cart_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    let claims = state
        .gate
        .check(&[Gate::Authenticated], GateRequest::new(bearer(&headers)))
        .await
        .map_err(reject)?;

    let item = state
        .carts
        .find(id)
        .await
        .map_err(reject)?
        .ok_or_else(|| reject(ApiError::NotFound(format!("cart item {}", id))))?;

    if !item.is_owned_by(&claims.email) {
        return Err(reject(ApiError::Forbidden));
    }

    state.carts.delete(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Checkout handlers
// =============================================================================

/// Create a gateway payment intent and return its client secret.
/// Nothing is persisted locally on this path.
#[instrument(skip(state, request), fields(amount = request.amount))]
pub async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<IntentRequest>,
) -> Result<Json<IntentResponse>, Rejection> {
    let currency = request.currency.unwrap_or_default();
    let intent = state
        .coordinator
        .create_intent(Price::new(request.amount, currency))
        .await
        .map_err(reject)?;

    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// List a payer's payment history, restricted to the payer themselves
pub async fn list_payments(
    State(state): State<AppState>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<PaymentRecord>>, Rejection> {
    state
        .gate
        .check(
            &[Gate::Authenticated, Gate::SelfOnly],
            GateRequest::new(bearer(&headers)).with_subject(&email),
        )
        .await
        .map_err(reject)?;

    let records = state
        .payments
        .list_for_owner(&email)
        .await
        .map_err(reject)?;
    Ok(Json(records))
}

/// Finalize a checkout: durably record the payment, then clear the paid
/// cart items. Both outcomes are reported; a partial failure is an error,
/// never a silent log line.
#[instrument(skip(state, request), fields(owner = %request.owner_email))]
pub async fn finalize_payment(
    State(state): State<AppState>,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<CheckoutSummary>, Rejection> {
    let currency = request.currency.unwrap_or_default();
    let summary = state
        .coordinator
        .finalize(CompletedPayment {
            owner_email: request.owner_email,
            amount: Price::from_minor_units(request.amount, currency),
            transaction_ref: request.transaction_ref,
            cart_item_ids: request.cart_ids,
        })
        .await
        .map_err(reject)?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let (status, Json(body)) = reject(ApiError::Forbidden);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code, 403);
        assert_eq!(body.error, "forbidden access");
    }

    #[test]
    fn test_unauthenticated_rejection_leaks_nothing() {
        let (status, Json(body)) = reject(ApiError::Unauthenticated);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "unauthorized");
    }

    #[test]
    fn test_finalize_request_wire_format() {
        let request: FinalizeRequest = serde_json::from_str(
            r#"{
                "ownerEmail": "a@x.com",
                "amount": 1000,
                "transactionRef": "txn_1",
                "cartIds": ["7f1aa273-9d5a-4efa-9641-2ab04a3a128f"]
            }"#,
        )
        .unwrap();

        assert_eq!(request.owner_email, "a@x.com");
        assert_eq!(request.amount, 1000);
        assert_eq!(request.cart_ids.len(), 1);
    }
}
