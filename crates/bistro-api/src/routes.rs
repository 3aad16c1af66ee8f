//! # Routes
//!
//! Axum router for the ordering backend. Each route's gate chain lives in
//! its handler; this module only lays out the surface.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes (all under /api/v1 except the health check):
/// - POST   /token                  issue token
/// - GET    /admin/{email}          admin-status check (auth + self)
/// - GET    /users                  list users (auth + admin)
/// - POST   /users                  register (idempotent on email)
/// - PATCH  /admin/users/{id}       promote to admin (auth + admin)
/// - DELETE /admin/users/{id}       remove user (auth + admin)
/// - GET    /menu, /menu/{id}       list / fetch menu
/// - POST   /admin/menu             add menu item (auth + admin)
/// - PATCH  /admin/menu/{id}        update menu item (auth + admin)
/// - DELETE /admin/menu/{id}        delete menu item (auth + admin)
/// - GET    /reviews                list reviews
/// - GET    /carts?email=           list cart items
/// - POST   /carts                  add cart item
/// - DELETE /carts/{id}             delete own cart item (auth + ownership)
/// - POST   /checkout/intent        create payment intent
/// - GET    /payments/{email}       payment history (auth + self)
/// - POST   /payments               finalize checkout
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/token", post(handlers::issue_token))
        .route("/users", get(handlers::list_users).post(handlers::register_user))
        .route("/admin/{email}", get(handlers::admin_status))
        .route(
            "/admin/users/{id}",
            patch(handlers::promote_user).delete(handlers::remove_user),
        );

    let catalog_routes = Router::new()
        .route("/menu", get(handlers::list_menu))
        .route("/menu/{id}", get(handlers::get_menu_item))
        .route("/admin/menu", post(handlers::add_menu_item))
        .route(
            "/admin/menu/{id}",
            patch(handlers::update_menu_item).delete(handlers::delete_menu_item),
        )
        .route("/reviews", get(handlers::list_reviews));

    let checkout_routes = Router::new()
        .route("/carts", get(handlers::list_cart).post(handlers::add_cart_item))
        .route("/carts/{id}", delete(handlers::delete_cart_item))
        .route("/checkout/intent", post(handlers::create_intent))
        .route("/payments/{email}", get(handlers::list_payments))
        .route("/payments", post(handlers::finalize_payment));

    let api_routes = Router::new()
        .merge(user_routes)
        .merge(catalog_routes)
        .merge(checkout_routes);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
