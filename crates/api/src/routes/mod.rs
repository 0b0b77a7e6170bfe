//! HTTP route handlers for the adoption API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                               - Liveness
//! GET   /health/ready                         - Store readiness
//!
//! # Pets
//! GET   /api/pets                             - Pet listing (?adoptionStatus, ?type)
//! GET   /api/pets/{id}                        - Pet detail
//!
//! # Adoption requests
//! POST  /api/adoption-requests                - Submit (auth)
//! GET   /api/adoption-requests/my-requests    - Caller's requests (auth)
//! GET   /api/adoption-requests                - All requests (access policy)
//! PATCH /api/adoption-requests/{id}/status    - Status update (access policy)
//!
//! # Favorites (auth)
//! GET   /api/user/favorites                   - Resolved favorite pets
//! POST  /api/user/favorites/{petId}           - Toggle a favorite
//!
//! # Payments (auth)
//! POST  /api/payments/create-order            - Create a gateway order
//! POST  /api/payments/verify                  - Verify a checkout signature
//! POST  /api/payments/failure                 - Record a failed checkout
//! ```

pub mod adoption_requests;
pub mod favorites;
pub mod payments;
pub mod pets;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the adoption request routes.
pub fn adoption_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/adoption-requests",
            get(adoption_requests::list_all).post(adoption_requests::submit),
        )
        .route(
            "/api/adoption-requests/my-requests",
            get(adoption_requests::my_requests),
        )
        .route(
            "/api/adoption-requests/{id}/status",
            patch(adoption_requests::update_status),
        )
}

/// Create the favorites routes.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/favorites", get(favorites::list))
        .route("/api/user/favorites/{pet_id}", post(favorites::toggle))
}

/// Create the pet catalogue routes.
pub fn pet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/pets", get(pets::index))
        .route("/api/pets/{id}", get(pets::show))
}

/// Create the payment routes.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments/create-order", post(payments::create_order))
        .route("/api/payments/verify", post(payments::verify))
        .route("/api/payments/failure", post(payments::failure))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(pet_routes())
        .merge(adoption_request_routes())
        .merge(favorite_routes())
        .merge(payment_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.repos().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
