//! Payment route handlers.
//!
//! These only talk to the gateway. Recording a payment on an adoption request
//! is done through the status update route.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::payments::{OrderRequest, PaymentOrder, PaymentVerification};
use crate::state::AppState;

/// Response body for order creation.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: PaymentOrder,
}

/// Response body for verification and failure reports.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub msg: &'static str,
}

/// A checkout failure reported by the client.
#[derive(Debug, Deserialize)]
pub struct PaymentFailure {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// `POST /api/payments/create-order`
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    body: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>> {
    let Json(request) = body?;
    tracing::debug!(user_id = %claims.user_id, amount = %request.amount, "Creating payment order");

    let order = state.payments().create_order(request).await?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// `POST /api/payments/verify`
pub async fn verify(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    body: std::result::Result<Json<PaymentVerification>, JsonRejection>,
) -> Result<Json<AckResponse>> {
    let Json(verification) = body?;
    state.payments().verify_signature(&verification)?;

    tracing::info!(
        user_id = %claims.user_id,
        order_id = %verification.razorpay_order_id,
        payment_id = %verification.razorpay_payment_id,
        "Payment verified"
    );

    Ok(Json(AckResponse {
        success: true,
        msg: "Payment verified successfully",
    }))
}

/// `POST /api/payments/failure`
pub async fn failure(
    RequireAuth(claims): RequireAuth,
    body: std::result::Result<Json<PaymentFailure>, JsonRejection>,
) -> Result<Json<AckResponse>> {
    let Json(report) = body?;

    tracing::warn!(
        user_id = %claims.user_id,
        error_code = report.error_code.as_deref().unwrap_or("unknown"),
        error_description = report.error_description.as_deref().unwrap_or(""),
        order_id = report.order_id.as_deref().unwrap_or(""),
        payment_id = report.payment_id.as_deref().unwrap_or(""),
        "Payment failed at checkout"
    );

    Ok(Json(AckResponse {
        success: true,
        msg: "Payment failure recorded",
    }))
}
