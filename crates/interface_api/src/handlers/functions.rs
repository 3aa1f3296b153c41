//! Callable-function handlers
//!
//! These two endpoints replace the original serverless functions and keep
//! their observable contract: `invalid_argument` for missing fields,
//! `unauthenticated` for a signature mismatch, and a generic internal error
//! when the server-side secret is unconfigured.

use axum::{extract::State, Json};

use domain_payment::{verify_signature, PaymentError};

use crate::dto::functions::{
    CheckPhoneRequest, CheckPhoneResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Checks whether a phone number is registered with the identity directory
pub async fn check_phone(
    State(state): State<AppState>,
    Json(request): Json<CheckPhoneRequest>,
) -> Result<Json<CheckPhoneResponse>, ApiError> {
    let phone = request.phone.as_deref().unwrap_or("").trim().to_string();
    if phone.is_empty() {
        return Err(ApiError::InvalidArgument("phone is required".to_string()));
    }

    let exists = state.directory.phone_exists(&phone).await.map_err(|err| {
        tracing::error!(error = %err, "phone directory lookup failed");
        ApiError::from(err)
    })?;

    Ok(Json(CheckPhoneResponse { exists }))
}

/// Verifies a gateway callback signature and marks the order's service
/// request paid
///
/// An invalid signature mutates nothing. A valid signature for an order with
/// no matching service request is still a successful verification; the
/// orphan is logged for the operators.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let (Some(order_id), Some(payment_id), Some(signature)) = (
        non_empty(request.razorpay_order_id),
        non_empty(request.razorpay_payment_id),
        non_empty(request.razorpay_signature),
    ) else {
        return Err(ApiError::InvalidArgument(
            "razorpay_order_id, razorpay_payment_id, and razorpay_signature are required"
                .to_string(),
        ));
    };

    let valid = verify_signature(
        &order_id,
        &payment_id,
        &signature,
        &state.config.razorpay_key_secret,
    )
    .map_err(|err| match err {
        PaymentError::MissingSecret => {
            tracing::error!("gateway secret is not configured");
            ApiError::Internal(err.to_string())
        }
        other => ApiError::from(other),
    })?;

    if !valid {
        tracing::warn!(%order_id, %payment_id, "gateway signature mismatch");
        return Err(ApiError::Unauthenticated(
            "payment verification failed".to_string(),
        ));
    }

    let matched = state
        .service_requests
        .mark_paid_by_order(&order_id, &payment_id)
        .await?;
    if !matched {
        tracing::warn!(%order_id, "verified payment has no matching service request");
    }

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
