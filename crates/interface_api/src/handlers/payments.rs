//! Payment confirmation and refund handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::{ClientId, Currency, PaymentRecordId, ServiceRequestId};
use domain_payment::{GatewayResponse, Recipient};
use domain_pricing::PlanKey;

use crate::dto::payments::{
    ConfirmPaymentRequest, ConfirmPaymentResponse, PaymentRecordDto, RefundPositionResponse,
    RefundRequest, RefundResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates payment records after a successful checkout
pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<Json<ConfirmPaymentResponse>, ApiError> {
    let plan_key = request
        .pricing_category
        .as_deref()
        .map(str::parse::<PlanKey>)
        .transpose()
        .map_err(|err| ApiError::InvalidArgument(err.to_string()))?;
    let currency = request
        .currency
        .as_deref()
        .map(str::parse::<Currency>)
        .transpose()
        .map_err(|err| ApiError::InvalidArgument(err.to_string()))?
        .unwrap_or_default();

    let recipients: Vec<Recipient> = request
        .recipients
        .iter()
        .map(|r| Recipient {
            id: r.recipient_id.into(),
            service_price: r.service_price,
        })
        .collect();
    let gateway = GatewayResponse {
        payment_id: request.gateway.payment_id,
        order_id: request.gateway.order_id,
        signature: request.gateway.signature,
    };

    let records = state
        .payments
        .create_payment_records(
            &recipients,
            ClientId::from(request.payer_id),
            &request.service_type,
            plan_key,
            currency,
            &gateway,
            ServiceRequestId::from(request.service_request_id),
            request.referral_code.as_deref(),
        )
        .await?;

    let total_amount = records.iter().map(|r| r.amount).sum();
    Ok(Json(ConfirmPaymentResponse {
        records: records.iter().map(PaymentRecordDto::from).collect(),
        total_amount,
    }))
}

/// Creates a refund against a payment after server-side re-validation
pub async fn create_refund(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(request): Json<RefundRequest>,
) -> Result<Json<RefundResponse>, ApiError> {
    let refund = state
        .refunds
        .process_refund(
            PaymentRecordId::from(payment_id),
            request.amount,
            &request.reason,
        )
        .await?;

    Ok(Json(RefundResponse {
        refund_id: refund.id.to_string(),
        status: "pending".to_string(),
        amount: refund.refund_amount,
    }))
}

/// Reports a payment's refund eligibility and remaining amount
pub async fn refund_position(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<RefundPositionResponse>, ApiError> {
    let position = state
        .refunds
        .position(PaymentRecordId::from(payment_id))
        .await?;

    Ok(Json(RefundPositionResponse {
        eligible: position.eligible,
        remaining: position.remaining,
    }))
}
