//! Payment records
//!
//! One record per (service request, recipient). Demo payments never carry
//! gateway order/signature fields - their absence is modelled with
//! `Option<GatewayReference>` so a stored demo record cannot imply a gateway
//! interaction that never happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AstrologerId, ClientId, Currency, PaymentRecordId, ServiceRequestId};
use domain_pricing::PlanKey;

use crate::error::PaymentError;

/// Payment ids with this prefix mark the zero-cost demo path that bypasses
/// the real gateway
pub const DEMO_PAYMENT_PREFIX: &str = "demo_";

/// Gateway order and signature for a real (non-demo) payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReference {
    #[serde(rename = "gateway_order_id")]
    pub order_id: String,
    #[serde(rename = "gateway_signature")]
    pub signature: String,
}

/// The gateway's checkout confirmation as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
}

impl GatewayResponse {
    /// Whether this confirmation came from the demo path
    pub fn is_demo(&self) -> bool {
        self.payment_id.starts_with(DEMO_PAYMENT_PREFIX)
    }
}

/// A persisted payment record
///
/// Created once at payment-confirmation time and never mutated; refunds
/// supersede rather than update it. The `amount` is always the exact sum of
/// `base_amount` and `gst_amount`, and across all records of one service
/// request the amounts sum to the plan totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    pub recipient_id: AstrologerId,
    pub payer_id: ClientId,
    pub service_type: String,
    pub pricing_category: Option<PlanKey>,
    pub base_amount: i64,
    pub gst_amount: i64,
    pub amount: i64,
    pub currency: Currency,
    pub gateway_payment_id: String,
    /// Absent for demo payments; serialization omits the fields entirely
    #[serde(flatten)]
    pub gateway: Option<GatewayReference>,
    pub service_request_id: ServiceRequestId,
    pub is_demo_payment: bool,
    pub partner_referral_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Builds a record for one recipient from apportioned amounts and the
    /// gateway confirmation
    ///
    /// Demo confirmations produce a record with no gateway reference even if
    /// order/signature fields were supplied. Real confirmations must carry
    /// both fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        recipient_id: AstrologerId,
        payer_id: ClientId,
        service_type: String,
        pricing_category: Option<PlanKey>,
        base_amount: i64,
        gst_amount: i64,
        currency: Currency,
        gateway_response: &GatewayResponse,
        service_request_id: ServiceRequestId,
        partner_referral_code: Option<String>,
    ) -> Result<Self, PaymentError> {
        let is_demo = gateway_response.is_demo();
        let gateway = if is_demo {
            None
        } else {
            match (&gateway_response.order_id, &gateway_response.signature) {
                (Some(order_id), Some(signature)) => Some(GatewayReference {
                    order_id: order_id.clone(),
                    signature: signature.clone(),
                }),
                _ => {
                    return Err(PaymentError::Validation(
                        "gateway payment is missing order id or signature".to_string(),
                    ))
                }
            }
        };

        Ok(Self {
            id: PaymentRecordId::new(),
            recipient_id,
            payer_id,
            service_type,
            pricing_category,
            base_amount,
            gst_amount,
            amount: base_amount + gst_amount,
            currency,
            gateway_payment_id: gateway_response.payment_id.clone(),
            gateway,
            service_request_id,
            is_demo_payment: is_demo,
            partner_referral_code,
            created_at: Utc::now(),
        })
    }
}
