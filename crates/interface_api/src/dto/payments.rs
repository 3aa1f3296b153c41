//! DTOs for payment confirmation and refunds

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_payment::PaymentRecord;

#[derive(Debug, Deserialize)]
pub struct RecipientDto {
    pub recipient_id: Uuid,
    /// Per-recipient service price, required when no plan key is given
    pub service_price: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GatewayResponseDto {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub recipients: Vec<RecipientDto>,
    pub payer_id: Uuid,
    pub service_type: String,
    pub pricing_category: Option<String>,
    pub currency: Option<String>,
    pub gateway: GatewayResponseDto,
    pub service_request_id: Uuid,
    pub referral_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentRecordDto {
    pub id: String,
    pub recipient_id: String,
    pub base_amount: i64,
    pub gst_amount: i64,
    pub amount: i64,
    pub currency: String,
    pub is_demo_payment: bool,
}

impl From<&PaymentRecord> for PaymentRecordDto {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            recipient_id: record.recipient_id.to_string(),
            base_amount: record.base_amount,
            gst_amount: record.gst_amount,
            amount: record.amount,
            currency: record.currency.code().to_string(),
            is_demo_payment: record.is_demo_payment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmPaymentResponse {
    pub records: Vec<PaymentRecordDto>,
    pub total_amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub amount: i64,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RefundResponse {
    pub refund_id: String,
    pub status: String,
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct RefundPositionResponse {
    pub eligible: bool,
    pub remaining: i64,
}
