//! DTOs for the callable-function endpoints
//!
//! Field names follow the original callable surface; stored clients send
//! these exact shapes. Presence checks happen in the handlers so a missing
//! field maps to `invalid_argument`, not a deserialization failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CheckPhoneRequest {
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckPhoneResponse {
    pub exists: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
}
