//! Handler-level tests for the HTTP surface
//!
//! These run against the real router with in-memory fakes behind the domain
//! ports; no database is touched.

mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use domain_payment::sign_payload;
use support::{harness, HarnessConfig};
use test_utils::PaymentRecordFixture;

// ---------------------------------------------------------------------------
// check-phone
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_check_phone_requires_phone() {
    let h = harness(HarnessConfig::default());

    let response = h
        .server
        .post("/api/v1/functions/check-phone")
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn test_check_phone_registered() {
    let mut config = HarnessConfig::default();
    config.phones.insert("+919876543210".to_string());
    let h = harness(config);

    let response = h
        .server
        .post("/api/v1/functions/check-phone")
        .json(&json!({"phone": "+919876543210"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["exists"], json!(true));
}

#[tokio::test]
async fn test_check_phone_unregistered_is_not_an_error() {
    let h = harness(HarnessConfig::default());

    let response = h
        .server
        .post("/api/v1/functions/check-phone")
        .json(&json!({"phone": "+910000000000"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["exists"], json!(false));
}

// ---------------------------------------------------------------------------
// verify-payment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_verify_payment_requires_all_fields() {
    let h = harness(HarnessConfig::default());

    let response = h
        .server
        .post("/api/v1/functions/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn test_verify_payment_rejects_bad_signature() {
    let mut config = HarnessConfig::default();
    config.known_orders.insert("order_1".to_string());
    let h = harness(config);

    let response = h
        .server
        .post("/api/v1/functions/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "deadbeef"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "unauthenticated");
    assert_eq!(body["message"], "payment verification failed");
    // An invalid signature must not mutate anything
    assert!(h.service_requests.paid.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_payment_accepts_valid_signature_and_marks_paid() {
    let mut config = HarnessConfig::default();
    config.known_orders.insert("order_1".to_string());
    let h = harness(config);
    let signature = sign_payload("s3cr3t", "order_1", "pay_1");

    let response = h
        .server
        .post("/api/v1/functions/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": signature
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));

    let paid = h.service_requests.paid.lock().unwrap();
    assert_eq!(*paid, vec![("order_1".to_string(), "pay_1".to_string())]);
}

#[tokio::test]
async fn test_verify_payment_without_secret_is_internal_error() {
    let h = harness(HarnessConfig {
        secret: String::new(),
        ..HarnessConfig::default()
    });

    let response = h
        .server
        .post("/api/v1/functions/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "deadbeef"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "internal_error");
    // No configuration detail leaks to the client
    assert_eq!(body["message"], "internal error");
}

// ---------------------------------------------------------------------------
// payment confirmation
// ---------------------------------------------------------------------------

fn confirm_request(recipients: usize) -> Value {
    let recipients: Vec<Value> = (0..recipients)
        .map(|_| json!({"recipient_id": Uuid::new_v4()}))
        .collect();
    json!({
        "recipients": recipients,
        "payer_id": Uuid::new_v4(),
        "service_type": "consultation",
        "pricing_category": "pothigai",
        "gateway": {
            "payment_id": "pay_N9qR3oZb",
            "order_id": "order_N9qKcX2f",
            "signature": "ab12cd34"
        },
        "service_request_id": Uuid::new_v4()
    })
}

#[tokio::test]
async fn test_confirm_payment_splits_plan_across_recipients() {
    let h = harness(HarnessConfig::default());

    let response = h
        .server
        .post("/api/v1/payments/confirm")
        .json(&confirm_request(2))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    // Fallback pothigai plan: 1000 base + 180 GST
    assert_eq!(body["total_amount"], json!(1180));
    assert_eq!(body["records"].as_array().unwrap().len(), 2);
    assert_eq!(body["records"][0]["amount"], json!(590));
    assert_eq!(h.payment_store.records.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_confirm_payment_rejects_unknown_plan() {
    let h = harness(HarnessConfig::default());
    let mut request = confirm_request(1);
    request["pricing_category"] = json!("everest");

    let response = h
        .server
        .post("/api/v1/payments/confirm")
        .json(&request)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// refunds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_refund_position_for_fresh_payment() {
    let h = harness(HarnessConfig::default());
    let payment = PaymentRecordFixture::new().build();
    let payment_id = *payment.id.as_uuid();
    h.refund_store.payments.lock().unwrap().push(payment);

    let response = h
        .server
        .get(&format!("/api/v1/payments/{payment_id}/refundable"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["eligible"], json!(true));
    assert_eq!(body["remaining"], json!(1180));
}

#[tokio::test]
async fn test_create_refund_within_remaining() {
    let h = harness(HarnessConfig::default());
    let payment = PaymentRecordFixture::new().build();
    let payment_id = *payment.id.as_uuid();
    h.refund_store.payments.lock().unwrap().push(payment);

    let response = h
        .server
        .post(&format!("/api/v1/payments/{payment_id}/refunds"))
        .json(&json!({"amount": 300, "reason": "session cancelled"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["amount"], json!(300));
    assert_eq!(body["status"], "pending");
    assert_eq!(h.refund_store.refunds.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_refund_exceeding_remaining_is_rejected() {
    let h = harness(HarnessConfig::default());
    let payment = PaymentRecordFixture::new().build();
    let payment_id = *payment.id.as_uuid();
    h.refund_store.payments.lock().unwrap().push(payment);

    let response = h
        .server
        .post(&format!("/api/v1/payments/{payment_id}/refunds"))
        .json(&json!({"amount": 2000, "reason": "too much"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(h.refund_store.refunds.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// plans
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_known_plan() {
    let h = harness(HarnessConfig::default());

    let response = h.server.get("/api/v1/plans/pothigai").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_price"], json!(1180));
}

#[tokio::test]
async fn test_get_unknown_plan_is_404() {
    let h = harness(HarnessConfig::default());

    let response = h.server.get("/api/v1/plans/everest").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_plans_returns_all_tiers() {
    let h = harness(HarnessConfig::default());

    let response = h.server.get("/api/v1/plans").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
}
