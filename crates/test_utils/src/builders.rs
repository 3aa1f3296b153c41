//! Fixture builders

use chrono::{DateTime, Utc};

use core_kernel::{AstrologerId, ClientId, Currency, ServiceRequestId};
use domain_payment::{GatewayResponse, PaymentRecord};
use domain_pricing::PlanKey;

/// A plausible real gateway confirmation
pub fn gateway_response() -> GatewayResponse {
    GatewayResponse {
        payment_id: "pay_N9qR3oZb".to_string(),
        order_id: Some("order_N9qKcX2f".to_string()),
        signature: Some("ab12cd34".to_string()),
    }
}

/// A demo-path confirmation (no gateway interaction)
pub fn demo_gateway_response() -> GatewayResponse {
    GatewayResponse {
        payment_id: "demo_1700000000".to_string(),
        order_id: None,
        signature: None,
    }
}

/// Builder for payment records with sensible defaults
pub struct PaymentRecordFixture {
    base_amount: i64,
    gst_amount: i64,
    plan_key: Option<PlanKey>,
    created_at: Option<DateTime<Utc>>,
    gateway: GatewayResponse,
    service_request_id: ServiceRequestId,
}

impl Default for PaymentRecordFixture {
    fn default() -> Self {
        Self {
            base_amount: 1000,
            gst_amount: 180,
            plan_key: Some(PlanKey::Pothigai),
            created_at: None,
            gateway: gateway_response(),
            service_request_id: ServiceRequestId::new(),
        }
    }
}

impl PaymentRecordFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amounts(mut self, base: i64, gst: i64) -> Self {
        self.base_amount = base;
        self.gst_amount = gst;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayResponse) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_service_request(mut self, id: ServiceRequestId) -> Self {
        self.service_request_id = id;
        self
    }

    pub fn build(self) -> PaymentRecord {
        let mut record = PaymentRecord::new(
            AstrologerId::new(),
            ClientId::new(),
            "consultation".to_string(),
            self.plan_key,
            self.base_amount,
            self.gst_amount,
            Currency::INR,
            &self.gateway,
            self.service_request_id,
            None,
        )
        .expect("valid fixture record");
        if let Some(created_at) = self.created_at {
            record.created_at = created_at;
        }
        record
    }
}
