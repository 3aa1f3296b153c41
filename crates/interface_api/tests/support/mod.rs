//! Test support: in-memory fakes behind the domain ports

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use core_kernel::{DirectoryError, PaymentRecordId, PhoneDirectory};
use domain_payment::{
    PaymentError, PaymentRecord, PaymentService, PaymentStore, ServiceRequestStore,
};
use domain_pricing::{PlanKey, PlanSource, PricingCatalog, PricingError, PricingPlan};
use domain_referral::{
    CommissionService, CommissionStore, Partner, PartnerCommission, PartnerDirectory,
    ReferralError,
};
use domain_refund::{RefundError, RefundRecord, RefundService, RefundStore};
use interface_api::{config::ApiConfig, create_router, AppState};

pub struct UnavailablePlanSource;

#[async_trait]
impl PlanSource for UnavailablePlanSource {
    async fn fetch_plans(&self) -> Result<HashMap<PlanKey, PricingPlan>, PricingError> {
        Err(PricingError::SourceUnavailable("no remote config".into()))
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub phones: HashSet<String>,
}

#[async_trait]
impl PhoneDirectory for FakeDirectory {
    async fn phone_exists(&self, phone: &str) -> Result<bool, DirectoryError> {
        Ok(self.phones.contains(phone))
    }
}

#[derive(Default)]
pub struct FakeServiceRequests {
    pub known_orders: HashSet<String>,
    pub paid: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ServiceRequestStore for FakeServiceRequests {
    async fn mark_paid_by_order(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<bool, PaymentError> {
        let matched = self.known_orders.contains(order_id);
        if matched {
            self.paid
                .lock()
                .unwrap()
                .push((order_id.to_string(), gateway_payment_id.to_string()));
        }
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryPaymentStore {
    pub records: Mutex<Vec<PaymentRecord>>,
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert_records(&self, records: &[PaymentRecord]) -> Result<(), PaymentError> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefundStore {
    pub payments: Mutex<Vec<PaymentRecord>>,
    pub refunds: Mutex<Vec<RefundRecord>>,
}

#[async_trait]
impl RefundStore for InMemoryRefundStore {
    async fn payment(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Option<PaymentRecord>, RefundError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == payment_id)
            .cloned())
    }

    async fn refunds_for(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Vec<RefundRecord>, RefundError> {
        Ok(self
            .refunds
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.payment_id == payment_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, refund: &RefundRecord) -> Result<(), RefundError> {
        self.refunds.lock().unwrap().push(refund.clone());
        Ok(())
    }
}

pub struct NoPartners;

#[async_trait]
impl PartnerDirectory for NoPartners {
    async fn find_by_referral_code(&self, _code: &str) -> Result<Option<Partner>, ReferralError> {
        Ok(None)
    }
}

#[async_trait]
impl CommissionStore for NoPartners {
    async fn find(
        &self,
        _partner_id: core_kernel::PartnerId,
        _service_request_id: core_kernel::ServiceRequestId,
    ) -> Result<Option<PartnerCommission>, ReferralError> {
        Ok(None)
    }

    async fn insert_if_absent(
        &self,
        _commission: &PartnerCommission,
    ) -> Result<bool, ReferralError> {
        Ok(true)
    }
}

pub struct Harness {
    pub server: axum_test::TestServer,
    pub payment_store: Arc<InMemoryPaymentStore>,
    pub refund_store: Arc<InMemoryRefundStore>,
    pub service_requests: Arc<FakeServiceRequests>,
}

pub struct HarnessConfig {
    pub secret: String,
    pub phones: HashSet<String>,
    pub known_orders: HashSet<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            secret: "s3cr3t".to_string(),
            phones: HashSet::new(),
            known_orders: HashSet::new(),
        }
    }
}

pub fn harness(config: HarnessConfig) -> Harness {
    // Lazy pool: never connected by the handlers under test
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/consult_test")
        .expect("lazy pool");

    let catalog = Arc::new(PricingCatalog::new(Arc::new(UnavailablePlanSource)));
    let no_partners = Arc::new(NoPartners);
    let commissions = Arc::new(CommissionService::new(no_partners.clone(), no_partners));
    let payment_store = Arc::new(InMemoryPaymentStore::default());
    let payments = Arc::new(PaymentService::new(
        catalog.clone(),
        payment_store.clone(),
        commissions,
    ));
    let refund_store = Arc::new(InMemoryRefundStore::default());
    let refunds = Arc::new(RefundService::new(refund_store.clone()));
    let service_requests = Arc::new(FakeServiceRequests {
        known_orders: config.known_orders,
        paid: Mutex::new(Vec::new()),
    });

    let state = AppState {
        pool,
        config: ApiConfig {
            razorpay_key_secret: config.secret,
            ..ApiConfig::default()
        },
        catalog,
        payments,
        refunds,
        directory: Arc::new(FakeDirectory {
            phones: config.phones,
        }),
        service_requests: service_requests.clone(),
    };

    Harness {
        server: axum_test::TestServer::new(create_router(state)).expect("test server"),
        payment_store,
        refund_store,
        service_requests,
    }
}
