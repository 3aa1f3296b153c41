//! Payment record creation flow
//!
//! Triggered when a client's checkout succeeds: resolve the plan, apportion
//! its amounts over the recipients in caller order, persist one record per
//! recipient as a single atomic batch, then record partner commissions
//! best-effort.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{AstrologerId, ClientId, Currency, Rate, ServiceRequestId};
use domain_pricing::{PlanKey, PricingCatalog};
use domain_referral::CommissionService;

use crate::apportion::{apportion, Share};
use crate::error::PaymentError;
use crate::record::{GatewayResponse, PaymentRecord};

/// A recipient of a payment split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipient {
    pub id: AstrologerId,
    /// The recipient's own service price, used only when no plan is involved
    pub service_price: Option<i64>,
}

/// Persistence for payment records
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Persists the whole record set atomically
    ///
    /// Either every recipient's record is written or none are; a partial set
    /// must never exist.
    async fn insert_records(&self, records: &[PaymentRecord]) -> Result<(), PaymentError>;
}

/// Transition of a service request to paid after signature verification
#[async_trait]
pub trait ServiceRequestStore: Send + Sync {
    /// Marks the service request holding this gateway order as paid;
    /// returns whether a request matched
    async fn mark_paid_by_order(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<bool, PaymentError>;
}

/// GST applied to per-astrologer service pricing when no plan is involved
fn service_gst_rate() -> Rate {
    Rate::from_percentage(dec!(18))
}

/// Creates payment records when a checkout succeeds
pub struct PaymentService {
    catalog: Arc<PricingCatalog>,
    store: Arc<dyn PaymentStore>,
    commissions: Arc<CommissionService>,
}

impl PaymentService {
    pub fn new(
        catalog: Arc<PricingCatalog>,
        store: Arc<dyn PaymentStore>,
        commissions: Arc<CommissionService>,
    ) -> Self {
        Self {
            catalog,
            store,
            commissions,
        }
    }

    /// Creates one payment record per recipient for a confirmed payment
    ///
    /// With a plan, the plan's amounts are apportioned across the recipients
    /// in the given order. Without one, each recipient is charged their own
    /// service price plus GST. Records are persisted in one atomic batch;
    /// commission recording runs afterwards and never fails the flow.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_payment_records(
        &self,
        recipients: &[Recipient],
        payer: ClientId,
        service_type: &str,
        plan_key: Option<PlanKey>,
        currency: Currency,
        gateway: &GatewayResponse,
        service_request_id: ServiceRequestId,
        referral_code: Option<&str>,
    ) -> Result<Vec<PaymentRecord>, PaymentError> {
        if service_type.is_empty() {
            return Err(PaymentError::Validation(
                "service type is required".to_string(),
            ));
        }
        if gateway.payment_id.is_empty() {
            return Err(PaymentError::Validation(
                "gateway payment id is required".to_string(),
            ));
        }

        let shares = self
            .recipient_shares(recipients, plan_key)
            .await?;

        let records = recipients
            .iter()
            .zip(&shares)
            .map(|(recipient, share)| {
                PaymentRecord::new(
                    recipient.id,
                    payer,
                    service_type.to_string(),
                    plan_key,
                    share.base,
                    share.gst,
                    currency,
                    gateway,
                    service_request_id,
                    referral_code.map(str::to_string),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.store.insert_records(&records).await?;
        tracing::info!(
            service_request = %service_request_id,
            records = records.len(),
            demo = gateway.is_demo(),
            "payment records created"
        );

        if let Some(code) = referral_code {
            self.record_commissions(code, &records).await;
        }

        Ok(records)
    }

    /// Computes per-recipient shares from the plan or legacy pricing
    ///
    /// Apportionment runs over at least one share even with no recipients,
    /// so an empty list can never divide by zero.
    async fn recipient_shares(
        &self,
        recipients: &[Recipient],
        plan_key: Option<PlanKey>,
    ) -> Result<Vec<Share>, PaymentError> {
        match plan_key {
            Some(key) => {
                let plan = self.catalog.plan(key).await;
                apportion(plan.base_price, plan.gst, recipients.len().max(1))
            }
            None => recipients
                .iter()
                .map(|recipient| {
                    let base = recipient.service_price.ok_or_else(|| {
                        PaymentError::Validation(format!(
                            "recipient {} has no service price and no plan was given",
                            recipient.id
                        ))
                    })?;
                    if base < 0 {
                        return Err(PaymentError::Validation(format!(
                            "service price must be non-negative, got {base}"
                        )));
                    }
                    let gst = service_gst_rate().apply_to_units(base)?;
                    Ok(Share {
                        base,
                        gst,
                        total: base + gst,
                    })
                })
                .collect(),
        }
    }

    /// Records a commission per recipient on that recipient's apportioned
    /// base; failures are logged and swallowed
    async fn record_commissions(&self, referral_code: &str, records: &[PaymentRecord]) {
        for record in records {
            if let Err(err) = self
                .commissions
                .record_commission(referral_code, record.service_request_id, record.base_amount)
                .await
            {
                tracing::warn!(
                    error = %err,
                    referral_code,
                    payment = %record.id,
                    "partner commission failed; payment flow continues"
                );
            }
        }
    }
}
