//! Idempotent commission recording

use async_trait::async_trait;
use std::sync::Arc;

use core_kernel::{PartnerId, ServiceRequestId};

use crate::commission::{Partner, PartnerCommission};
use crate::error::ReferralError;

/// Lookup of partners by referral code
#[async_trait]
pub trait PartnerDirectory: Send + Sync {
    async fn find_by_referral_code(&self, code: &str) -> Result<Option<Partner>, ReferralError>;
}

/// Persistence for partner commissions
#[async_trait]
pub trait CommissionStore: Send + Sync {
    async fn find(
        &self,
        partner_id: PartnerId,
        service_request_id: ServiceRequestId,
    ) -> Result<Option<PartnerCommission>, ReferralError>;

    /// Inserts the commission unless one already exists for the same
    /// (partner, service request); returns whether a row was written.
    ///
    /// Implementations must enforce the pair uniqueness themselves (a
    /// constraint, not a read-then-write), so two concurrent callers can
    /// never both insert.
    async fn insert_if_absent(
        &self,
        commission: &PartnerCommission,
    ) -> Result<bool, ReferralError>;
}

/// Records commissions for referred payments
pub struct CommissionService {
    directory: Arc<dyn PartnerDirectory>,
    store: Arc<dyn CommissionStore>,
}

impl CommissionService {
    pub fn new(directory: Arc<dyn PartnerDirectory>, store: Arc<dyn CommissionStore>) -> Self {
        Self { directory, store }
    }

    /// Records a commission for a referral code against a service request
    ///
    /// Returns `Ok(None)` when no commission was written: unknown code, or
    /// one already exists for this (partner, service request).
    pub async fn record_commission(
        &self,
        referral_code: &str,
        service_request_id: ServiceRequestId,
        base: i64,
    ) -> Result<Option<PartnerCommission>, ReferralError> {
        if referral_code.is_empty() {
            return Err(ReferralError::Validation(
                "referral code must not be empty".to_string(),
            ));
        }

        let Some(partner) = self.directory.find_by_referral_code(referral_code).await? else {
            tracing::debug!(referral_code, "no partner for referral code");
            return Ok(None);
        };

        if let Some(existing) = self.store.find(partner.id, service_request_id).await? {
            tracing::debug!(
                commission = %existing.id,
                "commission already recorded for this service request"
            );
            return Ok(None);
        }

        let commission = PartnerCommission::from_terms(&partner, service_request_id, base)?;
        if !self.store.insert_if_absent(&commission).await? {
            // Lost a race to a concurrent insert; the earlier row wins
            return Ok(None);
        }

        tracing::info!(
            commission = %commission.id,
            partner = %commission.partner_id,
            amount = commission.calculated_amount,
            "partner commission recorded"
        );
        Ok(Some(commission))
    }
}
