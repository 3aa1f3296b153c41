//! Operator refund flow
//!
//! The UI shows eligibility and remaining amounts for operator convenience,
//! but those checks run in an untrusted context. Everything is re-validated
//! here before a refund is created.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use core_kernel::PaymentRecordId;
use domain_payment::PaymentRecord;

use crate::eligibility::{is_refund_eligible, remaining_refundable};
use crate::error::RefundError;
use crate::refund::RefundRecord;

/// Persistence for refunds and the payments they reference
#[async_trait]
pub trait RefundStore: Send + Sync {
    async fn payment(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Option<PaymentRecord>, RefundError>;

    async fn refunds_for(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<Vec<RefundRecord>, RefundError>;

    async fn insert(&self, refund: &RefundRecord) -> Result<(), RefundError>;
}

/// A payment's refund position as shown to an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPosition {
    pub eligible: bool,
    pub remaining: i64,
}

/// Validates and creates refunds
pub struct RefundService {
    store: Arc<dyn RefundStore>,
}

impl RefundService {
    pub fn new(store: Arc<dyn RefundStore>) -> Self {
        Self { store }
    }

    /// Returns a payment's current refund position
    pub async fn position(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<RefundPosition, RefundError> {
        let payment = self.require_payment(payment_id).await?;
        let history = self.store.refunds_for(payment_id).await?;

        Ok(RefundPosition {
            eligible: is_refund_eligible(Some(payment.created_at), Utc::now()),
            remaining: remaining_refundable(payment.amount, &history),
        })
    }

    /// Creates a pending refund after re-validating amount and eligibility
    pub async fn process_refund(
        &self,
        payment_id: PaymentRecordId,
        requested_amount: i64,
        reason: &str,
    ) -> Result<RefundRecord, RefundError> {
        if requested_amount <= 0 {
            return Err(RefundError::Validation(format!(
                "refund amount must be positive, got {requested_amount}"
            )));
        }
        if reason.is_empty() {
            return Err(RefundError::Validation(
                "refund reason is required".to_string(),
            ));
        }

        let payment = self.require_payment(payment_id).await?;
        if !is_refund_eligible(Some(payment.created_at), Utc::now()) {
            return Err(RefundError::NotEligible);
        }

        let history = self.store.refunds_for(payment_id).await?;
        let remaining = remaining_refundable(payment.amount, &history);
        if requested_amount > remaining {
            return Err(RefundError::ExceedsRemaining {
                requested: requested_amount,
                remaining,
            });
        }

        let refund = RefundRecord::new(payment_id, requested_amount, reason.to_string());
        self.store.insert(&refund).await?;
        tracing::info!(
            refund = %refund.id,
            payment = %payment_id,
            amount = requested_amount,
            "refund created"
        );
        Ok(refund)
    }

    async fn require_payment(
        &self,
        payment_id: PaymentRecordId,
    ) -> Result<PaymentRecord, RefundError> {
        self.store
            .payment(payment_id)
            .await?
            .ok_or_else(|| RefundError::PaymentNotFound(payment_id.to_string()))
    }
}
