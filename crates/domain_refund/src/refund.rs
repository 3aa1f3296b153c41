//! Refund records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{PaymentRecordId, RefundId};

/// Processing state of a refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    /// Created, gateway refund not yet settled
    Pending,
    /// Settled by the gateway; immutable from here on
    Processed,
    /// Rejected by the gateway; releases its reserved amount
    Failed,
}

/// A refund against a payment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRecord {
    pub id: RefundId,
    pub payment_id: PaymentRecordId,
    /// Positive, and at creation time no larger than the payment's
    /// remaining refundable amount
    pub refund_amount: i64,
    pub reason: String,
    pub status: RefundStatus,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefundRecord {
    /// Creates a pending refund
    pub fn new(payment_id: PaymentRecordId, refund_amount: i64, reason: String) -> Self {
        Self {
            id: RefundId::new(),
            payment_id,
            refund_amount,
            reason,
            status: RefundStatus::Pending,
            processed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Marks the refund as settled
    pub fn mark_processed(&mut self) {
        self.status = RefundStatus::Processed;
        self.processed_at = Some(Utc::now());
    }

    /// Marks the refund as rejected
    pub fn mark_failed(&mut self) {
        self.status = RefundStatus::Failed;
        self.processed_at = Some(Utc::now());
    }

    /// Whether this refund holds part of the payment's refundable amount
    pub fn counts_against_remaining(&self) -> bool {
        !matches!(self.status, RefundStatus::Failed)
    }
}
