//! Refund eligibility and remaining-amount math

use chrono::{DateTime, Duration, Utc};

use crate::refund::RefundRecord;

/// Refunds may be initiated within this many days of payment
pub const REFUND_WINDOW_DAYS: i64 = 7;

/// Whether a payment made at `paid_at` is still refund-eligible at `now`
///
/// The boundary is inclusive: a payment exactly seven days old is still
/// eligible. A payment with no timestamp is never eligible.
pub fn is_refund_eligible(paid_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match paid_at {
        Some(paid_at) => now - paid_at <= Duration::days(REFUND_WINDOW_DAYS),
        None => false,
    }
}

/// The amount still refundable on a payment given its refund history
///
/// Pending and processed refunds both count against the remaining amount;
/// failed refunds release theirs. Never negative, and a missing or
/// zero payment amount leaves nothing to refund.
pub fn remaining_refundable(payment_amount: i64, history: &[RefundRecord]) -> i64 {
    if payment_amount <= 0 {
        return 0;
    }
    let refunded: i64 = history
        .iter()
        .filter(|r| r.counts_against_remaining())
        .map(|r| r.refund_amount)
        .sum();
    (payment_amount - refunded).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refund::RefundStatus;
    use core_kernel::PaymentRecordId;

    fn refund(amount: i64, status: RefundStatus) -> RefundRecord {
        let mut record = RefundRecord::new(PaymentRecordId::new(), amount, "test".into());
        match status {
            RefundStatus::Pending => {}
            RefundStatus::Processed => record.mark_processed(),
            RefundStatus::Failed => record.mark_failed(),
        }
        record
    }

    #[test]
    fn test_exactly_seven_days_is_eligible() {
        let now = Utc::now();
        assert!(is_refund_eligible(Some(now - Duration::days(7)), now));
    }

    #[test]
    fn test_one_second_past_seven_days_is_not() {
        let now = Utc::now();
        let paid_at = now - Duration::days(7) - Duration::seconds(1);
        assert!(!is_refund_eligible(Some(paid_at), now));
    }

    #[test]
    fn test_fresh_payment_is_eligible() {
        let now = Utc::now();
        assert!(is_refund_eligible(Some(now), now));
    }

    #[test]
    fn test_missing_timestamp_is_not_eligible() {
        assert!(!is_refund_eligible(None, Utc::now()));
    }

    #[test]
    fn test_remaining_after_partial_refund() {
        let history = vec![refund(300, RefundStatus::Processed)];
        assert_eq!(remaining_refundable(1000, &history), 700);
    }

    #[test]
    fn test_remaining_never_negative() {
        let history = vec![
            refund(800, RefundStatus::Processed),
            refund(300, RefundStatus::Processed),
        ];
        assert_eq!(remaining_refundable(1000, &history), 0);
    }

    #[test]
    fn test_pending_refund_reserves_amount() {
        let history = vec![refund(400, RefundStatus::Pending)];
        assert_eq!(remaining_refundable(1000, &history), 600);
    }

    #[test]
    fn test_failed_refund_releases_amount() {
        let history = vec![
            refund(400, RefundStatus::Failed),
            refund(100, RefundStatus::Processed),
        ];
        assert_eq!(remaining_refundable(1000, &history), 900);
    }

    #[test]
    fn test_zero_payment_amount_has_nothing_refundable() {
        assert_eq!(remaining_refundable(0, &[]), 0);
        assert_eq!(remaining_refundable(-50, &[]), 0);
    }
}
