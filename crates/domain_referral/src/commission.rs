//! Partner commission computation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CommissionId, PartnerId, Rate, ServiceRequestId};

use crate::error::ReferralError;

/// How a partner's commission is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionMode {
    /// Percentage of the apportioned base amount
    Percent,
    /// Flat amount per service request
    Fixed,
    /// Whichever of the two is larger - a guaranteed minimum, never a sum
    Both,
}

/// Payout status of a recorded commission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Paid,
}

/// A referring partner's commission terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub referral_code: String,
    pub mode: CommissionMode,
    /// Commission percentage (e.g. 10 for 10%)
    pub percent: Decimal,
    /// Flat commission in whole currency units
    pub fixed_amount: i64,
}

/// A recorded commission owed to a partner
///
/// The partner's terms are snapshotted at creation so a later change to the
/// partner record cannot alter an already-earned payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerCommission {
    pub id: CommissionId,
    pub partner_id: PartnerId,
    pub referral_code: String,
    pub service_request_id: ServiceRequestId,
    pub calculated_amount: i64,
    pub mode_snapshot: CommissionMode,
    pub percent_snapshot: Decimal,
    pub fixed_amount_snapshot: i64,
    pub status: CommissionStatus,
    pub created_at: DateTime<Utc>,
}

impl PartnerCommission {
    /// Builds a pending commission from a partner's current terms
    pub fn from_terms(
        partner: &Partner,
        service_request_id: ServiceRequestId,
        base: i64,
    ) -> Result<Self, ReferralError> {
        let calculated_amount =
            compute_commission(partner.mode, partner.percent, partner.fixed_amount, base)?;

        Ok(Self {
            id: CommissionId::new(),
            partner_id: partner.id,
            referral_code: partner.referral_code.clone(),
            service_request_id,
            calculated_amount,
            mode_snapshot: partner.mode,
            percent_snapshot: partner.percent,
            fixed_amount_snapshot: partner.fixed_amount,
            status: CommissionStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// Computes a commission from mode, terms, and the apportioned base amount
///
/// `Both` pays the larger of the percentage and fixed parts. Summing them
/// would change payout amounts; the mode is a guaranteed minimum.
pub fn compute_commission(
    mode: CommissionMode,
    percent: Decimal,
    fixed_amount: i64,
    base: i64,
) -> Result<i64, ReferralError> {
    if base < 0 {
        return Err(ReferralError::Validation(format!(
            "commission base must be non-negative, got {base}"
        )));
    }
    if fixed_amount < 0 {
        return Err(ReferralError::Validation(format!(
            "fixed commission must be non-negative, got {fixed_amount}"
        )));
    }

    let percent_part = match mode {
        CommissionMode::Percent | CommissionMode::Both => {
            Rate::from_percentage(percent).apply_to_units(base)?
        }
        CommissionMode::Fixed => 0,
    };
    let fixed_part = match mode {
        CommissionMode::Fixed | CommissionMode::Both => fixed_amount,
        CommissionMode::Percent => 0,
    };

    Ok(percent_part.max(fixed_part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_mode() {
        let amount = compute_commission(CommissionMode::Percent, dec!(10), 40, 1000).unwrap();
        assert_eq!(amount, 100);
    }

    #[test]
    fn test_fixed_mode_ignores_percent() {
        let amount = compute_commission(CommissionMode::Fixed, dec!(10), 40, 1000).unwrap();
        assert_eq!(amount, 40);
    }

    #[test]
    fn test_both_mode_takes_max_not_sum() {
        let amount = compute_commission(CommissionMode::Both, dec!(10), 40, 1000).unwrap();
        assert_eq!(amount, 100);
    }

    #[test]
    fn test_both_mode_fixed_wins_on_small_base() {
        // 10% of 200 = 20, below the flat 40
        let amount = compute_commission(CommissionMode::Both, dec!(10), 40, 200).unwrap();
        assert_eq!(amount, 40);
    }

    #[test]
    fn test_percent_rounds_half_away_from_zero() {
        // 2.5% of 101 = 2.525 -> 3
        let amount = compute_commission(CommissionMode::Percent, dec!(2.5), 0, 101).unwrap();
        assert_eq!(amount, 3);
    }

    #[test]
    fn test_negative_base_rejected() {
        let result = compute_commission(CommissionMode::Percent, dec!(10), 0, -1);
        assert!(matches!(result, Err(ReferralError::Validation(_))));
    }

    #[test]
    fn test_snapshot_preserves_terms() {
        let partner = Partner {
            id: PartnerId::new(),
            referral_code: "VEDIC10".to_string(),
            mode: CommissionMode::Both,
            percent: dec!(10),
            fixed_amount: 40,
        };

        let commission =
            PartnerCommission::from_terms(&partner, ServiceRequestId::new(), 1000).unwrap();

        assert_eq!(commission.calculated_amount, 100);
        assert_eq!(commission.mode_snapshot, CommissionMode::Both);
        assert_eq!(commission.percent_snapshot, dec!(10));
        assert_eq!(commission.fixed_amount_snapshot, 40);
        assert_eq!(commission.status, CommissionStatus::Pending);
    }
}
