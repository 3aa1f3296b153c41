//! Recipient amount apportionment
//!
//! Splits integer base and GST amounts across N recipients with no
//! fractional units and no drift against the original totals: floor
//! division, with the remainder handed out one unit each to the first
//! recipients in caller order. The order-dependence is load-bearing - stored
//! records were produced with exactly this distribution.

use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// One recipient's share of a plan's amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub base: i64,
    pub gst: i64,
    pub total: i64,
}

/// Apportions base and GST amounts across `count` recipients
///
/// Postconditions: the shares' base amounts sum to `base_price`, their GST
/// amounts sum to `gst`, and every `total` is its share's exact base + GST.
/// `count == 1` returns the identity share.
pub fn apportion(base_price: i64, gst: i64, count: usize) -> Result<Vec<Share>, PaymentError> {
    if count == 0 {
        return Err(PaymentError::Validation(
            "cannot apportion across zero recipients".to_string(),
        ));
    }
    if base_price < 0 || gst < 0 {
        return Err(PaymentError::Validation(format!(
            "amounts must be non-negative (base {base_price}, gst {gst})"
        )));
    }

    let n = count as i64;
    let base_floor = base_price / n;
    let base_remainder = base_price - base_floor * n;
    let gst_floor = gst / n;
    let gst_remainder = gst - gst_floor * n;

    let shares = (0..n)
        .map(|i| {
            let base = base_floor + i64::from(i < base_remainder);
            let gst = gst_floor + i64::from(i < gst_remainder);
            Share {
                base,
                gst,
                total: base + gst,
            }
        })
        .collect();

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let shares = apportion(1000, 180, 2).unwrap();
        assert_eq!(
            shares,
            vec![
                Share { base: 500, gst: 90, total: 590 },
                Share { base: 500, gst: 90, total: 590 },
            ]
        );
    }

    #[test]
    fn test_first_recipient_absorbs_remainder() {
        let shares = apportion(1001, 180, 2).unwrap();
        assert_eq!(
            shares,
            vec![
                Share { base: 501, gst: 90, total: 591 },
                Share { base: 500, gst: 90, total: 590 },
            ]
        );
    }

    #[test]
    fn test_single_recipient_identity() {
        let shares = apportion(999, 181, 1).unwrap();
        assert_eq!(shares, vec![Share { base: 999, gst: 181, total: 1180 }]);
    }

    #[test]
    fn test_base_and_gst_remainders_are_independent() {
        // base spreads 1 extra unit, gst spreads 2
        let shares = apportion(10, 11, 3).unwrap();
        assert_eq!(
            shares,
            vec![
                Share { base: 4, gst: 4, total: 8 },
                Share { base: 3, gst: 4, total: 7 },
                Share { base: 3, gst: 3, total: 6 },
            ]
        );
    }

    #[test]
    fn test_more_recipients_than_units() {
        let shares = apportion(2, 0, 5).unwrap();
        let bases: Vec<i64> = shares.iter().map(|s| s.base).collect();
        assert_eq!(bases, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_zero_recipients_rejected() {
        assert!(matches!(
            apportion(1000, 180, 0),
            Err(PaymentError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(matches!(
            apportion(-1, 180, 2),
            Err(PaymentError::Validation(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn apportionment_sums_equal_inputs(
            base in 0i64..1_000_000_000i64,
            gst in 0i64..1_000_000_000i64,
            count in 1usize..100usize
        ) {
            let shares = apportion(base, gst, count).unwrap();

            prop_assert_eq!(shares.len(), count);
            prop_assert_eq!(shares.iter().map(|s| s.base).sum::<i64>(), base);
            prop_assert_eq!(shares.iter().map(|s| s.gst).sum::<i64>(), gst);
            prop_assert_eq!(shares.iter().map(|s| s.total).sum::<i64>(), base + gst);
        }

        #[test]
        fn shares_never_differ_by_more_than_one_unit(
            base in 0i64..1_000_000i64,
            gst in 0i64..1_000_000i64,
            count in 1usize..50usize
        ) {
            let shares = apportion(base, gst, count).unwrap();

            let max_base = shares.iter().map(|s| s.base).max().unwrap();
            let min_base = shares.iter().map(|s| s.base).min().unwrap();
            prop_assert!(max_base - min_base <= 1);
        }
    }
}
