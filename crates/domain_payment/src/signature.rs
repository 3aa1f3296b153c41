//! Gateway callback signature verification
//!
//! The gateway signs its checkout callback with
//! `HMAC-SHA256(secret, order_id + "|" + payment_id)` as a hex digest. The
//! concatenation order and separator are wire-format details of the gateway
//! contract, not choices. Verification runs only where the secret stays
//! confidential - the server config - never in browser-delivered code.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Computes the gateway's hex signature for an order/payment pair
///
/// Exposed for tests and demo tooling; production signatures come from the
/// gateway itself.
pub fn sign_payload(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload(order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a gateway callback signature
///
/// Returns `Ok(false)` on mismatch - a mismatch is a verdict, not an error.
/// A signature that is not valid hex (or the wrong length) can never match a
/// hex digest, so it is also a mismatch. Errors are reserved for missing
/// inputs and an unconfigured secret.
///
/// The comparison is constant-time via `Mac::verify_slice`.
pub fn verify_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> Result<bool, PaymentError> {
    if secret.is_empty() {
        return Err(PaymentError::MissingSecret);
    }
    if order_id.is_empty() || payment_id.is_empty() || signature.is_empty() {
        return Err(PaymentError::Validation(
            "order id, payment id, and signature are required".to_string(),
        ));
    }

    let Ok(candidate) = hex::decode(signature) else {
        return Ok(false);
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload(order_id, payment_id).as_bytes());
    Ok(mac.verify_slice(&candidate).is_ok())
}

fn payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}
