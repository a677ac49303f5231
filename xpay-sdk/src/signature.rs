//! Webhook signature algorithm and verification.
//!
//! X-Pay signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the endpoint's shared secret. The wire format is:
//!
//! ```text
//! X-XPay-Signature: sha256={lowercase_hex_digest}
//! ```
//!
//! The `sha256=` prefix is optional on input.

use ring::hmac;

/// Header name carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-XPay-Signature";

/// Prefix placed in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

fn hmac_key(secret: &str) -> hmac::Key {
    hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes())
}

/// Compute the signature header value for `payload`.
///
/// Mostly useful for tests and for simulating deliveries locally.
pub fn generate_signature(payload: &str, secret: &str) -> String {
    let tag = hmac::sign(&hmac_key(secret), payload.as_bytes());
    format!("{SIGNATURE_PREFIX}{}", hex::encode(tag.as_ref()))
}

/// Verify a webhook signature.
///
/// Returns `false` (never an error) if any argument is empty, if the
/// signature is not a lowercase hex digest, or if it does not match. The
/// digest comparison runs in constant time.
pub fn verify_signature(payload: &str, signature: &str, secret: &str) -> bool {
    if payload.is_empty() || signature.is_empty() || secret.is_empty() {
        return false;
    }

    let provided = signature.strip_prefix(SIGNATURE_PREFIX).unwrap_or(signature);
    if !provided
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return false;
    }
    let Ok(provided) = hex::decode(provided) else {
        return false;
    };

    hmac::verify(&hmac_key(secret), payload.as_bytes(), &provided).is_ok()
}
