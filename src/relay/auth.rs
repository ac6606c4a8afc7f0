//! Notification authenticity check.
//!
//! Terraform Cloud signs the raw body with HMAC-SHA512 keyed by the token set
//! on the notification configuration, and sends the hex digest in
//! `X-TFE-Notification-Signature`.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::error::{RelayError, RelayResult};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the hex encoded body signature
pub const SIGNATURE_HEADER: &str = "x-tfe-notification-signature";

/// Outcome of a successful authenticity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authentication {
    /// No signature was sent; the notification configuration has no token.
    Unsigned,
    /// The signature matched the configured token.
    Verified,
}

/// Hex encoded HMAC-SHA512 of `body` keyed with `secret`.
pub fn compute_signature(body: &[u8], secret: &str) -> RelayResult<String> {
    Ok(hex::encode(keyed_mac(body, secret)?.finalize().into_bytes()))
}

/// Verifies the signature header against the configured shared secret.
///
/// Surrounding whitespace is ignored on both the header value and the secret.
/// The digest comparison is constant time.
///
/// # Errors
/// - `MissingSecret` when a signature arrives but no secret is configured
/// - `MalformedSignature` when the header is not hex
/// - `SignatureMismatch` when the digests differ
pub fn verify_signature(
    body: &[u8],
    signature: Option<&str>,
    secret: Option<&str>,
) -> RelayResult<Authentication> {
    let Some(signature) = signature.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Authentication::Unsigned);
    };

    let Some(secret) = secret.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(RelayError::MissingSecret);
    };

    let provided = hex::decode(signature).inspect_err(|e| {
        tracing::warn!(error = %e, "signature header is not valid hex");
    })?;

    let mac = keyed_mac(body, secret)?;
    let expected = mac.clone().finalize().into_bytes();

    mac.verify_slice(&provided).map_err(|_| {
        tracing::warn!(
            got = %hex::encode(&provided),
            want = %hex::encode(expected),
            "signature does not match"
        );
        RelayError::SignatureMismatch
    })?;

    Ok(Authentication::Verified)
}

fn keyed_mac(body: &[u8], secret: &str) -> RelayResult<HmacSha512> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())?;
    mac.update(body);
    Ok(mac)
}
