//! Webhook authenticity verification.
//!
//! The processor signs each delivery with a shared secret:
//!
//! ```text
//! X-Processor-Signature: t=<unix seconds>,v1=<hex sha256(secret "." t "." body)>
//! ```
//!
//! Verification fails closed: a missing, malformed, stale, or mismatched
//! signature rejects the request before any payload parsing or state change.

use crate::error::{PaymentError, PaymentResult};
use sha2::{Digest, Sha256};

/// Maximum allowed skew between the signature timestamp and now
const TOLERANCE_SECS: i64 = 300;

#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a signature header against the raw request body
    pub fn verify(&self, signature_header: &str, body: &[u8]) -> PaymentResult<()> {
        let (timestamp, provided) = parse_header(signature_header)?;

        let now = chrono::Utc::now().timestamp();
        if (now - timestamp).abs() > TOLERANCE_SECS {
            tracing::warn!(timestamp, "Webhook signature timestamp outside tolerance");
            return Err(PaymentError::InvalidSignature);
        }

        let expected = self.compute(timestamp, body);
        if !constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
            tracing::warn!("Webhook signature mismatch");
            return Err(PaymentError::InvalidSignature);
        }

        Ok(())
    }

    /// Produce a signature header; used by tests and the dev tooling
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        format!("t={},v1={}", timestamp, self.compute(timestamp, body))
    }

    fn compute(&self, timestamp: i64, body: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b".");
        hasher.update(timestamp.to_string().as_bytes());
        hasher.update(b".");
        hasher.update(body);

        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

fn parse_header(header: &str) -> PaymentResult<(i64, String)> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signature = Some(value.to_string()),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(s)) if !s.is_empty() => Ok((t, s)),
        _ => Err(PaymentError::InvalidSignature),
    }
}

/// Compare without early exit so timing does not leak the match prefix
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new("whsec_test")
    }

    #[test]
    fn valid_signature_passes() {
        let body = br#"{"type":"payment_intent.succeeded"}"#;
        let header = verifier().sign(chrono::Utc::now().timestamp(), body);
        assert!(verifier().verify(&header, body).is_ok());
    }

    #[test]
    fn tampered_body_fails() {
        let header = verifier().sign(chrono::Utc::now().timestamp(), b"original");
        assert!(matches!(
            verifier().verify(&header, b"tampered"),
            Err(PaymentError::InvalidSignature)
        ));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = b"payload";
        let header = WebhookVerifier::new("other_secret").sign(chrono::Utc::now().timestamp(), body);
        assert!(verifier().verify(&header, body).is_err());
    }

    #[test]
    fn stale_timestamp_fails() {
        let body = b"payload";
        let stale = chrono::Utc::now().timestamp() - TOLERANCE_SECS - 10;
        let header = verifier().sign(stale, body);
        assert!(verifier().verify(&header, body).is_err());
    }

    #[test]
    fn malformed_headers_fail() {
        for header in ["", "t=,v1=", "v1=abc", "t=123", "nonsense"] {
            assert!(verifier().verify(header, b"body").is_err(), "{}", header);
        }
    }
}
