//! Invoice number generation.
//!
//! Format: `INV-<BASE36 MILLIS>-<4 ALNUM>`, a human-facing unique
//! identifier, not a surrogate key. The timestamp token keeps numbers
//! roughly sortable; the random suffix disambiguates same-millisecond
//! issuance.

use chrono::Utc;
use rand::{distr::Alphanumeric, RngExt};

const PREFIX: &str = "INV";

fn to_base36(mut value: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value <= 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// Generate a fresh invoice number
pub fn generate() -> String {
    let token = to_base36(Utc::now().timestamp_millis());
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(4)
        .map(char::from)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    format!("{}-{}-{}", PREFIX, token, suffix)
}
