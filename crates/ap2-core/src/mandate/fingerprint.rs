//! Audit fingerprints
//!
//! Every mandate record carries a `signature` field. It is a deterministic
//! audit fingerprint, not a cryptographic signature: there is no key pair and
//! anyone can recompute it. It makes accidental or casual tampering with a
//! stored record detectable and nothing more.
//!
//! ```text
//! fingerprint = lowercase_hex(SHA256(field_1 "|" field_2 "|" ... "|" field_n))[..16]
//! ```

use super::types::{CartMandate, IntentMandate, PaymentResult};
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Length of an audit fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 16;

/// Compute the truncated fingerprint of a list of canonical fields.
pub fn audit_fingerprint(fields: &[&str]) -> String {
    let canonical = fields.join("|");
    let hash = Sha256::digest(canonical.as_bytes());
    let mut hex = hex::encode(hash);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Canonical timestamp form used inside fingerprints (RFC 3339, `Z` suffix).
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A record whose `signature` field is an audit fingerprint over its
/// canonical fields.
pub trait AuditFingerprint {
    /// Canonical fields, in fingerprint order.
    fn canonical_fields(&self) -> Vec<String>;

    /// The stored fingerprint.
    fn stored_fingerprint(&self) -> &str;

    fn compute_fingerprint(&self) -> String {
        let fields = self.canonical_fields();
        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        audit_fingerprint(&refs)
    }

    /// Recompute and compare against the stored value.
    fn verify_fingerprint(&self) -> bool {
        self.compute_fingerprint() == self.stored_fingerprint()
    }
}

impl AuditFingerprint for IntentMandate {
    fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user_intent.clone(),
            self.max_budget.to_string(),
            canonical_timestamp(&self.created_at),
        ]
    }

    fn stored_fingerprint(&self) -> &str {
        &self.signature
    }
}

impl AuditFingerprint for CartMandate {
    fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.intent_mandate_id.clone(),
            self.product_id.clone(),
            self.total_amount.to_string(),
            canonical_timestamp(&self.created_at),
        ]
    }

    fn stored_fingerprint(&self) -> &str {
        &self.signature
    }
}

impl AuditFingerprint for PaymentResult {
    fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.transaction_id.clone(),
            self.cart_mandate_id.clone(),
            self.intent_mandate_id.clone(),
            canonical_timestamp(&self.created_at),
        ]
    }

    fn stored_fingerprint(&self) -> &str {
        &self.signature
    }
}
