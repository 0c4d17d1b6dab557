//! Mandate records (AP2 chain of authorization)
//!
//! | Record | ID format | Links to |
//! |--------|-----------|----------|
//! | [`IntentMandate`] | `IM-` + 8 hex | - |
//! | [`CartMandate`] | `CM-` + 8 hex | Intent Mandate |
//! | [`PaymentResult`] | `TXN-` + 12 hex, or `NONE` | Cart Mandate, Intent Mandate |
//!
//! Records are created once and never mutated. Links are ID references
//! resolved through the [`MandateRegistry`](crate::registry::MandateRegistry),
//! never embedded copies.

pub mod fingerprint;
pub mod id;
pub mod types;

pub use fingerprint::{audit_fingerprint, canonical_timestamp, AuditFingerprint, FINGERPRINT_LEN};
pub use id::{generate_id, IdKind};
pub use types::{
    CartMandate, IntentMandate, PaymentMethod, PaymentResult, PaymentStatus, NONE_SENTINEL,
};
