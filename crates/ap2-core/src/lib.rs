//! AP2 mandate chain engine.
//!
//! Gates every purchase behind a strictly ordered chain of immutable records:
//!
//! 1. **Intent Mandate** - the user's declared shopping intent and budget
//! 2. **Cart Mandate** - an exact product, price and quantity locked against an intent
//! 3. **Payment Result** - executed only if the cart and its intent both still resolve
//!
//! Each record carries an audit fingerprint over its canonical fields. The
//! fingerprint is a truncated SHA-256 digest kept for traceability; it is not a
//! signature and there is no key material anywhere in this crate.
//!
//! # Example
//!
//! ```rust
//! use ap2_core::catalog::InMemoryCatalog;
//! use ap2_core::{Ap2Config, MandateChainService, MandateRegistry};
//! use rust_decimal::Decimal;
//! use std::num::NonZeroU32;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryCatalog::bundled().unwrap());
//! let service = MandateChainService::new(MandateRegistry::new(), catalog, Ap2Config::default());
//!
//! let intent = service.create_intent_mandate(
//!     "Buy Galaxy S24 Ultra",
//!     Decimal::from(150_000),
//!     Some("Amazon India"),
//! );
//! let cart = service
//!     .create_cart_mandate(&intent.id, "AMZ-S24U-256", NonZeroU32::MIN)
//!     .unwrap();
//! let result = service.process_payment(&cart.id, "upi", "Asha Rao", "12 MG Road, Bengaluru 560001");
//!
//! assert!(result.is_completed());
//! assert_eq!(result.amount, Decimal::from(129_999));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod mandate;
pub mod money;
pub mod registry;
pub mod runtime;
pub mod tools;

pub use config::Ap2Config;
pub use error::MandateError;
pub use mandate::{
    AuditFingerprint, CartMandate, IntentMandate, PaymentMethod, PaymentResult, PaymentStatus,
};
pub use registry::{MandateRegistry, RegistryError, RegistryStats};
pub use runtime::{AuditTrail, ChainState, MandateChainService};
