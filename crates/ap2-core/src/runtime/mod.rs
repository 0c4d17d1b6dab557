//! Mandate chain runtime.
//!
//! The service creates and links the three records of a purchase. Every link
//! is resolved by ID through the registry, and payment re-resolves the whole
//! chain instead of trusting the checks made when the cart was locked.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     MandateChainService                       │
//! │  ┌──────────────┐    ┌──────────────┐    ┌────────────────┐   │
//! │  │ Intent       │───▶│ Cart         │───▶│ Payment        │   │
//! │  │ factory      │    │ factory      │    │ processor      │   │
//! │  └──────┬───────┘    └──┬───────┬───┘    └──┬─────────┬───┘   │
//! │         │               │       │           │         │       │
//! │  ┌──────▼───────────────▼───┐ ┌─▼───────────▼───┐     │       │
//! │  │ MandateRegistry          │ │ Catalog         │◀────┘       │
//! │  │ intents/carts/txns       │ │ products/orders │  record     │
//! │  └──────────────────────────┘ └─────────────────┘  order      │
//! └───────────────────────────────────────────────────────────────┘
//! ```

mod service;
mod state;

pub use service::{AuditTrail, MandateChainService};
pub use state::ChainState;
