//! Mandate chain failure taxonomy.
//!
//! None of these are raised across the service boundary as panics or
//! propagated `Err`s from payment: cart creation returns them as the `Err`
//! arm of a `Result`, payment embeds them in a `FAILED` status.

/// Why a link of the mandate chain could not be created or resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MandateError {
    /// The referenced Intent Mandate is not in the registry.
    #[error("Intent Mandate chain broken — authorization invalid")]
    ChainBroken { intent_mandate_id: String },

    /// The catalog has no product with this ID.
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// The product is out of stock or has fewer units than requested.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// The referenced Cart Mandate is not in the registry.
    #[error("Cart Mandate not found")]
    MandateNotFound { cart_mandate_id: String },

    /// The payment method is not one of the accepted methods.
    #[error("Invalid payment method: {method}")]
    InvalidPaymentMethod { method: String },
}

impl MandateError {
    /// Stable machine-readable code for tool output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChainBroken { .. } => "E_CHAIN_BROKEN",
            Self::ProductNotFound { .. } => "E_PRODUCT_NOT_FOUND",
            Self::InsufficientStock { .. } => "E_INSUFFICIENT_STOCK",
            Self::MandateNotFound { .. } => "E_MANDATE_NOT_FOUND",
            Self::InvalidPaymentMethod { .. } => "E_INVALID_PAYMENT_METHOD",
        }
    }
}
