//! Mandate record types.
//!
//! All amounts are [`Decimal`]; `total_amount == unit_price * quantity` holds
//! exactly for every Cart Mandate.

use crate::error::MandateError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Placeholder for echo fields of a failed payment.
pub const NONE_SENTINEL: &str = "NONE";

/// Root authorization record: what the user wants and how much they will spend.
///
/// `max_budget` is not validated; zero and negative budgets are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentMandate {
    /// `IM-` + 8 hex
    pub id: String,

    /// Free-text description of the purchase intent
    pub user_intent: String,

    /// Advisory price ceiling
    pub max_budget: Decimal,

    /// Preferred platform (absent = any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_platform: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Audit fingerprint over `id|userIntent|maxBudget|createdAt`
    pub signature: String,
}

/// Locked product, price and quantity referencing an Intent Mandate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMandate {
    /// `CM-` + 8 hex
    pub id: String,

    /// Parent Intent Mandate (resolved at creation and again at payment)
    pub intent_mandate_id: String,

    pub product_id: String,

    /// Display name including variant, e.g. "Samsung Galaxy S24 Ultra (Titanium Gray, 256GB)"
    pub product_name: String,

    pub platform: String,

    pub unit_price: Decimal,

    pub quantity: NonZeroU32,

    /// Always `unit_price * quantity`, never supplied by the caller
    pub total_amount: Decimal,

    pub created_at: DateTime<Utc>,

    /// Audit fingerprint over `id|intentMandateId|productId|totalAmount|createdAt`
    pub signature: String,
}

impl CartMandate {
    /// Exact cart total for a unit price and quantity, or `None` if it does
    /// not fit in a `Decimal`.
    pub fn total_for(unit_price: Decimal, quantity: NonZeroU32) -> Option<Decimal> {
        unit_price.checked_mul(Decimal::from(quantity.get()))
    }
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Upi,
    CreditCard,
    DebitCard,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        Self::Upi,
        Self::CreditCard,
        Self::DebitCard,
        Self::NetBanking,
        Self::Wallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::NetBanking => "NET_BANKING",
            Self::Wallet => "WALLET",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"upi"`, `"Upi"` and `"UPI"` are the same method.
impl FromStr for PaymentMethod {
    type Err = MandateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MandateError::InvalidPaymentMethod {
                method: s.to_string(),
            })
    }
}

/// Terminal status of a payment attempt.
///
/// Renders as `COMPLETED` or `FAILED: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
    Failed(MandateError),
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("COMPLETED"),
            Self::Failed(reason) => write!(f, "FAILED: {reason}"),
        }
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a payment attempt, successful or not.
///
/// On failure every echo field except `cart_mandate_id` and `status` is
/// [`NONE_SENTINEL`] and `amount` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    /// `TXN-` + 12 hex, or `NONE` on failure
    pub transaction_id: String,
    pub cart_mandate_id: String,
    pub intent_mandate_id: String,
    pub status: PaymentStatus,
    pub payment_method: String,
    pub amount: Decimal,
    pub customer_name: String,
    pub delivery_address: String,
    pub product_name: String,
    pub platform: String,
    pub created_at: DateTime<Utc>,

    /// Audit fingerprint over `transactionId|cartMandateId|intentMandateId|createdAt`,
    /// or `NONE` on failure
    pub signature: String,
}

impl PaymentResult {
    /// Build the sentinel result for a rejected payment.
    pub fn failed(
        cart_mandate_id: impl Into<String>,
        reason: MandateError,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: NONE_SENTINEL.to_string(),
            cart_mandate_id: cart_mandate_id.into(),
            intent_mandate_id: NONE_SENTINEL.to_string(),
            status: PaymentStatus::Failed(reason),
            payment_method: NONE_SENTINEL.to_string(),
            amount: Decimal::ZERO,
            customer_name: NONE_SENTINEL.to_string(),
            delivery_address: NONE_SENTINEL.to_string(),
            product_name: NONE_SENTINEL.to_string(),
            platform: NONE_SENTINEL.to_string(),
            created_at,
            signature: NONE_SENTINEL.to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    /// The failure reason, if the payment was rejected.
    pub fn failure(&self) -> Option<&MandateError> {
        match &self.status {
            PaymentStatus::Completed => None,
            PaymentStatus::Failed(reason) => Some(reason),
        }
    }
}
