//! Record ID generation.
//!
//! IDs are a kind prefix followed by upper-case hex taken from a random v4
//! UUID. Generation does not consult the registry; uniqueness is enforced at
//! insertion (see [`MandateRegistry`](crate::registry::MandateRegistry)).

use uuid::Uuid;

/// Kind of generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Intent,
    Cart,
    Transaction,
    Order,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Intent => "IM-",
            Self::Cart => "CM-",
            Self::Transaction => "TXN-",
            Self::Order => "ORD-",
        }
    }

    /// Number of hex characters after the prefix.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Intent | Self::Cart => 8,
            Self::Transaction | Self::Order => 12,
        }
    }

    /// Check that `id` has this kind's prefix and hex suffix length.
    pub fn matches(&self, id: &str) -> bool {
        id.strip_prefix(self.prefix()).is_some_and(|hex| {
            hex.len() == self.hex_len()
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
    }
}

/// Generate a fresh random ID of the given kind.
pub fn generate_id(kind: IdKind) -> String {
    let hex = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    format!("{}{}", kind.prefix(), &hex[..kind.hex_len()])
}
