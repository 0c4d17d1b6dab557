//! MandateRegistry: in-memory, append-only storage for the mandate chain.
//!
//! One map per record kind (intents, carts, transactions), keyed by record ID.
//! Provides:
//! - Put-once insertion (a duplicate ID is rejected, never overwritten)
//! - Concurrent lookups from any number of callers
//! - No update or delete
//!
//! A lookup that returns `None` is authoritative: the record does not exist.
//! State is volatile and does not survive a restart.

use crate::mandate::{CartMandate, IntentMandate, PaymentResult};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Registry errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} already registered: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Record counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub intents: usize,
    pub carts: usize,
    pub transactions: usize,
}

/// Records keyed by ID within the registry.
pub trait Registered {
    const KIND: &'static str;

    fn record_id(&self) -> &str;
}

impl Registered for IntentMandate {
    const KIND: &'static str = "intent mandate";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Registered for CartMandate {
    const KIND: &'static str = "cart mandate";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Registered for PaymentResult {
    const KIND: &'static str = "transaction";

    fn record_id(&self) -> &str {
        &self.transaction_id
    }
}

struct RecordMap<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T: Registered> RecordMap<T> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // Records are immutable once inserted, so a poisoned lock still guards a
    // consistent map.
    fn put(&self, record: T) -> Result<Arc<T>, RegistryError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let id = record.record_id();
        if entries.contains_key(id) {
            return Err(RegistryError::DuplicateId {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        let record = Arc::new(record);
        entries.insert(record.record_id().to_string(), Arc::clone(&record));
        Ok(record)
    }

    fn get(&self, id: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Shared mandate registry. Cloning shares the underlying maps.
#[derive(Clone)]
pub struct MandateRegistry {
    intents: Arc<RecordMap<IntentMandate>>,
    carts: Arc<RecordMap<CartMandate>>,
    transactions: Arc<RecordMap<PaymentResult>>,
}

impl Default for MandateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MandateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            intents: Arc::new(RecordMap::new()),
            carts: Arc::new(RecordMap::new()),
            transactions: Arc::new(RecordMap::new()),
        }
    }

    pub fn put_intent(&self, mandate: IntentMandate) -> Result<Arc<IntentMandate>, RegistryError> {
        self.intents.put(mandate)
    }

    pub fn get_intent(&self, id: &str) -> Option<Arc<IntentMandate>> {
        self.intents.get(id)
    }

    pub fn put_cart(&self, mandate: CartMandate) -> Result<Arc<CartMandate>, RegistryError> {
        self.carts.put(mandate)
    }

    pub fn get_cart(&self, id: &str) -> Option<Arc<CartMandate>> {
        self.carts.get(id)
    }

    pub fn put_transaction(
        &self,
        result: PaymentResult,
    ) -> Result<Arc<PaymentResult>, RegistryError> {
        self.transactions.put(result)
    }

    pub fn get_transaction(&self, id: &str) -> Option<Arc<PaymentResult>> {
        self.transactions.get(id)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            intents: self.intents.len(),
            carts: self.carts.len(),
            transactions: self.transactions.len(),
        }
    }
}
