//! Mandate chain service.
//!
//! Flow for one purchase:
//! 1. Create an Intent Mandate (always succeeds)
//! 2. Lock a Cart Mandate against the intent (intent, product and stock checked)
//! 3. Process payment (cart, intent and payment method re-checked)
//! 4. Record the order with the catalog

use crate::catalog::{Catalog, OrderRecord};
use crate::config::Ap2Config;
use crate::error::MandateError;
use crate::mandate::{CartMandate, IntentMandate, PaymentResult};
use crate::registry::MandateRegistry;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

#[path = "service_internal/mod.rs"]
mod service_internal;

/// IDs linking a completed payment back to its intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrail {
    pub intent_mandate_id: String,
    pub cart_mandate_id: String,
    pub transaction_id: String,
}

impl AuditTrail {
    pub fn of(result: &PaymentResult) -> Self {
        Self {
            intent_mandate_id: result.intent_mandate_id.clone(),
            cart_mandate_id: result.cart_mandate_id.clone(),
            transaction_id: result.transaction_id.clone(),
        }
    }
}

impl fmt::Display for AuditTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} → {}",
            self.intent_mandate_id, self.cart_mandate_id, self.transaction_id
        )
    }
}

/// Creates and links mandates. Owns its registry; share it behind an `Arc`.
pub struct MandateChainService {
    registry: MandateRegistry,
    catalog: Arc<dyn Catalog>,
    config: Ap2Config,
}

impl MandateChainService {
    pub fn new(registry: MandateRegistry, catalog: Arc<dyn Catalog>, config: Ap2Config) -> Self {
        Self {
            registry,
            catalog,
            config,
        }
    }

    pub fn registry(&self) -> &MandateRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn config(&self) -> &Ap2Config {
        &self.config
    }

    /// Create and register an Intent Mandate. Inputs are not validated.
    pub fn create_intent_mandate(
        &self,
        user_intent: &str,
        max_budget: Decimal,
        preferred_platform: Option<&str>,
    ) -> Arc<IntentMandate> {
        self.create_intent_mandate_at(Utc::now(), user_intent, max_budget, preferred_platform)
    }

    /// Same as [`Self::create_intent_mandate`] with an explicit creation time.
    pub fn create_intent_mandate_at(
        &self,
        now: DateTime<Utc>,
        user_intent: &str,
        max_budget: Decimal,
        preferred_platform: Option<&str>,
    ) -> Arc<IntentMandate> {
        service_internal::intent::create_intent_impl(
            self,
            now,
            user_intent,
            max_budget,
            preferred_platform,
        )
    }

    /// Lock a product and quantity against an existing Intent Mandate.
    ///
    /// A total above the intent's budget is logged, not rejected.
    pub fn create_cart_mandate(
        &self,
        intent_mandate_id: &str,
        product_id: &str,
        quantity: NonZeroU32,
    ) -> Result<Arc<CartMandate>, MandateError> {
        self.create_cart_mandate_at(Utc::now(), intent_mandate_id, product_id, quantity)
    }

    pub fn create_cart_mandate_at(
        &self,
        now: DateTime<Utc>,
        intent_mandate_id: &str,
        product_id: &str,
        quantity: NonZeroU32,
    ) -> Result<Arc<CartMandate>, MandateError> {
        service_internal::cart::create_cart_impl(self, now, intent_mandate_id, product_id, quantity)
    }

    /// Validate the chain behind a cart and execute the payment.
    ///
    /// Never fails: a rejected payment is a result with a `FAILED` status.
    pub fn process_payment(
        &self,
        cart_mandate_id: &str,
        payment_method: &str,
        customer_name: &str,
        delivery_address: &str,
    ) -> PaymentResult {
        self.process_payment_with_order(
            cart_mandate_id,
            payment_method,
            customer_name,
            delivery_address,
        )
        .0
    }

    /// [`Self::process_payment`], also returning the order recorded with the
    /// catalog on success.
    pub fn process_payment_with_order(
        &self,
        cart_mandate_id: &str,
        payment_method: &str,
        customer_name: &str,
        delivery_address: &str,
    ) -> (PaymentResult, Option<OrderRecord>) {
        self.process_payment_at(
            Utc::now(),
            cart_mandate_id,
            payment_method,
            customer_name,
            delivery_address,
        )
    }

    pub fn process_payment_at(
        &self,
        now: DateTime<Utc>,
        cart_mandate_id: &str,
        payment_method: &str,
        customer_name: &str,
        delivery_address: &str,
    ) -> (PaymentResult, Option<OrderRecord>) {
        service_internal::payment::process_payment_impl(
            self,
            now,
            cart_mandate_id,
            payment_method,
            customer_name,
            delivery_address,
        )
    }

    pub fn intent(&self, id: &str) -> Option<Arc<IntentMandate>> {
        self.registry.get_intent(id)
    }

    pub fn cart(&self, id: &str) -> Option<Arc<CartMandate>> {
        self.registry.get_cart(id)
    }

    pub fn transaction(&self, id: &str) -> Option<Arc<PaymentResult>> {
        self.registry.get_transaction(id)
    }

    /// Intent → Cart → Transaction IDs of a completed payment.
    pub fn audit_trail(&self, transaction_id: &str) -> Option<AuditTrail> {
        self.registry
            .get_transaction(transaction_id)
            .map(|txn| AuditTrail::of(&txn))
    }

    /// Amount by which a cart exceeds its intent's budget, if it does.
    pub fn budget_overrun(&self, cart: &CartMandate) -> Option<Decimal> {
        let intent = self.registry.get_intent(&cart.intent_mandate_id)?;
        service_internal::cart::overrun(cart.total_amount, intent.max_budget)
    }
}
