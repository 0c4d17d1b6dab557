use super::super::{AuditTrail, MandateChainService};
use super::register_with_fresh_id;
use crate::catalog::OrderRecord;
use crate::error::MandateError;
use crate::mandate::{
    AuditFingerprint, CartMandate, IdKind, PaymentMethod, PaymentResult, PaymentStatus,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) fn process_payment_impl(
    service: &MandateChainService,
    now: DateTime<Utc>,
    cart_mandate_id: &str,
    payment_method: &str,
    customer_name: &str,
    delivery_address: &str,
) -> (PaymentResult, Option<OrderRecord>) {
    let (cart, method) = match authorize(service, cart_mandate_id, payment_method) {
        Ok(authorized) => authorized,
        Err(reason) => {
            warn!(
                cart_mandate_id,
                payment_method,
                code = reason.code(),
                reason = %reason,
                "payment rejected"
            );
            return (PaymentResult::failed(cart_mandate_id, reason, now), None);
        }
    };

    let result = register_with_fresh_id(
        IdKind::Transaction,
        |transaction_id| {
            let mut result = PaymentResult {
                transaction_id,
                cart_mandate_id: cart.id.clone(),
                intent_mandate_id: cart.intent_mandate_id.clone(),
                status: PaymentStatus::Completed,
                payment_method: method.as_str().to_string(),
                amount: cart.total_amount,
                customer_name: customer_name.to_string(),
                delivery_address: delivery_address.to_string(),
                product_name: cart.product_name.clone(),
                platform: cart.platform.clone(),
                created_at: now,
                signature: String::new(),
            };
            result.signature = result.compute_fingerprint();
            result
        },
        |result| service.registry.put_transaction(result),
    );

    let order = service.catalog.record_order(
        &cart.product_id,
        cart.quantity.get(),
        customer_name,
        delivery_address,
    );
    if order.is_none() {
        warn!(
            transaction_id = %result.transaction_id,
            product_id = %cart.product_id,
            "payment completed but catalog did not record an order"
        );
    }

    info!(
        transaction_id = %result.transaction_id,
        cart_mandate_id = %result.cart_mandate_id,
        intent_mandate_id = %result.intent_mandate_id,
        payment_method = %result.payment_method,
        amount = %result.amount,
        order_id = order.as_ref().map(|o| o.order_id.as_str()).unwrap_or("none"),
        audit_trail = %AuditTrail::of(&result),
        "payment completed"
    );

    (PaymentResult::clone(&result), order)
}

/// Re-resolve the whole chain and the payment method. Nothing is written
/// until this passes.
fn authorize(
    service: &MandateChainService,
    cart_mandate_id: &str,
    payment_method: &str,
) -> Result<(Arc<CartMandate>, PaymentMethod), MandateError> {
    let cart = service
        .registry
        .get_cart(cart_mandate_id)
        .ok_or_else(|| MandateError::MandateNotFound {
            cart_mandate_id: cart_mandate_id.to_string(),
        })?;

    if service.registry.get_intent(&cart.intent_mandate_id).is_none() {
        return Err(MandateError::ChainBroken {
            intent_mandate_id: cart.intent_mandate_id.clone(),
        });
    }

    let method: PaymentMethod = payment_method.parse()?;
    if !service.config.accepts(method) {
        return Err(MandateError::InvalidPaymentMethod {
            method: payment_method.to_string(),
        });
    }

    Ok((cart, method))
}
