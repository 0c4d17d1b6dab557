use super::super::MandateChainService;
use super::register_with_fresh_id;
use crate::catalog::Product;
use crate::error::MandateError;
use crate::mandate::{AuditFingerprint, CartMandate, IdKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) fn create_cart_impl(
    service: &MandateChainService,
    now: DateTime<Utc>,
    intent_mandate_id: &str,
    product_id: &str,
    quantity: NonZeroU32,
) -> Result<Arc<CartMandate>, MandateError> {
    let outcome = validate_and_lock(service, now, intent_mandate_id, product_id, quantity);
    if let Err(err) = &outcome {
        warn!(
            intent_mandate_id,
            product_id,
            quantity = quantity.get(),
            code = err.code(),
            reason = %err,
            "cart mandate rejected"
        );
    }
    outcome
}

fn validate_and_lock(
    service: &MandateChainService,
    now: DateTime<Utc>,
    intent_mandate_id: &str,
    product_id: &str,
    quantity: NonZeroU32,
) -> Result<Arc<CartMandate>, MandateError> {
    let intent = service
        .registry
        .get_intent(intent_mandate_id)
        .ok_or_else(|| MandateError::ChainBroken {
            intent_mandate_id: intent_mandate_id.to_string(),
        })?;

    let product = service
        .catalog
        .find_product(product_id)
        .ok_or_else(|| MandateError::ProductNotFound {
            product_id: product_id.to_string(),
        })?;

    let total = CartMandate::total_for(product.price, quantity);

    // Budget is advisory only
    if let Some(total) = total {
        if let Some(over_by) = overrun(total, intent.max_budget) {
            warn!(
                intent_mandate_id,
                product_id,
                total = %total,
                max_budget = %intent.max_budget,
                over_by = %over_by,
                "cart total exceeds intent budget"
            );
        }
    }

    check_stock(&product, quantity)?;

    // A quantity that cannot be priced is more than any catalog can supply
    let total = total.ok_or_else(|| MandateError::InsufficientStock {
        product_id: product.id.clone(),
        requested: quantity.get(),
        available: product.available_units(),
    })?;

    let cart = register_with_fresh_id(
        IdKind::Cart,
        |id| {
            let mut cart = CartMandate {
                id,
                intent_mandate_id: intent.id.clone(),
                product_id: product.id.clone(),
                product_name: product.display_name(),
                platform: product.platform.clone(),
                unit_price: product.price,
                quantity,
                total_amount: total,
                created_at: now,
                signature: String::new(),
            };
            cart.signature = cart.compute_fingerprint();
            cart
        },
        |cart| service.registry.put_cart(cart),
    );

    info!(
        cart_mandate_id = %cart.id,
        intent_mandate_id = %cart.intent_mandate_id,
        product_id = %cart.product_id,
        quantity = cart.quantity.get(),
        total_amount = %cart.total_amount,
        signature = %cart.signature,
        "cart mandate created"
    );
    Ok(cart)
}

fn check_stock(product: &Product, quantity: NonZeroU32) -> Result<(), MandateError> {
    if !product.in_stock || product.stock_count < quantity.get() {
        return Err(MandateError::InsufficientStock {
            product_id: product.id.clone(),
            requested: quantity.get(),
            available: product.available_units(),
        });
    }
    Ok(())
}

/// Saturates at `Decimal::MAX` when the difference does not fit.
pub(crate) fn overrun(total: Decimal, max_budget: Decimal) -> Option<Decimal> {
    (total > max_budget).then(|| total.checked_sub(max_budget).unwrap_or(Decimal::MAX))
}
