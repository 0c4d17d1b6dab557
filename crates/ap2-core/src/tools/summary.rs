//! Text summaries returned to the orchestrator.

use crate::catalog::{OrderRecord, Product};
use crate::error::MandateError;
use crate::mandate::{canonical_timestamp, CartMandate, IntentMandate, PaymentResult};
use crate::money::format_amount;
use rust_decimal::Decimal;

pub(crate) fn failure(headline: &str, reason: &MandateError) -> String {
    format!("❌ {headline}\n   Reason: {reason}")
}

pub(crate) fn intent(mandate: &IntentMandate, symbol: &str) -> String {
    let platform = mandate.preferred_platform.as_deref().unwrap_or("Any");
    [
        "🔒 INTENT MANDATE".to_string(),
        format!("├─ Mandate ID:  {}", mandate.id),
        format!("├─ Intent:      {}", mandate.user_intent),
        format!("├─ Max Budget:  {}", format_amount(mandate.max_budget, symbol)),
        format!("├─ Platform:    {platform}"),
        format!("├─ Created:     {}", canonical_timestamp(&mandate.created_at)),
        format!("└─ Fingerprint: {}", mandate.signature),
        String::new(),
        format!(
            "💡 Next: lock a product with createCartMandate using {}",
            mandate.id
        ),
    ]
    .join("\n")
}

pub(crate) fn cart(cart: &CartMandate, overrun: Option<Decimal>, symbol: &str) -> String {
    let mut lines = vec![
        "🛒 CART MANDATE".to_string(),
        format!("├─ Cart ID:     {}", cart.id),
        format!("├─ Intent:      {} ✅", cart.intent_mandate_id),
        format!("├─ Product:     {} [{}]", cart.product_name, cart.product_id),
        format!("├─ Platform:    {}", cart.platform),
        format!("├─ Unit Price:  {}", format_amount(cart.unit_price, symbol)),
        format!("├─ Quantity:    {}", cart.quantity),
        format!("├─ Total:       {}", format_amount(cart.total_amount, symbol)),
        format!("├─ Created:     {}", canonical_timestamp(&cart.created_at)),
        format!("└─ Fingerprint: {}", cart.signature),
    ];
    if let Some(over_by) = overrun {
        lines.push(String::new());
        lines.push(format!(
            "⚠️ Total exceeds the intent budget by {}",
            format_amount(over_by, symbol)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "💡 Confirm the cart with the user, then call processPayment with {}",
        cart.id
    ));
    lines.join("\n")
}

pub(crate) fn payment(
    result: &PaymentResult,
    order: Option<&OrderRecord>,
    symbol: &str,
) -> String {
    if let Some(reason) = result.failure() {
        return failure("PAYMENT FAILED", reason);
    }

    let mut lines = vec![
        "✅ PAYMENT SUCCESSFUL".to_string(),
        format!("├─ Transaction: {}", result.transaction_id),
        format!("├─ Product:     {}", result.product_name),
        format!("├─ Platform:    {}", result.platform),
        format!("├─ Amount:      {}", format_amount(result.amount, symbol)),
        format!("├─ Method:      {}", result.payment_method),
        format!("├─ Customer:    {}", result.customer_name),
        format!("├─ Deliver To:  {}", result.delivery_address),
    ];
    if let Some(order) = order {
        lines.push(format!("├─ Order ID:    {}", order.order_id));
    }
    lines.extend([
        format!("├─ Processed:   {}", canonical_timestamp(&result.created_at)),
        "└─ Audit trail:".to_string(),
        format!("   Intent Mandate: {}", result.intent_mandate_id),
        format!("   Cart Mandate:   {}", result.cart_mandate_id),
        format!("   Fingerprint:    {}", result.signature),
    ]);
    lines.join("\n")
}

pub(crate) fn product(product: &Product, symbol: &str) -> String {
    let mut lines = vec![
        format!("📱 {}", product.display_name()),
        format!("├─ ID:          {}", product.id),
        format!("├─ Platform:    {}", product.platform),
    ];
    if !product.ram.is_empty() {
        lines.push(format!("├─ RAM:         {}", product.ram));
    }
    let price = format_amount(product.price, symbol);
    if product.mrp > product.price {
        lines.push(format!(
            "├─ Price:       {price} (MRP {}, {}% off)",
            format_amount(product.mrp, symbol),
            product.discount_percent()
        ));
    } else {
        lines.push(format!("├─ Price:       {price}"));
    }
    if product.rating > 0.0 {
        lines.push(format!("├─ Rating:      ⭐{:.1}", product.rating));
    }
    if !product.seller.is_empty() {
        lines.push(format!("├─ Seller:      {}", product.seller));
    }
    if !product.delivery_partner.is_empty() {
        lines.push(format!(
            "├─ Delivery:    {} ({})",
            product.delivery_partner, product.delivery_speed
        ));
    }
    lines.push(if product.in_stock {
        format!("└─ Stock:       In stock ({} units)", product.stock_count)
    } else {
        "└─ Stock:       Out of stock".to_string()
    });
    lines.join("\n")
}

pub(crate) fn order(order: &OrderRecord, symbol: &str) -> String {
    let mut lines = vec![
        format!("📦 ORDER {}", order.order_id),
        format!("├─ Status:      {}", order.status),
        format!("├─ Product:     {} x{}", order.product_name, order.quantity),
        format!("├─ Platform:    {}", order.platform),
        format!("├─ Total:       {}", format_amount(order.total_amount, symbol)),
        format!("├─ Customer:    {}", order.customer_name),
        format!("├─ Deliver To:  {}", order.delivery_address),
    ];
    if !order.delivery_partner.is_empty() {
        lines.push(format!("├─ Courier:     {}", order.delivery_partner));
    }
    lines.push(format!(
        "└─ Ordered:     {}",
        canonical_timestamp(&order.ordered_at)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, InMemoryCatalog};
    use std::num::NonZeroU32;

    #[test]
    fn test_failure_line() {
        let reason = MandateError::MandateNotFound {
            cart_mandate_id: "CM-UNKNOWN".to_string(),
        };
        assert_eq!(
            failure("PAYMENT FAILED", &reason),
            "❌ PAYMENT FAILED\n   Reason: Cart Mandate not found"
        );
    }

    #[test]
    fn test_cart_summary_layout() {
        let mandate = CartMandate {
            id: "CM-0A1B2C3D".to_string(),
            intent_mandate_id: "IM-0A1B2C3D".to_string(),
            product_id: "AMZ-S24U-256".to_string(),
            product_name: "Samsung Galaxy S24 Ultra (Titanium Black, 256GB)".to_string(),
            platform: "Amazon India".to_string(),
            unit_price: Decimal::from(129_999),
            quantity: NonZeroU32::MIN,
            total_amount: Decimal::from(129_999),
            created_at: chrono::Utc::now(),
            signature: "0123456789ABCDEF".to_string(),
        };

        let text = cart(&mandate, None, "₹");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "🛒 CART MANDATE");
        assert_eq!(lines[7], "├─ Total:       ₹129,999");
        assert_eq!(lines[9], "└─ Fingerprint: 0123456789ABCDEF");
        assert_eq!(lines[10], "");
        assert!(lines[11].ends_with("processPayment with CM-0A1B2C3D"));
        assert_eq!(lines.len(), 12);

        let warned = cart(&mandate, Some(Decimal::from(29_999)), "₹");
        assert!(warned
            .lines()
            .any(|l| l == "⚠️ Total exceeds the intent budget by ₹29,999"));
        assert_eq!(warned.lines().count(), 14);
    }

    #[test]
    fn test_product_summary_shows_discount_and_stock() {
        let catalog = InMemoryCatalog::bundled().unwrap();
        let p = catalog.find_product("AMZ-S24U-256").unwrap();
        let text = product(&p, "₹");

        assert!(text.starts_with(&format!("📱 {}", p.display_name())));
        assert!(text.ends_with(&format!("└─ Stock:       In stock ({} units)", p.stock_count)));
        if p.mrp > p.price {
            assert!(text.contains("% off)"));
        }
        assert!(!text.ends_with('\n'));
    }
}
