//! Tool contract consumed by an orchestrator.
//!
//! Every tool returns a [`ToolOutput`]: a human-readable summary plus a JSON
//! payload. A rejected mandate or payment is a normal output with `ok ==
//! false`; only malformed arguments and unknown tool names are errors.

mod summary;

use crate::mandate::IdKind;
use crate::runtime::{ChainState, MandateChainService};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;

pub const CREATE_INTENT_MANDATE: &str = "createIntentMandate";
pub const CREATE_CART_MANDATE: &str = "createCartMandate";
pub const PROCESS_PAYMENT: &str = "processPayment";
pub const GET_PRODUCT_DETAILS: &str = "getProductDetails";
pub const CHECK_ORDER_STATUS: &str = "checkOrderStatus";

pub const TOOL_NAMES: [&str; 5] = [
    CREATE_INTENT_MANDATE,
    CREATE_CART_MANDATE,
    PROCESS_PAYMENT,
    GET_PRODUCT_DETAILS,
    CHECK_ORDER_STATUS,
];

/// Platform value meaning "no preference".
pub const ANY_PLATFORM: &str = "Any";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub tool: &'static str,
    pub ok: bool,

    /// Mandate or transaction ID created by this call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced_id: Option<String>,

    /// Chain state reached, for the three chain tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ChainState>,

    pub text: String,
    pub data: Value,
}

impl ToolOutput {
    fn new(tool: &'static str, ok: bool, text: String, data: Value) -> Self {
        Self {
            tool,
            ok,
            produced_id: None,
            state: None,
            text,
            data,
        }
    }

    fn with_id(mut self, id: impl Into<String>) -> Self {
        self.produced_id = Some(id.into());
        self
    }

    fn with_state(mut self, state: ChainState) -> Self {
        self.state = Some(state);
        self
    }
}

fn rejection(code: &str, reason: impl ToString) -> Value {
    json!({ "code": code, "reason": reason.to_string() })
}

/// Name-dispatched tools over a shared service.
#[derive(Clone)]
pub struct ToolSet {
    service: Arc<MandateChainService>,
}

impl ToolSet {
    pub fn new(service: Arc<MandateChainService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &MandateChainService {
        &self.service
    }

    fn symbol(&self) -> &str {
        &self.service.config().currency_symbol
    }

    pub fn create_intent_mandate(
        &self,
        user_intent: &str,
        max_budget: Decimal,
        preferred_platform: Option<&str>,
    ) -> ToolOutput {
        let platform = preferred_platform
            .map(str::trim)
            .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case(ANY_PLATFORM));
        let mandate = self
            .service
            .create_intent_mandate(user_intent, max_budget, platform);

        ToolOutput::new(
            CREATE_INTENT_MANDATE,
            true,
            summary::intent(&mandate, self.symbol()),
            json!(mandate.as_ref()),
        )
        .with_id(mandate.id.clone())
        .with_state(ChainState::IntentCreated)
    }

    pub fn create_cart_mandate(
        &self,
        intent_mandate_id: &str,
        product_id: &str,
        quantity: NonZeroU32,
    ) -> ToolOutput {
        let outcome = self
            .service
            .create_cart_mandate(intent_mandate_id, product_id, quantity);
        let state = ChainState::after_cart(&outcome);

        let output = match outcome {
            Ok(cart) => {
                let overrun = self.service.budget_overrun(&cart);
                ToolOutput::new(
                    CREATE_CART_MANDATE,
                    true,
                    summary::cart(&cart, overrun, self.symbol()),
                    json!(cart.as_ref()),
                )
                .with_id(cart.id.clone())
            }
            Err(err) => ToolOutput::new(
                CREATE_CART_MANDATE,
                false,
                summary::failure("CART MANDATE REJECTED", &err),
                rejection(err.code(), &err),
            ),
        };
        output.with_state(state)
    }

    pub fn process_payment(
        &self,
        cart_mandate_id: &str,
        payment_method: &str,
        customer_name: &str,
        delivery_address: &str,
    ) -> ToolOutput {
        let (result, order) = self.service.process_payment_with_order(
            cart_mandate_id,
            payment_method,
            customer_name,
            delivery_address,
        );
        let text = summary::payment(&result, order.as_ref(), self.symbol());
        let state = ChainState::after_payment(&result);

        let mut data = json!(&result);
        if !result.is_completed() {
            return ToolOutput::new(PROCESS_PAYMENT, false, text, data).with_state(state);
        }

        if let (Some(map), Some(order)) = (data.as_object_mut(), &order) {
            map.insert("orderId".to_string(), json!(order.order_id));
        }
        ToolOutput::new(PROCESS_PAYMENT, true, text, data)
            .with_id(result.transaction_id.clone())
            .with_state(state)
    }

    pub fn get_product_details(&self, product_id: &str) -> ToolOutput {
        match self.service.catalog().find_product(product_id) {
            Some(product) => ToolOutput::new(
                GET_PRODUCT_DETAILS,
                true,
                summary::product(&product, self.symbol()),
                json!(product),
            ),
            None => ToolOutput::new(
                GET_PRODUCT_DETAILS,
                false,
                format!("❌ Product not found: {product_id}"),
                rejection("E_PRODUCT_NOT_FOUND", format!("Product not found: {product_id}")),
            ),
        }
    }

    /// `TXN-` IDs resolve against the transaction registry, anything else
    /// against the catalog's orders.
    pub fn check_order_status(&self, id: &str) -> ToolOutput {
        let id = id.trim();
        if id.starts_with(IdKind::Transaction.prefix()) {
            return match self.service.transaction(id) {
                Some(txn) => ToolOutput::new(
                    CHECK_ORDER_STATUS,
                    true,
                    summary::payment(&txn, None, self.symbol()),
                    json!(txn.as_ref()),
                ),
                None => ToolOutput::new(
                    CHECK_ORDER_STATUS,
                    false,
                    format!("❌ Transaction not found: {id}"),
                    rejection("E_TRANSACTION_NOT_FOUND", format!("Transaction not found: {id}")),
                ),
            };
        }

        match self.service.catalog().find_order(id) {
            Some(order) => ToolOutput::new(
                CHECK_ORDER_STATUS,
                true,
                summary::order(&order, self.symbol()),
                json!(order),
            ),
            None => ToolOutput::new(
                CHECK_ORDER_STATUS,
                false,
                format!("❌ Order not found: {id}"),
                rejection("E_ORDER_NOT_FOUND", format!("Order not found: {id}")),
            ),
        }
    }

    /// Invoke a tool by name with JSON arguments.
    pub fn call(&self, name: &str, args: &Value) -> Result<ToolOutput> {
        match name {
            CREATE_INTENT_MANDATE => {
                let user_intent = str_arg(args, "userIntent")?;
                let max_budget = decimal_arg(args, "maxBudget")?;
                let platform = optional_str_arg(args, "preferredPlatform")?;
                Ok(self.create_intent_mandate(user_intent, max_budget, platform))
            }
            CREATE_CART_MANDATE => {
                let intent_id = str_arg(args, "intentMandateId")?;
                let product_id = str_arg(args, "productId")?;
                let quantity = quantity_arg(args, "quantity")?;
                Ok(self.create_cart_mandate(intent_id, product_id, quantity))
            }
            PROCESS_PAYMENT => Ok(self.process_payment(
                str_arg(args, "cartMandateId")?,
                str_arg(args, "paymentMethod")?,
                str_arg(args, "customerName")?,
                str_arg(args, "deliveryAddress")?,
            )),
            GET_PRODUCT_DETAILS => Ok(self.get_product_details(str_arg(args, "productId")?)),
            CHECK_ORDER_STATUS => Ok(self.check_order_status(str_arg(args, "orderId")?)),
            other => bail!(
                "unknown tool '{other}' (expected one of: {})",
                TOOL_NAMES.join(", ")
            ),
        }
    }
}

fn str_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .with_context(|| format!("Missing '{key}' argument"))
}

fn optional_str_arg<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => bail!("'{key}' must be a string"),
    }
}

/// Accepts a JSON number or a numeric string.
fn decimal_arg(args: &Value, key: &str) -> Result<Decimal> {
    match args.get(key) {
        Some(Value::String(s)) => {
            Decimal::from_str(s.trim()).with_context(|| format!("'{key}' is not a number: {s}"))
        }
        Some(Value::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .with_context(|| format!("'{key}' is out of range: {text}"))
        }
        Some(_) => bail!("'{key}' must be a number"),
        None => bail!("Missing '{key}' argument"),
    }
}

fn quantity_arg(args: &Value, key: &str) -> Result<NonZeroU32> {
    let value = args
        .get(key)
        .with_context(|| format!("Missing '{key}' argument"))?;
    let n = value
        .as_i64()
        .with_context(|| format!("'{key}' must be an integer"))?;
    u32::try_from(n)
        .ok()
        .and_then(NonZeroU32::new)
        .with_context(|| format!("'{key}' must be a positive integer, got {n}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::{Ap2Config, MandateRegistry};

    fn tools() -> ToolSet {
        let catalog = InMemoryCatalog::bundled().unwrap();
        ToolSet::new(Arc::new(MandateChainService::new(
            MandateRegistry::new(),
            Arc::new(catalog),
            Ap2Config::default(),
        )))
    }

    #[test]
    fn test_any_platform_is_absent() {
        let tools = tools();
        let out = tools
            .call(
                CREATE_INTENT_MANDATE,
                &json!({"userIntent": "Buy a phone", "maxBudget": 90000, "preferredPlatform": "any"}),
            )
            .unwrap();
        let id = out.produced_id.unwrap();
        assert!(tools.service().intent(&id).unwrap().preferred_platform.is_none());
        assert!(out.text.contains("Platform:    Any"));
        assert!(out.text.contains("₹90,000"));
        assert!(out.text.contains("createCartMandate"));
    }

    #[test]
    fn test_budget_accepts_string_and_fraction() {
        let tools = tools();
        let out = tools
            .call(
                CREATE_INTENT_MANDATE,
                &json!({"userIntent": "x", "maxBudget": "99999.50"}),
            )
            .unwrap();
        let id = out.produced_id.unwrap();
        assert_eq!(
            tools.service().intent(&id).unwrap().max_budget,
            Decimal::new(9_999_950, 2)
        );

        let out = tools
            .call(CREATE_INTENT_MANDATE, &json!({"userIntent": "x", "maxBudget": 1500.5}))
            .unwrap();
        assert!(out.text.contains("₹1,500.50"));
    }

    #[test]
    fn test_argument_errors() {
        let tools = tools();
        let err = tools
            .call(CREATE_INTENT_MANDATE, &json!({"maxBudget": 1}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'userIntent' argument");

        let err = tools
            .call(
                CREATE_CART_MANDATE,
                &json!({"intentMandateId": "IM-1", "productId": "P", "quantity": 0}),
            )
            .unwrap_err();
        assert!(err.to_string().contains("positive integer"));

        let err = tools
            .call(
                CREATE_CART_MANDATE,
                &json!({"intentMandateId": "IM-1", "productId": "P", "quantity": -2}),
            )
            .unwrap_err();
        assert!(err.to_string().contains("positive integer"));

        let err = tools.call("refund", &json!({})).unwrap_err();
        assert!(err.to_string().contains("unknown tool 'refund'"));
    }

    #[test]
    fn test_full_chain_through_call() {
        let tools = tools();
        let intent = tools
            .call(
                CREATE_INTENT_MANDATE,
                &json!({"userIntent": "Buy Galaxy S24 Ultra", "maxBudget": 150000, "preferredPlatform": "Amazon India"}),
            )
            .unwrap();
        let intent_id = intent.produced_id.unwrap();

        let cart = tools
            .call(
                CREATE_CART_MANDATE,
                &json!({"intentMandateId": &intent_id, "productId": "AMZ-S24U-256", "quantity": 1}),
            )
            .unwrap();
        assert!(cart.ok);
        assert_eq!(cart.state, Some(ChainState::CartCreated));
        assert!(!cart.text.contains("⚠️"));
        assert_eq!(cart.data["totalAmount"], json!("129999"));
        let cart_id = cart.produced_id.unwrap();

        let paid = tools
            .call(
                PROCESS_PAYMENT,
                &json!({
                    "cartMandateId": &cart_id,
                    "paymentMethod": "upi",
                    "customerName": "Asha Rao",
                    "deliveryAddress": "12 MG Road, Bengaluru 560001"
                }),
            )
            .unwrap();
        assert!(paid.ok);
        assert_eq!(paid.state, Some(ChainState::Paid));
        assert_eq!(paid.data["status"], json!("COMPLETED"));
        assert!(paid.text.contains("₹129,999"));
        let txn_id = paid.produced_id.unwrap();
        let order_id = paid.data["orderId"].as_str().unwrap().to_string();

        let status = tools
            .call(CHECK_ORDER_STATUS, &json!({"orderId": &txn_id}))
            .unwrap();
        assert!(status.ok);
        assert!(status.text.contains(&intent_id));

        let order = tools.check_order_status(&order_id);
        assert!(order.ok);
        assert!(order.text.contains("CONFIRMED"));
    }

    #[test]
    fn test_over_budget_cart_warns_in_summary() {
        let tools = tools();
        let intent = tools.create_intent_mandate("x", Decimal::from(100_000), None);
        let cart = tools.create_cart_mandate(
            intent.produced_id.as_deref().unwrap(),
            "AMZ-S24U-256",
            NonZeroU32::MIN,
        );
        assert!(cart.ok);
        assert!(cart.text.contains("⚠️ Total exceeds the intent budget by ₹29,999"));
    }

    #[test]
    fn test_cart_against_most_negative_budget() {
        let tools = tools();
        let intent = tools
            .call(
                CREATE_INTENT_MANDATE,
                &json!({"userIntent": "x", "maxBudget": "-79228162514264337593543950335"}),
            )
            .unwrap();
        let intent_id = intent.produced_id.unwrap();

        let cart = tools
            .call(
                CREATE_CART_MANDATE,
                &json!({"intentMandateId": &intent_id, "productId": "AMZ-S24U-256", "quantity": 1}),
            )
            .unwrap();
        assert!(cart.ok);
        assert!(cart
            .text
            .contains("⚠️ Total exceeds the intent budget by ₹79,228,162,514,264,337,593,543,950,335"));
    }

    #[test]
    fn test_rejections_are_outputs() {
        let tools = tools();
        let cart = tools.create_cart_mandate("IM-DEADBEEF", "AMZ-S24U-256", NonZeroU32::MIN);
        assert!(!cart.ok);
        assert_eq!(cart.state, Some(ChainState::Failed));
        assert_eq!(cart.data["code"], json!("E_CHAIN_BROKEN"));
        assert!(cart.text.starts_with("❌"));

        let paid = tools.process_payment("CM-UNKNOWN", "UPI", "a", "b");
        assert!(!paid.ok);
        assert!(paid.produced_id.is_none());
        assert_eq!(paid.data["transactionId"], json!("NONE"));
        assert_eq!(paid.text, "❌ PAYMENT FAILED\n   Reason: Cart Mandate not found");
    }

    #[test]
    fn test_lookups() {
        let tools = tools();
        let product = tools.get_product_details("AMZ-S24U-256");
        assert!(product.ok);
        assert!(product.text.contains("AMZ-S24U-256"));

        assert!(!tools.get_product_details("NO-SUCH-PRODUCT").ok);
        assert!(!tools.check_order_status("TXN-000000000000").ok);
        assert!(!tools.check_order_status("ORD-000000000000").ok);
    }
}
