//! Scripted walk through the mandate chain.
//!
//! One successful purchase, then the three rejections every integration
//! should handle: unknown cart, unknown product and unknown intent.

use super::super::args::DemoArgs;
use super::{build_tools, emit};
use crate::exit_codes::{SUCCESS, TOOL_FAILED};
use ap2_core::tools::ToolOutput;
use ap2_core::Ap2Config;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::num::NonZeroU32;
use tracing::{error, info};

const PRODUCT_ID: &str = "AMZ-S24U-256";
const CUSTOMER: &str = "Asha Rao";
const ADDRESS: &str = "12 MG Road, Bengaluru 560001";

pub fn run(cfg: &Ap2Config, args: DemoArgs) -> Result<i32> {
    let tools = build_tools(cfg)?;
    let mut unexpected = 0;
    let mut check = |output: &ToolOutput, expect_ok: bool| -> Result<()> {
        emit(output, args.json)?;
        if output.ok != expect_ok {
            error!(tool = output.tool, ok = output.ok, "unexpected demo outcome");
            unexpected += 1;
        }
        Ok(())
    };

    // Success path
    let intent = tools.create_intent_mandate(
        "Buy Samsung Galaxy S24 Ultra 256GB from Amazon India",
        Decimal::from(150_000),
        Some("Amazon India"),
    );
    check(&intent, true)?;
    let intent_id = intent
        .produced_id
        .clone()
        .context("intent mandate has no id")?;

    let cart = tools.create_cart_mandate(&intent_id, PRODUCT_ID, NonZeroU32::MIN);
    check(&cart, true)?;

    if let Some(cart_id) = &cart.produced_id {
        let payment = tools.process_payment(cart_id, "UPI", CUSTOMER, ADDRESS);
        check(&payment, true)?;
    }

    // Rejections
    check(&tools.process_payment("CM-UNKNOWN", "UPI", CUSTOMER, ADDRESS), false)?;
    check(
        &tools.create_cart_mandate(&intent_id, "NO-SUCH-PRODUCT", NonZeroU32::MIN),
        false,
    )?;
    check(
        &tools.create_cart_mandate("IM-00000000", PRODUCT_ID, NonZeroU32::MIN),
        false,
    )?;

    let stats = tools.service().registry().stats();
    info!(
        intents = stats.intents,
        carts = stats.carts,
        transactions = stats.transactions,
        "demo finished"
    );

    Ok(if unexpected == 0 { SUCCESS } else { TOOL_FAILED })
}
