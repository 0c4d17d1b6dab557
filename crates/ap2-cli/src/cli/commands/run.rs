//! Execute a script of tool calls.
//!
//! ```yaml
//! - tool: createIntentMandate
//!   args: { userIntent: "Buy Galaxy S24", maxBudget: 80000, preferredPlatform: Any }
//! - tool: createCartMandate
//!   args: { intentMandateId: $intent, productId: FK-S24-128, quantity: 1 }
//! ```
//!
//! `$intent`, `$cart`, `$txn` and `$order` resolve to the most recent IDs
//! produced by earlier steps.

use super::super::args::RunArgs;
use super::{build_tools, emit};
use crate::exit_codes::{SUCCESS, TOOL_FAILED};
use ap2_core::tools::{ToolOutput, CREATE_CART_MANDATE, CREATE_INTENT_MANDATE, PROCESS_PAYMENT};
use ap2_core::Ap2Config;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub tool: String,
    #[serde(default)]
    pub args: Value,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_yaml::from_str(&yaml).with_context(|| format!("invalid script {}", path.display()))
}

/// Most recent IDs, keyed by variable name without the `$`.
#[derive(Debug, Default)]
struct Bindings(HashMap<&'static str, String>);

impl Bindings {
    fn record(&mut self, output: &ToolOutput) {
        let Some(id) = &output.produced_id else {
            return;
        };
        let name = match output.tool {
            CREATE_INTENT_MANDATE => "intent",
            CREATE_CART_MANDATE => "cart",
            PROCESS_PAYMENT => "txn",
            _ => return,
        };
        self.0.insert(name, id.clone());
        if let Some(order_id) = output.data.get("orderId").and_then(Value::as_str) {
            self.0.insert("order", order_id.to_string());
        }
    }

    fn substitute(&self, value: &Value) -> Result<Value> {
        Ok(match value {
            Value::String(s) => match s.strip_prefix('$') {
                Some(name) => Value::String(
                    self.0
                        .get(name)
                        .cloned()
                        .with_context(|| format!("'{s}' is not bound by an earlier step"))?,
                ),
                None => value.clone(),
            },
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.substitute(v))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), self.substitute(v)?)))
                    .collect::<Result<_>>()?,
            ),
            other => other.clone(),
        })
    }
}

pub fn run(cfg: &Ap2Config, args: RunArgs) -> Result<i32> {
    let steps = load_script(&args.script)?;
    if steps.is_empty() {
        bail!("script {} has no steps", args.script.display());
    }

    let tools = build_tools(cfg)?;
    let mut bindings = Bindings::default();
    let mut rejected = 0usize;

    for (i, step) in steps.iter().enumerate() {
        let step_no = i + 1;
        let call_args = bindings
            .substitute(&step.args)
            .with_context(|| format!("step {step_no} ({})", step.tool))?;
        let output = tools
            .call(&step.tool, &call_args)
            .with_context(|| format!("step {step_no} ({})", step.tool))?;

        emit(&output, args.json)?;
        bindings.record(&output);

        if !output.ok {
            rejected += 1;
            warn!(step = step_no, tool = %step.tool, "step rejected");
            if !args.keep_going {
                return Ok(TOOL_FAILED);
            }
        }
    }

    info!(steps = steps.len(), rejected, "script finished");
    Ok(if rejected == 0 { SUCCESS } else { TOOL_FAILED })
}
