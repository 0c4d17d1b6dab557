//! Service configuration.
//!
//! Resolution order: built-in defaults, then an optional YAML file, then
//! `AP2_*` environment variables.

use crate::mandate::PaymentMethod;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_CURRENCY: &str = "AP2_CURRENCY";
pub const ENV_CURRENCY_SYMBOL: &str = "AP2_CURRENCY_SYMBOL";
pub const ENV_PAYMENT_METHODS: &str = "AP2_PAYMENT_METHODS";
pub const ENV_CATALOG_PATH: &str = "AP2_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ap2Config {
    /// ISO currency code used in summaries
    pub currency: String,

    pub currency_symbol: String,

    /// Methods accepted at payment time
    pub payment_methods: Vec<PaymentMethod>,

    /// YAML catalog replacing the bundled fixture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for Ap2Config {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            payment_methods: PaymentMethod::ALL.to_vec(),
            catalog_path: None,
        }
    }
}

impl Ap2Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).context("failed to parse config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from `path` (if any), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => {
                let yaml = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config {}", p.display()))?;
                Self::from_yaml_str(&yaml)
                    .with_context(|| format!("invalid config {}", p.display()))?
            }
            None => Self::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Empty values are ignored.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_CURRENCY) {
            self.currency = v.trim().to_string();
        }
        if let Some(v) = get(ENV_CURRENCY_SYMBOL) {
            self.currency_symbol = v;
        }
        if let Some(v) = get(ENV_PAYMENT_METHODS) {
            self.payment_methods = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<PaymentMethod>())
                .collect::<Result<_, _>>()
                .with_context(|| format!("invalid {ENV_PAYMENT_METHODS}"))?;
        }
        if let Some(v) = get(ENV_CATALOG_PATH) {
            self.catalog_path = Some(PathBuf::from(v));
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            bail!("currency must not be empty");
        }
        if self.payment_methods.is_empty() {
            bail!("payment_methods must list at least one method");
        }
        Ok(())
    }

    pub fn accepts(&self, method: PaymentMethod) -> bool {
        self.payment_methods.contains(&method)
    }
}
