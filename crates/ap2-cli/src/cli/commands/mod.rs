use super::args::*;
use ap2_core::catalog::InMemoryCatalog;
use ap2_core::tools::{ToolOutput, ToolSet};
use ap2_core::{Ap2Config, MandateChainService, MandateRegistry};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

pub mod catalog;
pub mod config;
pub mod demo;
pub mod run;

pub fn dispatch(cli: Cli) -> Result<i32> {
    let cfg = Ap2Config::load(cli.config.as_deref())?;
    debug!(currency = %cfg.currency, methods = cfg.payment_methods.len(), "config loaded");

    match cli.cmd {
        Command::Demo(args) => demo::run(&cfg, args),
        Command::Run(args) => run::run(&cfg, args),
        Command::Catalog(args) => catalog::run(&cfg, args),
        Command::Config => config::run(&cfg),
    }
}

pub(crate) fn load_catalog(cfg: &Ap2Config) -> Result<InMemoryCatalog> {
    match &cfg.catalog_path {
        Some(path) => InMemoryCatalog::from_path(path),
        None => InMemoryCatalog::bundled(),
    }
}

/// One service with a fresh registry for this process.
pub(crate) fn build_tools(cfg: &Ap2Config) -> Result<ToolSet> {
    let catalog = load_catalog(cfg).context("failed to load catalog")?;
    let service = MandateChainService::new(MandateRegistry::new(), Arc::new(catalog), cfg.clone());
    Ok(ToolSet::new(Arc::new(service)))
}

pub(crate) fn emit(output: &ToolOutput, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(output)?);
    } else {
        println!("{}\n", output.text);
    }
    Ok(())
}
