use crate::logging::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ap2",
    version,
    about = "AP2 mandate chain: intent, cart and payment mandates with chain-verified authorization"
)]
pub struct Cli {
    /// YAML config file (AP2_* environment variables override it)
    #[arg(long, global = true, env = "AP2_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the end-to-end purchase scenario and the failure scenarios
    Demo(DemoArgs),
    /// Execute a YAML script of tool calls against one service
    Run(RunArgs),
    /// List catalog products
    Catalog(CatalogArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args, Clone)]
pub struct DemoArgs {
    /// Print tool outputs as JSON lines instead of text summaries
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Script file: a YAML list of `{tool, args}` steps
    pub script: PathBuf,

    /// Print tool outputs as JSON lines instead of text summaries
    #[arg(long)]
    pub json: bool,

    /// Keep executing after a step is rejected
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Args, Clone)]
pub struct CatalogArgs {
    /// Only list products on this platform
    #[arg(long)]
    pub platform: Option<String>,
}
