//! CLI command definitions

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use toolrelay_domain::ParamType;

/// CLI arguments for toolrelay
#[derive(Parser, Debug)]
#[command(name = "toolrelay")]
#[command(author, version, about = "Tool-invocation runtime for conversational agents")]
#[command(long_about = r#"
toolrelay serves a small catalog of tools to a conversational agent host.
Each call is dispatched to its handler, a "please wait" filler is announced
while it runs, and the answer is printed as a JSON ToolResponse.

Configuration files are loaded from (in priority order):
1. TOOLRELAY_* environment variables (e.g. TOOLRELAY_TIMEOUTS__PROBE_MS)
2. --config <path>     Explicit config file
3. ./toolrelay.toml    Project-level config
4. ~/.config/toolrelay/config.toml   Global config

Example:
  toolrelay list
  toolrelay call check_inventory -a sku=WIDGET-1
  toolrelay call calculate_shipping -a zip_code=90210 -a weight=2.5
  echo '{"tool_name":"get_shipping_zone","arguments":{"zip_code":"10001"}}' | toolrelay request -
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress filler messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tool catalog as JSON
    List,

    /// Invoke one tool with key=value arguments
    Call {
        /// Tool name (e.g. check_inventory)
        tool: String,

        /// Argument as key=value (can be specified multiple times)
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,
    },

    /// Dispatch a raw ToolCall JSON object ("-" reads stdin)
    Request {
        /// `{"tool_name": ..., "arguments": {...}}`
        json: String,
    },
}

/// Split `key=value`, converting the value according to the declared type.
///
/// String parameters (and unknown ones) keep the raw text so that zip codes
/// like `02134` survive. Other types are parsed as JSON, falling back to the
/// raw text, which the dispatcher then reports as a type mismatch.
pub fn parse_assignment(
    raw: &str,
    param_type: impl Fn(&str) -> Option<ParamType>,
) -> Option<(String, Value)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = match param_type(key) {
        Some(ParamType::String) | None => Value::String(value.to_string()),
        Some(_) => serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string())),
    };
    Some((key.to_string(), value))
}
