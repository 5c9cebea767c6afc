//! CLI entrypoint for toolrelay
//!
//! This is the main binary that wires together all layers using
//! dependency injection. Responses go to stdout as JSON; logs and filler
//! messages go to stderr.

mod commands;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use toolrelay_application::{FillerNotifier, ToolDispatcherPort};
use toolrelay_domain::ToolCall;
use toolrelay_infrastructure::{
    CatalogDeps, ConfigLoader, FileConfig, JsonlInvocationLogger, ToolRegistry, build_registry,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{Cli, Command, parse_assignment};

/// Prints filler messages to stderr while a tool runs
struct ConsoleFiller;

impl FillerNotifier for ConsoleFiller {
    fn on_filler(&self, _tool_name: &str, text: &str) {
        eprintln!("{}", text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("A command is required. Run with --help for usage.");
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    info!("Starting toolrelay");

    // === Dependency Injection ===
    let registry = build_catalog(&config, cli.quiet)?;

    match command {
        Command::List => {
            let tools: Vec<_> = registry.catalog().all().collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Command::Call { tool, args } => {
            let definition = registry.get_tool(&tool);
            let mut call = ToolCall::new(&tool);
            for raw in &args {
                let Some((key, value)) = parse_assignment(raw, |key| {
                    definition
                        .and_then(|d| d.parameter(key))
                        .map(|p| p.param_type)
                }) else {
                    bail!("Invalid argument '{}', expected KEY=VALUE", raw);
                };
                call = call.with_arg(key, value);
            }
            dispatch_and_print(&registry, &call).await?;
        }
        Command::Request { json } => {
            let body = if json == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read request from stdin")?;
                buf
            } else {
                json
            };
            let call: ToolCall =
                serde_json::from_str(&body).context("Request is not a valid ToolCall")?;
            dispatch_and_print(&registry, &call).await?;
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Build the registry and register the full catalog
fn build_catalog(config: &FileConfig, quiet: bool) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new().with_filler_overrides(config.catalog.fillers.clone());

    if !quiet {
        registry = registry.with_filler_notifier(Arc::new(ConsoleFiller));
    }

    if let Some(path) = &config.logging.invocation_log {
        match JsonlInvocationLogger::new(path) {
            Some(logger) => registry = registry.with_invocation_logger(Arc::new(logger)),
            None => warn!("Invocation log disabled: could not open {}", path),
        }
    }

    let deps = CatalogDeps::from_config(config).context("Failed to create HTTP client")?;
    Ok(build_registry(registry, deps)?)
}

async fn dispatch_and_print(registry: &ToolRegistry, call: &ToolCall) -> Result<()> {
    let response = registry.dispatch(call).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
