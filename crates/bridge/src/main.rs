//! CLI entry point: aggregate tool descriptors and print them as JSON.

use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use trestle_bridge::aggregator::ToolCatalog;
use trestle_bridge::config::BridgeConfig;
use trestle_bridge::discovery::StaticDirectory;
use trestle_bridge::transport::HttpSpecTransport;
use trestle_openapi_tools::config::ExtractOptions;
use trestle_openapi_tools::document::OpenApiDocument;
use trestle_openapi_tools::extract::{ToolDescriptor, extract_tools};

#[derive(Parser, Debug)]
#[command(name = "trestle-bridge", about = "Aggregate backend OpenAPI documents into a tool catalog", version)]
struct Cli {
    /// Path to the bridge YAML configuration
    #[arg(long, env = "TRESTLE_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Extract from a single local OpenAPI document (JSON or YAML) instead
    /// of the configured registry
    #[arg(long, conflicts_with = "config")]
    spec: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Default log filter (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the catalog JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let tools = match (&cli.config, &cli.spec) {
        (Some(config_path), None) => catalog_tools(config_path).await?,
        (None, Some(spec_path)) => local_tools(spec_path)?,
        (None, None) => anyhow::bail!("either --config or --spec is required"),
        (Some(_), Some(_)) => unreachable!("clap rejects --config with --spec"),
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&tools)?
    } else {
        serde_json::to_string(&tools)?
    };
    println!("{output}");

    Ok(())
}

async fn catalog_tools(config_path: &PathBuf) -> anyhow::Result<Vec<ToolDescriptor>> {
    let config = BridgeConfig::load(config_path)?;

    let directory = StaticDirectory::new(config.servers.clone());
    let transport = HttpSpecTransport::new(
        config.registry.base_url.clone(),
        config.registry.fetch_timeout(),
    );
    let catalog = ToolCatalog::new(
        Arc::new(directory),
        Arc::new(transport),
        config.extraction.clone(),
    );

    Ok(catalog.all_tools().await?)
}

fn local_tools(spec_path: &PathBuf) -> anyhow::Result<Vec<ToolDescriptor>> {
    let text = std::fs::read_to_string(spec_path)
        .with_context(|| format!("read spec '{}'", spec_path.display()))?;
    let document = OpenApiDocument::parse(&text)
        .with_context(|| format!("parse spec '{}'", spec_path.display()))?;

    let server = spec_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("local");

    Ok(extract_tools(server, &document, &ExtractOptions::default())?)
}
