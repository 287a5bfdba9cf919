//! CLI binary for sift.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sift::{AppConfig, Tool, WebSearchTool};
use tokio_util::sync::CancellationToken;

/// Sift: web search with ordered engine fallback.
#[derive(Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Path to TOML configuration file (default: ~/.config/sift/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of results to request from each engine.
    #[arg(short = 'n', long, default_value_t = sift_search::DEFAULT_NUM_RESULTS)]
    num_results: usize,

    /// Print the structured outcome as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Preferred engine, overriding the configuration file.
    #[arg(short, long)]
    engine: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Search query.
    #[arg(required = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    sift::logging::init(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(engine) = cli.engine {
        config.search.engine = Some(engine);
    }

    let tool = WebSearchTool::with_config(config.search);
    let args = serde_json::json!({
        "query": cli.query.join(" "),
        "num_results": cli.num_results,
    });

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling search");
            ctrl_c.cancel();
        }
    });

    let result = tokio::select! {
        result = tool.execute(args) => result?,
        () = cancel.cancelled() => anyhow::bail!("search cancelled"),
    };

    if cli.json {
        let data = result.structured_data.unwrap_or(serde_json::Value::Null);
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{}", result.output);
    }
    Ok(())
}
