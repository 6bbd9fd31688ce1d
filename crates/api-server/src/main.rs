//! API Server Binary Entry Point

use anyhow::{Context, Result};
use asset_viz_api_server::config::{default_config_path, load_config, Config, Overrides, ADDR_ENV};
use asset_viz_api_server::{start_server, ApiState, Settings};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "asset-viz-server")]
#[command(about = "3D asset viewer backend - catalog, uploads and Blender conversion")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, e.g. 0.0.0.0:8000
    #[arg(long)]
    addr: Option<String>,

    /// Static asset directory (models are stored in <dir>/models)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Blender executable
    #[arg(long)]
    blender: Option<PathBuf>,

    /// Disable Blender-backed conversion
    #[arg(long)]
    no_convert: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "asset_viz_api_server=info,blender_bridge=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to load config from {}: {:#}. Using defaults.",
                config_path.display(),
                err
            );
            Config::default()
        }
    };

    let overrides = Overrides {
        addr: args.addr,
        static_dir: args.static_dir,
        blender: args.blender,
        no_convert: args.no_convert,
    };
    let settings = Settings::resolve(&config, overrides, std::env::var(ADDR_ENV).ok());

    match &settings.blender {
        Some(runner) => tracing::info!("Blender conversion via {}", runner.binary().display()),
        None => tracing::info!("Blender conversion disabled"),
    }

    let state = ApiState::from_settings(&settings).with_context(|| {
        format!(
            "Failed to create model directory {}",
            settings.models_dir().display()
        )
    })?;

    tracing::info!("Starting 3D asset viewer API server");
    start_server(&settings.addr, state)
        .await
        .with_context(|| format!("Server on {} failed", settings.addr))?;

    Ok(())
}
