use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use nexus_agent::longcat::LongCatProvider;
use tracing::{info, warn};

mod app;
mod http;

/// Relay server between the Nexus chat UI and the LongCat chat API.
#[derive(Debug, Parser)]
#[command(name = "nexus-gateway", version)]
struct Cli {
    /// Path to nexus.toml (falls back to NEXUS_CONFIG, then ~/.nexus/nexus.toml).
    #[arg(long)]
    config: Option<String>,

    /// Override gateway.bind.
    #[arg(long)]
    bind: Option<String>,

    /// Override gateway.port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nexus_gateway=info,nexus_agent=info,tower_http=debug".into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > NEXUS_CONFIG env > ~/.nexus/nexus.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("NEXUS_CONFIG").ok());
    let mut config = nexus_core::config::NexusConfig::load_or_default(config_path.as_deref());

    if let Some(bind) = cli.bind {
        config.gateway.bind = bind;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    if config.upstream.api_key.is_none() {
        warn!(
            "{} is not set, upstream calls will be rejected",
            nexus_core::config::API_KEY_ENV
        );
    }

    let provider = LongCatProvider::from_config(&config.upstream);
    info!(
        url = %provider.url(),
        model = nexus_core::config::UPSTREAM_MODEL,
        "upstream provider ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;

    let state = Arc::new(app::AppState::new(config, Box::new(provider)));
    let router = app::build_router(state);

    info!(
        git_sha = env!("NEXUS_GIT_SHA"),
        "Nexus gateway listening on http://{}", addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
