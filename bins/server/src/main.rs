//! Amparo API Server
//!
//! Main entry point for the Amparo backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amparo_api::{AppState, create_router};
use amparo_core::contracts::{ContractRegistry, ContractSet, DeploymentManifest};
use amparo_core::{Aggregator, Upstreams};
use amparo_shared::AppConfig;
use amparo_upstream::{ChainClient, DexClient, ImpactClient, IndexerClient, ReinsuranceClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amparo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;
    let chain_id = config.chain.chain_id;

    // Resolve contract addresses: defaults, then manifest, then overrides
    let contracts = resolve_contracts(&config)?;
    if contracts.is_deployed() {
        info!(chain_id, "Contracts configured");
    } else {
        tracing::warn!(chain_id, "Contracts incomplete, reads will use fallbacks");
    }

    // Upstream clients
    let chain = ChainClient::from_config(&config.chain, contracts.clone())?;
    let partners = &config.partners;
    let upstreams = Upstreams {
        chain: Arc::new(chain),
        indexer: Arc::new(IndexerClient::new(&partners.indexer)?),
        reinsurance: Arc::new(ReinsuranceClient::new(&partners.reinsurance)?),
        impact: Arc::new(ImpactClient::new(&partners.impact)?),
    };
    let dex = DexClient::new(&partners.dex, chain_id)?;
    info!(rpc_url = %config.chain.rpc_url, dex = %partners.dex.base(), "Upstream clients ready");

    let aggregator = Aggregator::new(upstreams).with_block_time_ms(config.chain.block_time_ms);

    // Create application state
    let shutdown = CancellationToken::new();
    let state = AppState {
        aggregator: Arc::new(aggregator),
        dex: Arc::new(dex),
        contracts: Arc::new(contracts),
        platform_tag: Arc::from(config.platform_tag.as_str()),
        shutdown: shutdown.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

fn resolve_contracts(config: &AppConfig) -> anyhow::Result<ContractSet> {
    let chain_id = config.chain.chain_id;
    let mut registry = ContractRegistry::with_defaults();

    if let Some(path) = config.contracts.manifest_path.as_deref() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deployment manifest {path}"))?;
        let manifest = DeploymentManifest::from_json(&raw)?;
        registry.apply_manifest(&manifest)?;
        info!(path, network_chain_id = manifest.chain_id, "Deployment manifest applied");
    }

    registry.apply_overrides(chain_id, &config.contracts.overrides())?;

    Ok(registry
        .get(chain_id)
        .cloned()
        .unwrap_or_else(|| ContractSet::new(chain_id)))
}

/// Waits for Ctrl-C, then cancels every in-flight request.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown requested");
    shutdown.cancel();
}
