//! Vote ledger node
//!
//! One process per instance. Wires the persistent store, the ledger core,
//! replication, and the REST surface, then runs until Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use poa_consensus::ValidatorAuthority;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vote_api::HttpServer;
use vote_ledger::{Ledger, LedgerConfig, SledStore};
use vote_replication::ReplicationManager;

mod config;

use config::NodeConfig;

/// Proof-of-authority vote ledger node
#[derive(Parser, Debug)]
#[command(name = "voteledger")]
#[command(about = "Append-only vote ledger with proof-of-authority block creation", long_about = None)]
struct Args {
    /// Optional JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP bind address
    #[arg(long)]
    rpc_addr: Option<String>,

    /// Data directory for the persistent store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Validator identity, repeatable, in rotation order
    #[arg(long = "authority")]
    authorities: Vec<String>,

    /// Peer base URL, repeatable (e.g. http://127.0.0.1:3002)
    #[arg(long = "peer")]
    peers: Vec<String>,

    /// Pending votes per block
    #[arg(long)]
    batch_threshold: Option<usize>,

    /// Whole-chain read budget in milliseconds
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn resolve_config(args: &Args) -> Result<NodeConfig> {
    let mut config = match &args.config {
        Some(path) => NodeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NodeConfig::default(),
    };
    if let Some(rpc_addr) = &args.rpc_addr {
        config.rpc_addr = rpc_addr.clone();
    }
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if !args.authorities.is_empty() {
        config.authorities = args.authorities.clone();
    }
    if !args.peers.is_empty() {
        config.peers = args.peers.clone();
    }
    if let Some(batch_threshold) = args.batch_threshold {
        config.batch_threshold = batch_threshold;
    }
    if let Some(read_timeout_ms) = args.read_timeout_ms {
        config.read_timeout_ms = read_timeout_ms;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resolve_config(&args)?;

    tracing::info!("Starting vote ledger node");
    tracing::info!("  HTTP: {}", config.rpc_addr);
    tracing::info!("  Data directory: {:?}", config.data_dir);
    tracing::info!("  Authorities: {:?}", config.authorities);
    tracing::info!("  Peers: {:?}", config.peers);
    tracing::info!("  Batch threshold: {}", config.batch_threshold);

    std::fs::create_dir_all(&config.data_dir)?;
    let store = Arc::new(SledStore::open(config.data_dir.join("ledger"))?);

    let authority = ValidatorAuthority::new(config.authorities.clone());
    let ledger_config = LedgerConfig {
        batch_threshold: config.batch_threshold,
        read_timeout: Duration::from_millis(config.read_timeout_ms),
    };
    let ledger = Arc::new(
        Ledger::open(store.clone(), authority, ledger_config)
            .await
            .context("failed to open ledger")?,
    );
    tracing::info!("Ledger open at height {}", ledger.chain_height());

    let replication = Arc::new(ReplicationManager::new(
        ledger.clone(),
        config.peers.clone(),
        Duration::from_millis(config.peer_timeout_ms),
    ));

    // Best effort: an unreachable peer never stops the node.
    if replication.has_peers() {
        replication.bootstrap().await;
    }

    let subscriber = tokio::spawn(replication.clone().run());

    let server = HttpServer::new(ledger.clone(), replication);
    let rpc_addr = config.rpc_addr.clone();
    let http = tokio::spawn(async move {
        if let Err(e) = server.run(&rpc_addr).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tracing::info!("Node running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    http.abort();
    subscriber.abort();
    store.flush()?;
    tracing::info!("Node stopped at height {}", ledger.chain_height());

    Ok(())
}
