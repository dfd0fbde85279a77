//! Recall Service - HTTP API for memory-training scores
//!
//! This is the main entry point for the recall service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recall_service::{create_router, AppState, KvBackendKind, ServiceConfig};
use recall_store::{KvStore, MemoryKv, RestKv};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recall=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recall Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        kv_backend = ?config.kv_backend,
        cors_origins = ?config.cors_origins,
        "Service configuration loaded"
    );

    let kv = open_kv(&config)?;

    let state = AppState::new(kv, config.clone());

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the configured key-value backend.
fn open_kv(config: &ServiceConfig) -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
    match config.kv_backend {
        KvBackendKind::Memory => {
            tracing::warn!("Using in-memory store - data is lost on restart");
            Ok(Arc::new(MemoryKv::new()))
        }
        KvBackendKind::Rest => {
            let (Some(url), Some(token)) = (&config.kv_rest_api_url, &config.kv_rest_api_token)
            else {
                return Err("KV_BACKEND=rest requires KV_REST_API_URL and KV_REST_API_TOKEN".into());
            };
            tracing::info!(url = %url, "Using REST key-value store");
            Ok(Arc::new(RestKv::new(url.clone(), token.clone())?))
        }
        KvBackendKind::RocksDb => open_rocks(&config.data_dir),
    }
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocks(data_dir: &str) -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
    tracing::info!(path = %data_dir, "Opening RocksDB store");
    Ok(Arc::new(recall_store::RocksKv::open(data_dir)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocks(_data_dir: &str) -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
    Err("KV_BACKEND=rocksdb requires building with the rocksdb-backend feature".into())
}
