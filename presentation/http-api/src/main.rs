//! TwinScale-Lite API server

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twinscale_adapter_in_memory::InMemoryStore;
use twinscale_core::tenant::TenantManager;
use twinscale_core::traits::{PresentationAdapter, TwinStore};
use twinscale_http_api::config::ServerConfig;
use twinscale_http_api::HttpApi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;
    let api = HttpApi::new(config.api_config()?);

    let store = Arc::new(InMemoryStore::new());

    info!("Starting TwinScale-Lite API");
    api.start(store.clone() as Arc<dyn TwinStore>, store as Arc<dyn TenantManager>)
        .await?;

    Ok(())
}
