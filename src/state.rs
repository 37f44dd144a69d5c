use std::sync::Arc;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::db::Store;

/// Build a shared HTTP client with reasonable defaults for TMDB calls.
/// Reused across all requests to enable connection pooling and avoid socket
/// exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("CineLog/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tmdb: Arc<TmdbClient>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::new(&config.general.database_path).await?;

        let http_client = build_shared_http_client(config.tmdb.request_timeout_seconds)?;
        let tmdb = Arc::new(TmdbClient::new(http_client, config.tmdb.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            tmdb,
        })
    }
}
