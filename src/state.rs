use crate::config::Config;
use crate::upstream::UpstreamClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::from_config(&config)?;
        Ok(Self {
            upstream,
            config: Arc::new(config),
        })
    }
}
