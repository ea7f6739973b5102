//! Shared initialization for the MCP server.

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::client::{SpotifyClient, WebApiClient};
use crate::config::Config;

/// Application context: resolved configuration plus the account client.
pub struct AppContext {
    pub config: Config,
    pub client: Arc<dyn SpotifyClient + Send + Sync>,
}

impl AppContext {
    /// Connect the Web API client described by `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let Some(token) = config.access_token.clone() else {
            bail!(
                "No Spotify access token configured. \
                 Set SPOTIFY_ACCESS_TOKEN or access_token in the config file."
            );
        };

        tracing::info!("Using Spotify Web API at {}", config.api_base_url);
        if let Some(market) = &config.market {
            tracing::info!("Catalog market: {}", market);
        }

        let client: Arc<dyn SpotifyClient + Send + Sync> = Arc::new(WebApiClient::new(
            token,
            config.api_base_url.clone(),
            config.market.clone(),
            config.request_timeout(),
        )?);

        Ok(Self { config, client })
    }
}
