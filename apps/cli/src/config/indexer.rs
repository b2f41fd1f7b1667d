use hyperquery_types::Network;
use indexer_client::{ClientConfig, DEFAULT_TIMEOUT_SECONDS};
use serde::{Deserialize, Serialize};

/// Endpoint to query. An explicit `url` takes precedence over `network`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct IndexerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: None,
            network: None,
            bearer_token: None,
            timeout: default_timeout(),
        }
    }
}

impl IndexerConfig {
    /// Client settings for the configured endpoint. A `network` given here replaces the
    /// configured endpoint but keeps the token and timeout.
    pub fn client_config(&self, network: Option<Network>) -> ClientConfig {
        let url = match (network, &self.url, self.network) {
            (Some(network), _, _) => network.url(),
            (None, Some(url), _) => url.clone(),
            (None, None, Some(network)) => network.url(),
            (None, None, None) => Network::EthereumMainnet.url(),
        };

        ClientConfig {
            url,
            bearer_token: self.bearer_token.clone(),
            timeout_secs: self.timeout,
        }
    }
}
