use std::path::PathBuf;

use hyperquery_types::Network;
use indexer_client::ClientConfig;
use serde::{Deserialize, Serialize};

/// Directory results are saved to by default.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    pub indexer: ClientConfig,
    /// Saved results go to `{output_dir}/{network}/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Log how long every query takes.
    #[serde(default = "default_print_time")]
    pub print_time: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_print_time() -> bool {
    true
}

impl ManagerConfig {
    pub fn new(indexer: ClientConfig) -> Self {
        Self {
            indexer,
            output_dir: default_output_dir(),
            print_time: default_print_time(),
        }
    }

    /// Config of the HyperSync endpoint of `network`.
    pub fn for_network(network: Network) -> Self {
        Self::new(ClientConfig::new(network.url()))
    }

    /// Label of the endpoint used in output paths: the network name for known
    /// endpoints, otherwise the first label of the host.
    pub fn network_label(&self) -> String {
        network_label(&self.indexer.url)
    }
}

pub(crate) fn network_label(url: &str) -> String {
    if let Some(network) = Network::from_url(url) {
        return network.name().to_string();
    }

    let host = url
        .split_once("://")
        .map_or(url, |(_, rest)| rest)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();

    match host.split('.').next() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => "custom".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_label() {
        assert_eq!(network_label("https://eth.hypersync.xyz"), "eth");
        assert_eq!(network_label("https://base.hypersync.xyz/"), "base");
        assert_eq!(network_label("http://localhost:1131/query"), "localhost");
        assert_eq!(network_label("https://my-node.example.com"), "my-node");
        assert_eq!(network_label(""), "custom");
    }

    #[test]
    fn test_defaults() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"indexer": {"url": "https://optimism.hypersync.xyz"}}"#)
                .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert!(config.print_time);
        assert_eq!(config.network_label(), "optimism");
        assert_eq!(ManagerConfig::for_network(Network::Optimism), config);
    }
}
