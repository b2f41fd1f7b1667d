use std::path::PathBuf;

use color_eyre::eyre::{self, Context as EyreContext};
use hyperquery_manager::HyperManager;
use hyperquery_types::Network;

use crate::config::Config;

/// Context is a struct which holds all information that could be used globally, like info from
/// configuration file. All the data taken from context is evaluated lazily, so it's not a problem
/// to create it once and use it everywhere.
pub struct Context {
    /// Stored path to configuration file, to lazy load it when needed.
    config_path: PathBuf,

    /// Network passed on the command line, replaces the endpoint of the config.
    network: Option<Network>,

    /// Loaded configuration file.
    config: Option<Config>,

    /// Manager of the configured endpoint.
    manager: Option<HyperManager>,
}

impl Context {
    pub fn new(config: PathBuf, network: Option<Network>) -> Self {
        Self {
            config_path: config,
            network,
            config: None,
            manager: None,
        }
    }

    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// Loads the configuration file. A missing file means the defaults.
    pub fn config(&mut self) -> eyre::Result<Config> {
        if let Some(config) = &self.config {
            return Ok(config.clone());
        }

        let cfg = if self.config_path.exists() {
            Config::from_path(self.config_path.clone()).wrap_err("Failed to load config")?
        } else {
            Config::default()
        };

        self.config = Some(cfg.clone());

        Ok(cfg)
    }

    /// Manager of the endpoint selected by `--network` or the configuration file.
    pub fn manager(&mut self) -> eyre::Result<HyperManager> {
        if let Some(manager) = &self.manager {
            return Ok(manager.clone());
        }

        let config = self.config()?.manager_config(self.network);
        let manager = HyperManager::from_config(&config)?;

        self.manager = Some(manager.clone());

        Ok(manager)
    }

    /// Manager of the endpoint of `network`, with the token, timeout and output settings
    /// of the configuration file.
    pub fn manager_for(&mut self, network: Network) -> eyre::Result<HyperManager> {
        let config = self.config()?.manager_config(Some(network));

        Ok(HyperManager::from_config(&config)?)
    }
}
