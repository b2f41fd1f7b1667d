use std::path::PathBuf;

use color_eyre::eyre;
use hyperquery_manager::ManagerConfig;
use hyperquery_types::Network;
use serde::{Deserialize, Serialize};

mod indexer;
pub use indexer::IndexerConfig;

mod logger;
pub use logger::LoggerConfig;

mod output;
pub use output::OutputConfig;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logger: LoggerConfig,
}

impl Config {
    pub fn from_path(path: PathBuf) -> eyre::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Manager settings for the endpoint of the config, or of `network` when it is set.
    pub fn manager_config(&self, network: Option<Network>) -> ManagerConfig {
        ManagerConfig {
            indexer: self.indexer.client_config(network),
            output_dir: self.output.dir.clone(),
            print_time: self.output.print_time,
        }
    }

    /// Serialize and save configuration to a file specified in `path`.
    pub fn save_to_file(&self, path: PathBuf) -> eyre::Result<()> {
        let serialized = toml::to_string_pretty(&self)?;

        std::fs::write(path, serialized)?;

        Ok(())
    }
}
