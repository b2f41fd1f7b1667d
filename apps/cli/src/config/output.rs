use std::path::PathBuf;

use hyperquery_manager::DEFAULT_OUTPUT_DIR;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory saved results are written under, one subdirectory per network.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_print_time")]
    pub print_time: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_print_time() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            print_time: default_print_time(),
        }
    }
}
