use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::metadata::Level;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    #[serde(
        default = "default_level",
        deserialize_with = "deserialize_level",
        serialize_with = "serialize_level"
    )]
    pub level: Level,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;

    Level::from_str(&s).map_err(serde::de::Error::custom)
}

fn serialize_level<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(level)
}

fn default_level() -> Level {
    Level::INFO
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
