//! Event tables of the protocols hyperquery ships with.
//!
//! Every table maps an event name to its [`EventConfig`]. The tables are plain data: the
//! events carry no contract, so they match any emitter unless one is set with
//! [`EventConfig::with_contract`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use hyperquery_types::{DataType, EventConfig};

pub mod across;
pub mod mev_commit;
pub mod stargate;
pub mod uniswap_v3;

/// Table of events keyed by name.
pub type EventTable = BTreeMap<&'static str, EventConfig>;

/// Event with the common transaction and block mappings and the given decoded columns.
pub(crate) fn event(name: &str, signature: &str, decoded_log: &[(&str, DataType)]) -> EventConfig {
    EventConfig::new(name, signature).with_decoded_log(decoded_log.iter().copied())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Across,
    MevCommit,
    Stargate,
    UniswapV3,
}

impl Protocol {
    pub const ALL: &'static [Protocol] = &[
        Protocol::Across,
        Protocol::MevCommit,
        Protocol::Stargate,
        Protocol::UniswapV3,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Protocol::Across => "across",
            Protocol::MevCommit => "mev-commit",
            Protocol::Stargate => "stargate",
            Protocol::UniswapV3 => "uniswap-v3",
        }
    }

    pub fn events(&self) -> &'static EventTable {
        match self {
            Protocol::Across => &across::EVENTS,
            Protocol::MevCommit => &mev_commit::EVENTS,
            Protocol::Stargate => &stargate::EVENTS,
            Protocol::UniswapV3 => &uniswap_v3::EVENTS,
        }
    }

    /// Looks up an event of the protocol by name.
    pub fn event(&self, name: &str) -> Result<&'static EventConfig, ProtocolError> {
        self.events()
            .get(name)
            .ok_or_else(|| ProtocolError::UnknownEvent {
                protocol: *self,
                event: name.to_string(),
            })
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");

        match normalized.as_str() {
            "across" => Ok(Protocol::Across),
            "mev-commit" | "mevcommit" => Ok(Protocol::MevCommit),
            "stargate" => Ok(Protocol::Stargate),
            "uniswap-v3" | "uniswap" | "univ3" => Ok(Protocol::UniswapV3),
            _ => Err(ProtocolError::UnknownProtocol(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("protocol {protocol} has no event {event}")]
    UnknownEvent { protocol: Protocol, event: String },
}
