use core::{fmt::Display, str::FromStr};

/// Service tier of a HyperSync endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Gold,
    Bronze,
}

impl Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Tier::Gold => write!(f, "gold"),
            Tier::Bronze => write!(f, "bronze"),
        }
    }
}

macro_rules! networks {
    ($($variant:ident => ($name:literal, $chain_id:literal, $tier:ident)),+ $(,)?) => {
        /// Networks served by HyperSync.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Network {
            $($variant),+
        }

        impl Network {
            /// Every known network, in alphabetical order.
            pub const ALL: &'static [Network] = &[$(Network::$variant),+];

            /// Short name of the network, which is also the subdomain of its endpoint.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Network::$variant => $name),+
                }
            }

            pub const fn chain_id(&self) -> u64 {
                match self {
                    $(Network::$variant => $chain_id),+
                }
            }

            pub const fn tier(&self) -> Tier {
                match self {
                    $(Network::$variant => Tier::$tier),+
                }
            }
        }
    };
}

networks! {
    Arbitrum => ("arbitrum", 42161, Gold),
    ArbitrumNova => ("arbitrum-nova", 42170, Gold),
    ArbitrumSepolia => ("arbitrum-sepolia", 421614, Gold),
    Aurora => ("aurora", 1313161554, Bronze),
    Avalanche => ("avalanche", 43114, Gold),
    Base => ("base", 8453, Gold),
    BaseSepolia => ("base-sepolia", 84532, Gold),
    BerachainBartio => ("berachain-bartio", 80084, Bronze),
    Blast => ("blast", 81457, Gold),
    BlastSepolia => ("blast-sepolia", 168587773, Gold),
    Boba => ("boba", 288, Bronze),
    Bsc => ("bsc", 56, Gold),
    BscTestnet => ("bsc-testnet", 97, Gold),
    C1Milkomeda => ("c1-milkomeda", 2001, Bronze),
    Celo => ("celo", 42220, Bronze),
    Chiliz => ("chiliz", 8888, Bronze),
    CitreaDevnet => ("citrea-devnet", 62298, Bronze),
    Crab => ("crab", 44, Bronze),
    Cyber => ("cyber", 7560, Bronze),
    Darwinia => ("darwinia", 46, Bronze),
    EthereumMainnet => ("eth", 1, Gold),
    Fantom => ("fantom", 250, Bronze),
    FhenixTestnet => ("fhenix-testnet", 42069, Bronze),
    Flare => ("flare", 14, Bronze),
    Fuji => ("fuji", 43113, Gold),
    GaladrialDevnet => ("galadrial-devnet", 696969, Bronze),
    Gnosis => ("gnosis", 100, Bronze),
    GnosisChiado => ("gnosis-chiado", 10200, Bronze),
    Goerli => ("goerli", 5, Bronze),
    HarmonyShard0 => ("harmony-shard-0", 1666600000, Bronze),
    Holesky => ("holesky", 17000, Gold),
    IncoGentryTestnet => ("inco-gentry-testnet", 9090, Bronze),
    KakarotSepolia => ("kakarot-sepolia", 1802203764, Bronze),
    Kroma => ("kroma", 255, Bronze),
    Linea => ("linea", 59144, Gold),
    Lukso => ("lukso", 42, Bronze),
    Manta => ("manta", 169, Bronze),
    Mantle => ("mantle", 5000, Gold),
    Metis => ("metis", 1088, Bronze),
    MevCommit => ("mev-commit", 17864, Bronze),
    Mode => ("mode", 34443, Bronze),
    Moonbeam => ("moonbeam", 1284, Gold),
    MorphTestnet => ("morph-testnet", 2810, Bronze),
    NeonEvm => ("neon-evm", 245022934, Bronze),
    Optimism => ("optimism", 10, Gold),
    OptimismSepolia => ("optimism-sepolia", 11155420, Gold),
    Polygon => ("polygon", 137, Gold),
    PolygonAmoy => ("polygon-amoy", 80002, Bronze),
    PolygonZkevm => ("polygon-zkevm", 1101, Gold),
    Rsk => ("rsk", 30, Bronze),
    Saakuru => ("saakuru", 7225878, Bronze),
    Scroll => ("scroll", 534352, Gold),
    Sepolia => ("sepolia", 11155111, Gold),
    ShimmerEvm => ("shimmer-evm", 148, Bronze),
    SophonTestnet => ("sophon-testnet", 531050104, Bronze),
    TaikoJolnr => ("taiko-jolnr", 167007, Bronze),
    XLayer => ("x-layer", 196, Bronze),
    XLayerTestnet => ("x-layer-testnet", 195, Bronze),
    Zeta => ("zeta", 7000, Bronze),
    Zircuit => ("zircuit", 48900, Bronze),
    Zksync => ("zksync", 324, Gold),
    Zora => ("zora", 7777777, Bronze),
}

/// Domain under which every HyperSync endpoint lives.
const HYPERSYNC_DOMAIN: &str = "hypersync.xyz";

impl Network {
    /// HyperSync endpoint of the network.
    pub fn url(&self) -> String {
        format!("https://{}.{}", self.name(), HYPERSYNC_DOMAIN)
    }

    /// Finds the network served by the given endpoint URL, ignoring a trailing slash.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim_end_matches('/');

        Self::ALL.iter().copied().find(|network| network.url() == url)
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|network| network.chain_id() == chain_id)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Network::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");

        // The mainnet endpoint is `eth`, but the long name is accepted as well.
        if normalized == "ethereum" || normalized == "ethereum-mainnet" || normalized == "mainnet" {
            return Ok(Network::EthereumMainnet);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|network| network.name() == normalized)
            .ok_or_else(|| NetworkParseError::UnknownNetwork(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NetworkParseError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
