//! Across Protocol V3 SpokePool events.

use hyperquery_types::{DataType, Network};
use once_cell::sync::Lazy;

use crate::{event, EventTable};

/// SpokePool deployments per network.
pub const SPOKE_POOLS: &[(Network, &str)] = &[
    (Network::Arbitrum, "0xe35e9842fceaca96570b734083f4a58e8f7c5f2a"),
    (Network::Base, "0x09aea4b2242abC8bb4BB78D537A67a245A7bEC64"),
    (Network::Blast, "0x2D509190Ed0172ba588407D4c2df918F955Cc6E1"),
    (Network::EthereumMainnet, "0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5"),
    (Network::Linea, "0x7E63A5f1a8F0B4d0934B2f2327DAED3F6bb2ee75"),
    (Network::Optimism, "0x6f26Bf09B1C792e3228e5467807a900A503c0281"),
    (Network::Scroll, "0x3bad7ad0728f9917d1bf08af5782dcbd516cdd96"),
];

/// SpokePool deployed on `network`, if any.
pub fn spoke_pool(network: Network) -> Option<&'static str> {
    SPOKE_POOLS
        .iter()
        .find(|(deployed, _)| *deployed == network)
        .map(|(_, address)| *address)
}

pub static EVENTS: Lazy<EventTable> = Lazy::new(|| {
    EventTable::from([
        (
            "V3FundsDeposited",
            event(
                "V3FundsDeposited",
                "V3FundsDeposited(address inputToken,address outputToken,uint256 inputAmount,\
                 uint256 outputAmount,uint256 indexed destinationChainId,uint32 indexed depositId,\
                 uint32 quoteTimestamp,uint32 fillDeadline,uint32 exclusivityDeadline,\
                 address indexed depositor,address recipient,address exclusiveRelayer,bytes message)",
                &[
                    ("inputAmount", DataType::Float64),
                    ("outputAmount", DataType::Float64),
                    ("quoteTimestamp", DataType::Int64),
                    ("fillDeadline", DataType::UInt64),
                    ("exclusivityDeadline", DataType::Int64),
                    ("destinationChainId", DataType::UInt64),
                    ("depositId", DataType::UInt64),
                ],
            ),
        ),
        (
            "RequestedSpeedUpV3Deposit",
            event(
                "RequestedSpeedUpV3Deposit",
                "RequestedSpeedUpV3Deposit(uint256 updatedOutputAmount,uint32 indexed depositId,\
                 address indexed depositor,address updatedRecipient,bytes updatedMessage,\
                 bytes depositorSignature)",
                &[
                    ("updatedOutputAmount", DataType::Int64),
                    ("depositId", DataType::UInt64),
                ],
            ),
        ),
        (
            // relayExecutionInfo is (updatedRecipient, updatedMessage, updatedOutputAmount, fillType)
            "FilledV3Relay",
            event(
                "FilledV3Relay",
                "FilledV3Relay(address inputToken,address outputToken,uint256 inputAmount,\
                 uint256 outputAmount,uint256 repaymentChainId,uint256 indexed originChainId,\
                 uint32 indexed depositId,uint32 fillDeadline,uint32 exclusivityDeadline,\
                 address exclusiveRelayer,address indexed relayer,address depositor,\
                 address recipient,bytes message,(address,bytes,uint256,uint8) relayExecutionInfo)",
                &[
                    ("inputAmount", DataType::Float64),
                    ("outputAmount", DataType::Float64),
                    ("fillDeadline", DataType::UInt64),
                    ("exclusivityDeadline", DataType::Int64),
                    ("originChainId", DataType::UInt64),
                    ("repaymentChainId", DataType::UInt64),
                    ("depositId", DataType::UInt64),
                ],
            ),
        ),
        (
            "RequestedV3SlowFill",
            event(
                "RequestedV3SlowFill",
                "RequestedV3SlowFill(address inputToken,address outputToken,uint256 inputAmount,\
                 uint256 outputAmount,uint256 indexed originChainId,uint32 indexed depositId,\
                 uint32 fillDeadline,uint32 exclusivityDeadline,address exclusiveRelayer,\
                 address depositor,address recipient,bytes message)",
                &[
                    ("inputAmount", DataType::Float64),
                    ("outputAmount", DataType::Float64),
                    ("fillDeadline", DataType::UInt64),
                    ("originChainId", DataType::UInt64),
                ],
            ),
        ),
    ])
});
