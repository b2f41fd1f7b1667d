//! Stargate liquidity pool events.

use hyperquery_types::{DataType, Network};
use once_cell::sync::Lazy;

use crate::{event, EventTable};

/// Native ETH pool on Optimism. The USDC and USDT pools emit the same events, so the
/// events are queried per pool rather than by wildcard.
pub const OPTIMISM_ETH_POOL: (Network, &str) = (
    Network::Optimism,
    "0xe8CDF27AcD73a434D661C84887215F7598e7d0d3",
);

pub static EVENTS: Lazy<EventTable> = Lazy::new(|| {
    EventTable::from([(
        "Deposited",
        event(
            "Deposited",
            "Deposited(address indexed payer, address indexed receiver, uint256 amountLD)",
            &[("amountLD", DataType::Float64)],
        ),
    )])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposited_on_pool() {
        let event = EVENTS["Deposited"].clone().with_contract(OPTIMISM_ETH_POOL.1);

        assert_eq!(
            event.contract(),
            Some("0xe8cdf27acd73a434d661c84887215f7598e7d0d3")
        );
        assert_eq!(
            event.column_mapping().decoded_log["amountLD"],
            DataType::Float64
        );
    }
}
