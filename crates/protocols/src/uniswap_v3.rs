//! Uniswap V3 pool and factory events.

use hyperquery_types::DataType;
use once_cell::sync::Lazy;

use crate::{event, EventTable};

pub static EVENTS: Lazy<EventTable> = Lazy::new(|| {
    EventTable::from([
        (
            "Swap",
            event(
                "Swap",
                "Swap(address indexed sender, address indexed recipient, int256 amount0, \
                 int256 amount1, uint160 sqrtPriceX96, uint128 liquidity, int24 tick)",
                &[
                    ("amount0", DataType::Float64),
                    ("amount1", DataType::Float64),
                    ("liquidity", DataType::Float64),
                    ("tick", DataType::Float64),
                    ("sqrtPriceX96", DataType::Float64),
                ],
            ),
        ),
        (
            "PoolCreated",
            event(
                "PoolCreated",
                "PoolCreated(address indexed token0, address indexed token1, uint24 indexed fee, \
                 int24 tickSpacing, address pool)",
                &[
                    ("fee", DataType::Float64),
                    ("tickSpacing", DataType::Float64),
                ],
            ),
        ),
    ])
});
