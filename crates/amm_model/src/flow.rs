//! Which step of the AMM walkthrough the current inputs illustrate

use std::cmp::Ordering;

/// Steps of the liquidity → trade → price walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FlowStage {
    /// No pool yet (k not positive)
    Idle = 0,
    InjectLiquidity = 1,
    EstablishK = 2,
    UserInitiatesTrade = 3,
    ReservesRebalance = 4,
    PriceUpdates = 5,
}

impl FlowStage {
    pub const ALL: [FlowStage; 5] = [
        FlowStage::InjectLiquidity,
        FlowStage::EstablishK,
        FlowStage::UserInitiatesTrade,
        FlowStage::ReservesRebalance,
        FlowStage::PriceUpdates,
    ];

    /// Active stage for the given inputs
    ///
    /// Any positive trade input counts as a trade; any multiplier other than
    /// exactly 1 counts as a price move.
    pub fn active(k: f64, usdt_in: f64, price_multiplier: f64) -> Self {
        if k.partial_cmp(&0.0) != Some(Ordering::Greater) {
            return FlowStage::Idle;
        }
        let trading = usdt_in > 0.0;
        let moved = price_multiplier != 1.0;
        match (trading, moved) {
            (true, true) => FlowStage::PriceUpdates,
            (true, false) => FlowStage::ReservesRebalance,
            (false, true) => FlowStage::UserInitiatesTrade,
            (false, false) => FlowStage::EstablishK,
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            FlowStage::Idle => "Idle",
            FlowStage::InjectLiquidity => "Inject Liquidity",
            FlowStage::EstablishK => "Establish k",
            FlowStage::UserInitiatesTrade => "User Initiates Trade",
            FlowStage::ReservesRebalance => "Reserves Rebalance",
            FlowStage::PriceUpdates => "Price Updates",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FlowStage::Idle => "Pool has no liquidity yet",
            FlowStage::InjectLiquidity => "LP deposits equal-value ETH + USDT into the pool",
            FlowStage::EstablishK => "Constant product k = x × y is locked",
            FlowStage::UserInitiatesTrade => "Trader sends USDT to swap for ETH",
            FlowStage::ReservesRebalance => "Pool adjusts: ETH decreases, USDT increases",
            FlowStage::PriceUpdates => "New price = y'/x', slippage reflected",
        }
    }

    /// Stages strictly before this one are complete
    pub fn is_done(&self, other: FlowStage) -> bool {
        other != FlowStage::Idle && other < *self
    }
}
