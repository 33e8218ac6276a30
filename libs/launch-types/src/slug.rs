use soroban_sdk::{contracttype, Vec};

/// A concentrated liquidity position placed by an auction
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlugPosition {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub salt: u32,
}

impl SlugPosition {
    pub fn empty_at(tick: i32, salt: u32) -> Self {
        Self {
            tick_lower: tick,
            tick_upper: tick,
            liquidity: 0,
            salt,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.liquidity == 0 || self.tick_lower == self.tick_upper
    }
}

/// Full set of positions the venue must hold after a rebalance.
///
/// The venue withdraws every position it holds for the caller, moves its
/// (now liquidity-free) price to `target_tick`, then mints `positions`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    pub positions: Vec<SlugPosition>,
    pub target_tick: i32,
}

/// Signed token amounts; positive values flow into the venue
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BalanceDelta {
    pub asset: i128,
    pub numeraire: i128,
}

/// Exact-input trade routed through an auction
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TradeParams {
    /// True when the trader pays numeraire for asset
    pub buy_asset: bool,
    pub amount_in: i128,
    pub min_amount_out: i128,
}
