use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::{BalanceDelta, Placement, SlugPosition, TradeParams};

/// The concentrated liquidity venue an auction places its positions in.
///
/// Ticks crossing this interface are in the venue's own token0/token1
/// orientation; use [`VenueOrientation`] to convert.
#[contractclient(name = "VenueClient")]
pub trait VenueInterface {
    fn current_tick(env: Env) -> i32;
    /// Replace every position held for the caller; positive amounts are owed
    /// to the venue by the caller
    fn set_positions(env: Env, placement: Placement) -> BalanceDelta;
    /// Execute a trade; positive amounts were paid in by the trader
    fn swap(env: Env, trader: Address, params: TradeParams) -> BalanceDelta;
}

/// Maps asset-price ticks to venue ticks.
///
/// When the asset is token1 the venue price is numeraire-per-asset inverted,
/// so ticks are negated and range ends swap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VenueOrientation {
    pub asset_is_token0: bool,
}

impl VenueOrientation {
    pub fn new(asset_is_token0: bool) -> Self {
        Self { asset_is_token0 }
    }

    pub fn to_venue_tick(&self, tick: i32) -> i32 {
        if self.asset_is_token0 {
            tick
        } else {
            -tick
        }
    }

    pub fn from_venue_tick(&self, venue_tick: i32) -> i32 {
        self.to_venue_tick(venue_tick)
    }

    pub fn to_venue_position(&self, position: &SlugPosition) -> SlugPosition {
        if self.asset_is_token0 {
            position.clone()
        } else {
            SlugPosition {
                tick_lower: -position.tick_upper,
                tick_upper: -position.tick_lower,
                liquidity: position.liquidity,
                salt: position.salt,
            }
        }
    }

    pub fn to_venue_placement(&self, env: &Env, placement: &Placement) -> Placement {
        let mut positions = Vec::new(env);
        for position in placement.positions.iter() {
            positions.push_back(self.to_venue_position(&position));
        }
        Placement {
            positions,
            target_tick: self.to_venue_tick(placement.target_tick),
        }
    }
}
