//! Migration gate and the end-of-auction outcomes.

use launch_types::{AuctionState, DutchAuctionConfig, PoolStatus, SlugPosition};
use soroban_sdk::{log, Env};

use crate::errors::AuctionError;
use crate::slugs::{average_clearing_slug, SlugSet};

pub fn reached_maximum_proceeds(config: &DutchAuctionConfig, state: &AuctionState) -> bool {
    state.total_proceeds >= config.maximum_proceeds
}

pub fn reached_minimum_proceeds(config: &DutchAuctionConfig, state: &AuctionState) -> bool {
    state.total_proceeds >= config.minimum_proceeds
}

/// Refuses migration unless the auction sold out early or matured with
/// enough proceeds
pub fn can_migrate(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    status: PoolStatus,
    now: u64,
) -> Result<(), AuctionError> {
    match status {
        PoolStatus::Settled => Ok(()),
        PoolStatus::Initialized
            if now >= config.ending_time && reached_minimum_proceeds(config, state) =>
        {
            Ok(())
        }
        PoolStatus::Initialized | PoolStatus::Locked => {
            log!(
                env,
                "cannot migrate",
                state.total_proceeds,
                config.minimum_proceeds,
                now,
                config.ending_time
            );
            Err(AuctionError::CannotMigrate)
        }
        _ => {
            log!(env, "wrong pool status", PoolStatus::Settled as u32, status as u32);
            Err(AuctionError::WrongPoolStatus)
        }
    }
}

/// Placement once the auction matured short of its minimum: every proceed
/// sits in one slug at the average sale price and no asset is listed, so
/// holders can sell back but nobody can buy.
pub fn insufficient_proceeds_slugs(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    market_tick: i32,
) -> SlugSet {
    if state.total_tokens_sold <= 0 || state.total_proceeds <= 0 {
        return SlugSet::empty(env, market_tick);
    }

    let ceiling = config.starting_tick + config.gamma;
    let lower = average_clearing_slug(
        env,
        config,
        state.total_tokens_sold,
        state.total_proceeds,
        ceiling,
    );
    let anchor = lower.tick_upper;
    let mut slugs = SlugSet::empty(env, anchor);
    slugs.lower = lower;
    slugs
}

/// Fails when a trade pushed the price under the lower slug while asset is
/// still unsold
pub fn check_floor(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    lower: &SlugPosition,
    market_tick: i32,
) -> Result<(), AuctionError> {
    let unsold = config.num_tokens_to_sell - state.total_tokens_sold;
    if unsold > 0 && market_tick < lower.tick_lower {
        log!(env, "swap below range", market_tick, lower.tick_lower);
        return Err(AuctionError::SwapBelowRange);
    }
    Ok(())
}
