use launch_math::{bps_of, is_aligned};
use launch_types::{CallAuctionConfig, BPS_DENOMINATOR, MAX_TICK, MAX_TICK_SPACING, MIN_TICK};
use soroban_sdk::{log, Env};

use crate::errors::CallAuctionError;

/// Incentive pool and sale allocation carved out of `total_tokens`
pub fn split_supply(env: &Env, config: &CallAuctionConfig) -> Result<(i128, i128), CallAuctionError> {
    let pool = bps_of(env, config.total_tokens, config.incentive_share_bps)
        .ok_or(CallAuctionError::ArithmeticOverflow)?;
    Ok((pool, config.total_tokens - pool))
}

pub fn validate_config(env: &Env, config: &CallAuctionConfig) -> Result<(), CallAuctionError> {
    let spacing = config.tick_spacing;
    if spacing <= 0 || spacing > MAX_TICK_SPACING {
        log!(env, "invalid tick spacing", spacing);
        return Err(CallAuctionError::InvalidConfig);
    }

    let floor = config.min_acceptable_tick;
    if !is_aligned(floor, spacing) || !(MIN_TICK..=MAX_TICK).contains(&floor) {
        log!(env, "invalid minimum tick", floor, spacing);
        return Err(CallAuctionError::InvalidTick);
    }

    if config.auction_duration == 0
        || config.starting_time.checked_add(config.auction_duration).is_none()
    {
        log!(env, "invalid duration", config.auction_duration);
        return Err(CallAuctionError::InvalidConfig);
    }

    if config.incentive_share_bps > BPS_DENOMINATOR || config.min_liquidity < 0 {
        log!(env, "invalid incentive share", config.incentive_share_bps);
        return Err(CallAuctionError::InvalidConfig);
    }

    if config.total_tokens <= 0 {
        return Err(CallAuctionError::InvalidConfig);
    }
    let (_, allocation) = split_supply(env, config)?;
    if allocation <= 0 {
        log!(env, "nothing left to sell", config.total_tokens, config.incentive_share_bps);
        return Err(CallAuctionError::InvalidConfig);
    }

    Ok(())
}
