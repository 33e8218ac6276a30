use launch_math::is_aligned;
use launch_types::{
    max_usable_tick, min_usable_tick, DutchAuctionConfig, MAX_PRICE_DISCOVERY_SLUGS,
    MAX_TICK_SPACING, WAD,
};
use soroban_sdk::{log, Env};

use crate::errors::AuctionError;

/// Checks a configuration once, before anything is stored
pub fn validate_config(env: &Env, config: &DutchAuctionConfig) -> Result<(), AuctionError> {
    let spacing = config.tick_spacing;
    if spacing <= 0 || spacing > MAX_TICK_SPACING {
        log!(env, "invalid tick spacing", spacing);
        return Err(AuctionError::InvalidTickSpacing);
    }

    if config.starting_tick <= config.ending_tick
        || !is_aligned(config.starting_tick, spacing)
        || !is_aligned(config.ending_tick, spacing)
    {
        log!(env, "invalid tick range", config.starting_tick, config.ending_tick);
        return Err(AuctionError::InvalidTickRange);
    }

    if config.gamma <= 0 || !is_aligned(config.gamma, spacing) {
        log!(env, "invalid gamma", config.gamma, spacing);
        return Err(AuctionError::InvalidGamma);
    }

    // The lowest slug may sit one spacing under the ending tick and the curve
    // reaches gamma above the starting tick.
    let lowest = config.ending_tick.checked_sub(spacing);
    let highest = config.starting_tick.checked_add(config.gamma);
    match (lowest, highest) {
        (Some(lowest), Some(highest))
            if lowest >= min_usable_tick(spacing) && highest <= max_usable_tick(spacing) => {}
        _ => {
            log!(env, "tick range exceeds usable ticks", config.starting_tick, config.ending_tick);
            return Err(AuctionError::InvalidTickRange);
        }
    }

    if config.starting_time >= config.ending_time {
        log!(env, "invalid time range", config.starting_time, config.ending_time);
        return Err(AuctionError::InvalidTimeRange);
    }

    if config.epoch_length == 0 || config.duration() % config.epoch_length != 0 {
        log!(env, "invalid epoch length", config.epoch_length, config.duration());
        return Err(AuctionError::InvalidEpochLength);
    }

    if config.num_pd_slugs == 0 || config.num_pd_slugs > MAX_PRICE_DISCOVERY_SLUGS {
        log!(env, "invalid price discovery slug count", config.num_pd_slugs);
        return Err(AuctionError::InvalidNumPDSlugs);
    }

    if config.minimum_proceeds < 0 || config.minimum_proceeds > config.maximum_proceeds {
        log!(env, "invalid proceed limits", config.minimum_proceeds, config.maximum_proceeds);
        return Err(AuctionError::InvalidProceedLimits);
    }

    if config.num_tokens_to_sell <= 0 {
        return Err(AuctionError::InvalidTokenAmount);
    }

    // One epoch may move the curve by at most its own width, and never past
    // the whole decay range.
    let max_delta = config.max_tick_delta_per_epoch;
    let range = (config.starting_tick - config.ending_tick) as i128 * WAD;
    if max_delta <= 0 || max_delta > config.gamma as i128 * WAD || max_delta > range {
        log!(env, "invalid max tick delta", max_delta, config.gamma);
        return Err(AuctionError::InvalidMaxTickDelta);
    }

    Ok(())
}
