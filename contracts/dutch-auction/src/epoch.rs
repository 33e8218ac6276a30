//! Epoch accumulator: per-epoch sale pacing and the bounded price drift.

use launch_math::{mul_div_floor, wad_fraction, wad_mul};
use launch_types::{AuctionState, BalanceDelta, DutchAuctionConfig, WAD};
use soroban_sdk::Env;

use crate::errors::AuctionError;
use crate::invariants::net_flow_non_negative;

/// What an epoch transition did to the accumulator
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EpochTransition {
    pub epoch: u64,
    pub epochs_passed: u64,
    /// Tokens sold (net) since the previous transition
    pub net_sold: i128,
    pub accumulator_delta: i128,
}

/// 0-based epoch containing `now`; epoch 0 is the initial placement
pub fn current_epoch(config: &DutchAuctionConfig, now: u64) -> u64 {
    now.saturating_sub(config.starting_time) / config.epoch_length
}

pub fn epoch_start(config: &DutchAuctionConfig, epoch: u64) -> u64 {
    config
        .starting_time
        .saturating_add(epoch.saturating_mul(config.epoch_length))
        .min(config.ending_time)
}

/// Epochs after `epoch` that still lie inside the auction
pub fn remaining_epochs(config: &DutchAuctionConfig, epoch: u64) -> u64 {
    config.total_epochs().saturating_sub(epoch + 1)
}

/// Tokens the linear schedule expects sold by `timestamp`
pub fn expected_sold_at(
    env: &Env,
    config: &DutchAuctionConfig,
    timestamp: u64,
) -> Result<i128, AuctionError> {
    let elapsed = timestamp.clamp(config.starting_time, config.ending_time) - config.starting_time;
    mul_div_floor(
        env,
        config.num_tokens_to_sell,
        elapsed as i128,
        config.duration() as i128,
    )
    .ok_or(AuctionError::ArithmeticOverflow)
}

/// Lowest accumulator value: the full drop from starting to ending tick
pub fn accumulator_floor(config: &DutchAuctionConfig) -> i128 {
    (config.ending_tick - config.starting_tick) as i128 * WAD
}

/// Unaligned auction price tick for an accumulator value
pub fn auction_tick(config: &DutchAuctionConfig, accumulator: i128) -> i32 {
    config.starting_tick + (accumulator / WAD) as i32
}

/// Rolls `state` into the epoch containing `now`.
///
/// Returns `None` while still inside the last rebalanced epoch. Otherwise the
/// closed epoch's pace sets one bounded delta, and every skipped epoch
/// (no trade, hence no rebalance) adds a full downward step.
pub fn advance(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &mut AuctionState,
    now: u64,
    market_tick: i32,
) -> Result<Option<EpochTransition>, AuctionError> {
    let epoch = current_epoch(config, now);
    if epoch <= state.last_epoch {
        return Ok(None);
    }

    let epochs_passed = epoch - state.last_epoch;
    let net_sold = state
        .total_tokens_sold
        .checked_sub(state.total_tokens_sold_last_epoch)
        .ok_or(AuctionError::ArithmeticOverflow)?;

    let max_delta = config.max_tick_delta_per_epoch;
    let pace = pace_delta(env, config, state, net_sold, market_tick)?;
    let catch_up = max_delta
        .checked_mul((epochs_passed - 1) as i128)
        .ok_or(AuctionError::ArithmeticOverflow)?;

    let previous = state.tick_accumulator;
    let next = previous
        .checked_add(pace)
        .and_then(|value| value.checked_sub(catch_up))
        .ok_or(AuctionError::ArithmeticOverflow)?
        .clamp(accumulator_floor(config), 0);

    state.tick_accumulator = next;
    state.last_epoch = epoch;
    state.total_tokens_sold_last_epoch = state.total_tokens_sold;

    Ok(Some(EpochTransition {
        epoch,
        epochs_passed,
        net_sold,
        accumulator_delta: next - previous,
    }))
}

/// Bounded delta for the epoch that just closed, within [-max, +max]
fn pace_delta(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    net_sold: i128,
    market_tick: i32,
) -> Result<i128, AuctionError> {
    let max_delta = config.max_tick_delta_per_epoch;
    if net_sold <= 0 {
        return Ok(-max_delta);
    }

    let expected = expected_sold_at(env, config, epoch_start(config, state.last_epoch + 1))?;
    if state.total_tokens_sold < expected {
        // behind schedule: drop in proportion to the shortfall
        let fraction = wad_fraction(env, state.total_tokens_sold, expected)
            .ok_or(AuctionError::ArithmeticOverflow)?;
        let step =
            wad_mul(env, max_delta, WAD - fraction).ok_or(AuctionError::ArithmeticOverflow)?;
        return Ok(-step);
    }

    // ahead of schedule: follow the market up
    let gap = (market_tick as i128 - auction_tick(config, state.tick_accumulator) as i128)
        .checked_mul(WAD)
        .ok_or(AuctionError::ArithmeticOverflow)?;
    Ok(gap.clamp(0, max_delta))
}

/// Books an executed trade; `delta` is from the venue's side
pub fn record_trade(state: &mut AuctionState, delta: &BalanceDelta) -> Result<(), AuctionError> {
    let sold = state
        .total_tokens_sold
        .checked_sub(delta.asset)
        .ok_or(AuctionError::ArithmeticOverflow)?;
    let proceeds = state
        .total_proceeds
        .checked_add(delta.numeraire)
        .ok_or(AuctionError::ArithmeticOverflow)?;
    if !net_flow_non_negative(sold, proceeds) {
        return Err(AuctionError::NegativeNetSold);
    }
    state.total_tokens_sold = sold;
    state.total_proceeds = proceeds;
    Ok(())
}
