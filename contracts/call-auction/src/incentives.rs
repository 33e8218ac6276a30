//! Time-in-range bookkeeping behind the incentive pool.
//!
//! The in-range window is every active tick at or above the running clearing
//! estimate. Each bitmap mutation first accrues the global weight for the
//! elapsed time, then moves the window and restarts or stops the timers of the
//! ticks that crossed its edge. A bid's weight is its liquidity times the
//! seconds its tick spent in range since the bid was placed, so the weights of
//! live bids always sum to the global accumulator.

use launch_math::mul_div_floor;
use launch_types::{Bid, CallAuctionTotals};
use soroban_sdk::Env;

use crate::bitmap::{Direction, TickBitmap};
use crate::errors::CallAuctionError;
use crate::storage::{get_timer, set_timer};

/// Where the clearing tick would sit if the auction closed now
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClearingEstimate {
    pub boundary: Option<i32>,
    /// Liquidity of the ticks at or above `boundary`
    pub in_range_liquidity: i128,
}

/// Walks down from the best tick until `allocation` is covered; the lowest
/// tick is the boundary when demand never covers it
pub fn estimate_clearing(
    bitmap: TickBitmap<'_>,
    allocation: i128,
) -> Result<ClearingEstimate, CallAuctionError> {
    let summary = bitmap.summary();
    if !summary.has_active_ticks {
        return Ok(ClearingEstimate::default());
    }

    let mut estimate = ClearingEstimate::default();
    for tick in bitmap.active_ticks_from(summary.max_tick, Direction::Down) {
        estimate.in_range_liquidity = estimate
            .in_range_liquidity
            .checked_add(bitmap.liquidity_at(tick))
            .ok_or(CallAuctionError::ArithmeticOverflow)?;
        estimate.boundary = Some(tick);
        if estimate.in_range_liquidity >= allocation {
            break;
        }
    }
    Ok(estimate)
}

/// Adds `in_range_liquidity * elapsed` to the weight accumulator
pub fn accrue(totals: &mut CallAuctionTotals, now: u64) -> Result<(), CallAuctionError> {
    let elapsed = now.saturating_sub(totals.last_update) as u128;
    let added = (totals.in_range_liquidity as u128)
        .checked_mul(elapsed)
        .ok_or(CallAuctionError::ArithmeticOverflow)?;
    totals.weight_accumulator = totals
        .weight_accumulator
        .checked_add(added)
        .ok_or(CallAuctionError::ArithmeticOverflow)?;
    totals.last_update = totals.last_update.max(now);
    Ok(())
}

/// Applies a liquidity change at `tick` and moves the in-range window.
///
/// `totals` must already be accrued up to `now`.
pub fn apply_liquidity_change(
    env: &Env,
    bitmap: TickBitmap<'_>,
    totals: &mut CallAuctionTotals,
    allocation: i128,
    tick: i32,
    liquidity_delta: i128,
    now: u64,
) -> Result<(), CallAuctionError> {
    bitmap.set_tick(tick, liquidity_delta)?;

    let previous = totals.in_range_boundary;
    let estimate = estimate_clearing(bitmap, allocation)?;
    totals.in_range_boundary = estimate.boundary;
    totals.in_range_liquidity = estimate.in_range_liquidity;

    refresh_timer(env, bitmap, estimate.boundary, tick, now);
    let (low, high) = match (previous, estimate.boundary) {
        (Some(a), Some(b)) => (a.min(b), a.max(b)),
        (Some(edge), None) | (None, Some(edge)) => (edge, bitmap.summary().max_tick.max(edge)),
        (None, None) => return Ok(()),
    };
    for crossed in bitmap.active_ticks_from(low, Direction::Up) {
        if crossed > high {
            break;
        }
        refresh_timer(env, bitmap, estimate.boundary, crossed, now);
    }
    Ok(())
}

/// Starts or stops the timer of `tick` to match the window
fn refresh_timer(env: &Env, bitmap: TickBitmap<'_>, boundary: Option<i32>, tick: i32, now: u64) {
    let in_range = boundary.is_some_and(|edge| tick >= edge) && bitmap.is_active(tick);
    let mut timer = get_timer(env, tick);
    if timer.in_range == in_range {
        return;
    }
    if in_range {
        timer.entered_at = now;
    } else {
        timer.seconds_in_range += now - timer.entered_at;
    }
    timer.in_range = in_range;
    set_timer(env, tick, &timer);
}

/// Cumulative in-range seconds of `tick` as of `at`
pub fn seconds_in_range(env: &Env, tick: i32, at: u64) -> u64 {
    get_timer(env, tick).cumulative(at)
}

/// Liquidity-seconds a bid earned up to `at`
pub fn bid_weight(env: &Env, bid: &Bid, at: u64) -> Result<u128, CallAuctionError> {
    let seconds = seconds_in_range(env, bid.tick, at).saturating_sub(bid.seconds_in_range_snapshot);
    (bid.liquidity as u128)
        .checked_mul(seconds as u128)
        .ok_or(CallAuctionError::ArithmeticOverflow)
}

/// Share of `pool` for `weight` out of `total_weight`, rounded down
pub fn incentive_share(
    env: &Env,
    pool: i128,
    weight: u128,
    total_weight: u128,
) -> Result<i128, CallAuctionError> {
    if total_weight == 0 || weight == 0 {
        return Ok(0);
    }
    let weight = i128::try_from(weight).map_err(|_| CallAuctionError::ArithmeticOverflow)?;
    let total_weight =
        i128::try_from(total_weight).map_err(|_| CallAuctionError::ArithmeticOverflow)?;
    mul_div_floor(env, pool, weight, total_weight).ok_or(CallAuctionError::ArithmeticOverflow)
}
