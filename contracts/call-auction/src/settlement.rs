//! One-shot clearing pass and the per-bid outcome derived from it.

use core::cmp::Ordering;

use launch_math::{mul_div_floor, numeraire_at_tick, to_unsigned};
use launch_types::{Bid, BidClaim, SettlementResult};
use soroban_sdk::Env;

use crate::bitmap::{Direction, TickBitmap};
use crate::errors::CallAuctionError;
use crate::incentives::{bid_weight, incentive_share};
use crate::storage::get_tick_bids;

/// Walks the bitmap from the best tick down until `allocation` is sold.
///
/// Ticks above the clearing tick fill in full, the clearing tick fills
/// pro rata and lower ticks do not fill. When demand never reaches the
/// allocation the lowest tick clears with a full fill.
///
/// Pro-rata fills round down per bid, so a partial clearing tick may deliver
/// up to one unit less per bid there. Proceeds are priced on the amount
/// bidders are certain to pay for.
pub fn clear(
    env: &Env,
    bitmap: TickBitmap<'_>,
    allocation: i128,
    incentive_pool: i128,
    total_weight: u128,
    closed_at: u64,
) -> Result<SettlementResult, CallAuctionError> {
    let mut result = SettlementResult {
        clearing_tick: None,
        tokens_sold: 0,
        fill_numerator: 0,
        fill_denominator: 1,
        proceeds: 0,
        incentive_pool,
        total_weight,
        closed_at,
    };
    let summary = bitmap.summary();
    if !summary.has_active_ticks {
        return Ok(result);
    }

    let mut filled_above: i128 = 0;
    for tick in bitmap.active_ticks_from(summary.max_tick, Direction::Down) {
        let liquidity = bitmap.liquidity_at(tick);
        result.clearing_tick = Some(tick);
        let remaining = allocation - filled_above;
        if liquidity >= remaining {
            result.fill_numerator = remaining;
            result.fill_denominator = liquidity;
            result.tokens_sold = allocation;
            break;
        }
        result.fill_numerator = liquidity;
        result.fill_denominator = liquidity;
        filled_above = filled_above
            .checked_add(liquidity)
            .ok_or(CallAuctionError::ArithmeticOverflow)?;
        result.tokens_sold = filled_above;
    }

    if let Some(tick) = result.clearing_tick {
        let mut paid_for = result.tokens_sold;
        if result.fill_numerator < result.fill_denominator {
            let bids = get_tick_bids(env, tick) as i128;
            paid_for -= bids.min(result.fill_numerator);
        }
        result.proceeds = numeraire_value(env, paid_for, tick, false)?;
    }
    Ok(result)
}

/// Asset a bid receives from the sale, before incentives
pub fn fill_for(
    env: &Env,
    settlement: &SettlementResult,
    bid: &Bid,
) -> Result<i128, CallAuctionError> {
    let Some(clearing_tick) = settlement.clearing_tick else {
        return Ok(0);
    };
    match bid.tick.cmp(&clearing_tick) {
        Ordering::Greater => Ok(bid.liquidity),
        Ordering::Equal => mul_div_floor(
            env,
            bid.liquidity,
            settlement.fill_numerator,
            settlement.fill_denominator,
        )
        .ok_or(CallAuctionError::ArithmeticOverflow),
        Ordering::Less => Ok(0),
    }
}

/// Everything owed to a bid's owner once the auction settled
pub fn claim_for(
    env: &Env,
    settlement: &SettlementResult,
    bid: &Bid,
) -> Result<BidClaim, CallAuctionError> {
    let asset_filled = fill_for(env, settlement, bid)?;
    let weight = bid_weight(env, bid, settlement.closed_at)?;
    let incentive =
        incentive_share(env, settlement.incentive_pool, weight, settlement.total_weight)?;

    let numeraire_paid = match settlement.clearing_tick {
        Some(tick) if asset_filled > 0 => {
            numeraire_value(env, asset_filled, tick, true)?.min(bid.escrow)
        }
        _ => 0,
    };

    Ok(BidClaim {
        asset_filled,
        incentive,
        numeraire_paid,
        numeraire_refund: bid.escrow - numeraire_paid,
    })
}

/// Numeraire worth of `asset` at `tick` as a token amount
fn numeraire_value(
    env: &Env,
    asset: i128,
    tick: i32,
    round_up: bool,
) -> Result<i128, CallAuctionError> {
    numeraire_at_tick(env, to_unsigned(asset), tick, round_up)
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(CallAuctionError::ArithmeticOverflow)
}
