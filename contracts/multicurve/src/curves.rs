//! Splits a launch's curves into the static bands handed to the venue.

use launch_math::{is_aligned, liquidity_for_asset_above, to_unsigned, wad_mul};
use launch_types::{
    max_usable_tick, min_usable_tick, CurveSegment, Placement, SlugPosition, MAX_TICK_SPACING,
    WAD,
};
use soroban_sdk::{log, Env, Vec};

use crate::errors::CurveError;

/// Upper limit on bands across all curves of one launch
pub const MAX_CURVE_POSITIONS: u32 = 32;

/// Validates `curves` and plans one position per band.
///
/// Each curve is cut into `num_positions` aligned bands of near-equal width
/// and every band of a curve holds `supply * share / WAD / num_positions`
/// asset. Curves must be sorted by their lower tick and may overlap. The
/// target tick is the lowest curve start, leaving every band above the price.
pub fn plan_curves(
    env: &Env,
    curves: &Vec<CurveSegment>,
    tick_spacing: i32,
    supply: i128,
) -> Result<Placement, CurveError> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK_SPACING {
        log!(env, "invalid tick spacing", tick_spacing);
        return Err(CurveError::InvalidTickSpacing);
    }
    if supply <= 0 {
        return Err(CurveError::InvalidTokenAmount);
    }
    let Some(first) = curves.first() else {
        return Err(CurveError::NoCurves);
    };
    validate_curves(env, curves, tick_spacing)?;

    let mut positions = Vec::new(env);
    let mut salt = 1u32;
    for curve in curves.iter() {
        let curve_supply =
            wad_mul(env, supply, curve.share).ok_or(CurveError::ArithmeticOverflow)?;
        let per_band = curve_supply / curve.num_positions as i128;
        for (tick_lower, tick_upper) in bands(&curve, tick_spacing) {
            let liquidity =
                liquidity_for_asset_above(env, tick_lower, tick_upper, to_unsigned(per_band));
            if liquidity > 0 {
                positions.push_back(SlugPosition {
                    tick_lower,
                    tick_upper,
                    liquidity,
                    salt,
                });
            }
            salt += 1;
        }
    }

    Ok(Placement {
        positions,
        target_tick: first.tick_lower,
    })
}

fn validate_curves(
    env: &Env,
    curves: &Vec<CurveSegment>,
    tick_spacing: i32,
) -> Result<(), CurveError> {
    let lowest = min_usable_tick(tick_spacing);
    let highest = max_usable_tick(tick_spacing);
    let mut total_share: i128 = 0;
    let mut total_positions: u32 = 0;
    let mut previous_lower = i32::MIN;

    for curve in curves.iter() {
        if curve.tick_lower >= curve.tick_upper
            || !is_aligned(curve.tick_lower, tick_spacing)
            || !is_aligned(curve.tick_upper, tick_spacing)
            || curve.tick_lower < lowest
            || curve.tick_upper > highest
        {
            log!(env, "invalid curve range", curve.tick_lower, curve.tick_upper);
            return Err(CurveError::InvalidTickRange);
        }
        if curve.tick_lower < previous_lower {
            log!(env, "curves not ordered", previous_lower, curve.tick_lower);
            return Err(CurveError::CurvesNotOrdered);
        }
        previous_lower = curve.tick_lower;

        let width = (curve.tick_upper - curve.tick_lower) / tick_spacing;
        if curve.num_positions == 0 || curve.num_positions as i32 > width {
            log!(env, "invalid number of positions", curve.num_positions, width);
            return Err(CurveError::InvalidNumPositions);
        }
        total_positions += curve.num_positions;
        if total_positions > MAX_CURVE_POSITIONS {
            return Err(CurveError::TooManyPositions);
        }

        if curve.share <= 0 {
            return Err(CurveError::InvalidShares);
        }
        total_share = total_share
            .checked_add(curve.share)
            .ok_or(CurveError::ArithmeticOverflow)?;
    }

    if total_share != WAD {
        log!(env, "shares must sum to WAD", total_share);
        return Err(CurveError::InvalidShares);
    }
    Ok(())
}

/// Band edges of `curve`, lowest first; widths differ by at most one spacing
fn bands(curve: &CurveSegment, tick_spacing: i32) -> impl Iterator<Item = (i32, i32)> {
    let lower = curve.tick_lower;
    let width = (curve.tick_upper - curve.tick_lower) / tick_spacing;
    let count = curve.num_positions as i32;
    let edge = move |i: i32| lower + (i * width / count) * tick_spacing;
    (0..count).map(move |i| (edge(i), edge(i + 1)))
}
