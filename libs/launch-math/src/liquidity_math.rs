//! Liquidity <-> amount conversions.
//!
//! The `*_above`/`*_below` helpers take asset-price ticks: a range above the
//! current price holds only asset, a range below it holds only numeraire.

use crate::full_math::{checked_mul_div, mul_div, mul_div_rounding_up};
use crate::tick_math::get_sqrt_ratio_at_tick;
use launch_types::Q96;
use soroban_sdk::Env;

fn ordered(sqrt_ratio_a_x96: u128, sqrt_ratio_b_x96: u128) -> (u128, u128) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// L = amount0 * sqrt_pa * sqrt_pb / (sqrt_pb - sqrt_pa)
pub fn liquidity_for_amount0(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount0: u128,
) -> u128 {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower == upper {
        return 0;
    }
    let scaled = mul_div(env, amount0, lower, upper - lower);
    mul_div(env, scaled, upper, Q96)
}

/// L = amount1 / (sqrt_pb - sqrt_pa)
pub fn liquidity_for_amount1(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount1: u128,
) -> u128 {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower == upper {
        return 0;
    }
    mul_div(env, amount1, Q96, upper - lower)
}

/// amount0 = L * (sqrt_pb - sqrt_pa) / (sqrt_pa * sqrt_pb)
pub fn amount0_for_liquidity(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if round_up {
        let scaled = mul_div_rounding_up(env, liquidity, upper - lower, upper);
        mul_div_rounding_up(env, scaled, Q96, lower)
    } else {
        let scaled = mul_div(env, liquidity, upper - lower, upper);
        mul_div(env, scaled, Q96, lower)
    }
}

/// amount1 = L * (sqrt_pb - sqrt_pa)
pub fn amount1_for_liquidity(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if round_up {
        mul_div_rounding_up(env, liquidity, upper - lower, Q96)
    } else {
        mul_div(env, liquidity, upper - lower, Q96)
    }
}

/// Liquidity for `asset` spread over an asset-price range above the price
pub fn liquidity_for_asset_above(env: &Env, tick_lower: i32, tick_upper: i32, asset: u128) -> u128 {
    if tick_lower >= tick_upper || asset == 0 {
        return 0;
    }
    liquidity_for_amount0(
        env,
        get_sqrt_ratio_at_tick(env, tick_lower),
        get_sqrt_ratio_at_tick(env, tick_upper),
        asset,
    )
}

/// Liquidity for `numeraire` spread over an asset-price range below the price
pub fn liquidity_for_numeraire_below(
    env: &Env,
    tick_lower: i32,
    tick_upper: i32,
    numeraire: u128,
) -> u128 {
    if tick_lower >= tick_upper || numeraire == 0 {
        return 0;
    }
    liquidity_for_amount1(
        env,
        get_sqrt_ratio_at_tick(env, tick_lower),
        get_sqrt_ratio_at_tick(env, tick_upper),
        numeraire,
    )
}

/// Numeraire a range below the price must hold to absorb `asset` sold into it
pub fn numeraire_to_absorb(env: &Env, tick_lower: i32, tick_upper: i32, asset: u128) -> u128 {
    if tick_lower >= tick_upper || asset == 0 {
        return 0;
    }
    let sqrt_lower = get_sqrt_ratio_at_tick(env, tick_lower);
    let sqrt_upper = get_sqrt_ratio_at_tick(env, tick_upper);
    let liquidity = liquidity_for_amount0(env, sqrt_lower, sqrt_upper, asset);
    amount1_for_liquidity(env, sqrt_lower, sqrt_upper, liquidity, true)
}

/// Numeraire value of `asset` at the price of a single tick; `None` when it
/// does not fit a u128
pub fn numeraire_at_tick(env: &Env, asset: u128, tick: i32, round_up: bool) -> Option<u128> {
    let sqrt_ratio = get_sqrt_ratio_at_tick(env, tick);
    let partial = checked_mul_div(env, asset, sqrt_ratio, Q96, round_up)?;
    checked_mul_div(env, partial, sqrt_ratio, Q96, round_up)
}

/// Greatest tick in [floor, ceiling] at which `asset` is worth at most
/// `numeraire`; `floor` when even that price is too high
pub fn tick_at_or_below_price(
    env: &Env,
    asset: u128,
    numeraire: u128,
    floor: i32,
    ceiling: i32,
) -> i32 {
    let (mut low, mut high) = (floor, ceiling);
    while low < high {
        let mid = low + (high - low + 1) / 2;
        let affordable = numeraire_at_tick(env, asset, mid, true)
            .is_some_and(|value| value <= numeraire);
        if affordable {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}
