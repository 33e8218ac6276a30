//! WAD (1e18) and basis point arithmetic on signed token amounts.
//!
//! Products of two 1e18-scale values do not fit an i128, so every helper
//! retries through a 256-bit intermediate when the narrow product overflows.
//! Each returns `None` when the result does not fit an i128 or the
//! denominator is zero, so callers can surface their own arithmetic error.

use launch_types::{BPS_DENOMINATOR, WAD};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{Env, I256};

/// a * b / denominator, rounded toward -inf
fn scaled_mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    if let Some(narrow) = a.fixed_mul_floor(b, denominator) {
        return Some(narrow);
    }

    let (a, denominator) = if denominator < 0 {
        (a.checked_neg()?, denominator.checked_neg()?)
    } else {
        (a, denominator)
    };
    let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
    let denominator = I256::from_i128(env, denominator);
    let remainder = product.rem_euclid(&denominator);
    product.sub(&remainder).div(&denominator).to_i128()
}

/// a * b / WAD, rounded down
pub fn wad_mul(env: &Env, a: i128, b: i128) -> Option<i128> {
    scaled_mul_div(env, a, b, WAD)
}

/// a * WAD / b, rounded down
pub fn wad_div(env: &Env, a: i128, b: i128) -> Option<i128> {
    scaled_mul_div(env, a, WAD, b)
}

/// `part / whole` as a WAD fraction, capped at 1.0
pub fn wad_fraction(env: &Env, part: i128, whole: i128) -> Option<i128> {
    if whole <= 0 || part < 0 {
        return None;
    }
    if part >= whole {
        return Some(WAD);
    }
    wad_div(env, part, whole)
}

/// `bps` basis points of `amount`, rounded down
pub fn bps_of(env: &Env, amount: i128, bps: u32) -> Option<i128> {
    scaled_mul_div(env, amount, bps as i128, BPS_DENOMINATOR as i128)
}

/// a * b / denominator on token amounts, rounded down
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    scaled_mul_div(env, a, b, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    const E18: i128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_wad_mul_and_div() {
        let env = Env::default();
        assert_eq!(wad_mul(&env, 3 * WAD, WAD / 2), Some(3 * WAD / 2));
        assert_eq!(wad_div(&env, WAD, 4 * WAD), Some(WAD / 4));
        assert_eq!(wad_div(&env, WAD, 0), None);
    }

    #[test]
    fn test_wad_math_on_token_scale_amounts() {
        let env = Env::default();
        let supply = 1_000_000 * E18;
        assert_eq!(wad_mul(&env, supply, WAD / 4), Some(supply / 4));
        assert_eq!(wad_fraction(&env, supply / 20, supply), Some(WAD / 20));
        assert_eq!(wad_mul(&env, 1_200 * WAD, WAD / 2), Some(600 * WAD));
        assert_eq!(bps_of(&env, supply, 1_000), Some(supply / 10));
    }

    #[test]
    fn test_wide_path_floors_like_narrow_path() {
        let env = Env::default();
        let big = 4_000 * E18;
        assert_eq!(mul_div_floor(&env, big, 1_000 * E18 + 1, big), Some(1_000 * E18 + 1));
        assert_eq!(mul_div_floor(&env, big + 1, 1_000 * E18, 3 * E18), Some(1_333_333_333_333_333_333_333_666));
        // negative products floor toward -inf
        assert_eq!(mul_div_floor(&env, -big - 1, 1_000 * E18, 3 * E18), Some(-1_333_333_333_333_333_333_333_667));
    }

    #[test]
    fn test_result_overflow_is_none() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, i128::MAX, 2, 1), None);
        assert_eq!(mul_div_floor(&env, i128::MAX, i128::MAX, i128::MAX), Some(i128::MAX));
    }

    #[test]
    fn test_wad_fraction() {
        let env = Env::default();
        assert_eq!(wad_fraction(&env, 1, 4), Some(WAD / 4));
        assert_eq!(wad_fraction(&env, 5, 4), Some(WAD));
        assert_eq!(wad_fraction(&env, 0, 4), Some(0));
        assert_eq!(wad_fraction(&env, 1, 0), None);
    }

    #[test]
    fn test_bps_of_rounds_down() {
        let env = Env::default();
        assert_eq!(bps_of(&env, 10_000, 250), Some(250));
        assert_eq!(bps_of(&env, 999, 1), Some(0));
        assert_eq!(bps_of(&env, 1_000_000, 10_000), Some(1_000_000));
    }

    #[test]
    fn test_mul_div_rounding() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, 7, 11, 13), Some(5));
        assert_eq!(mul_div_floor(&env, -7, 11, 13), Some(-6));
        assert_eq!(mul_div_floor(&env, 7, 11, 0), None);
    }
}
