use launch_types::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use soroban_sdk::{Env, U256};

/// sqrt(1.0001^-(2^i)) in Q128, indexed by bit i of |tick|
const SQRT_RATIO_FACTORS: [u128; 19] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
];

fn q128(env: &Env) -> U256 {
    U256::from_u128(env, 1u128 << 64).mul(&U256::from_u128(env, 1u128 << 64))
}

fn u256_max(env: &Env) -> U256 {
    U256::from_u128(env, u128::MAX)
        .mul(&q128(env))
        .add(&U256::from_u128(env, u128::MAX))
}

/// sqrt(1.0001^tick) * 2^96, rounded up like the venue does
pub fn get_sqrt_ratio_at_tick(env: &Env, tick: i32) -> u128 {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        panic!("Tick out of bounds");
    }

    let abs_tick = tick.unsigned_abs();
    let q128 = q128(env);
    let mut ratio = q128.clone();
    for (bit, factor) in SQRT_RATIO_FACTORS.iter().enumerate() {
        if abs_tick & (1 << bit) != 0 {
            ratio = ratio.mul(&U256::from_u128(env, *factor)).div(&q128);
        }
    }

    if tick > 0 {
        ratio = u256_max(env).div(&ratio);
    }

    // Q128 -> Q96
    let shift = U256::from_u128(env, 1u128 << 32);
    let remainder = ratio.rem_euclid(&shift);
    let mut result = ratio.div(&shift).to_u128().unwrap_or(u128::MAX);
    if remainder != U256::from_u32(env, 0) && result < u128::MAX {
        result += 1;
    }
    result.clamp(MIN_SQRT_RATIO, MAX_SQRT_RATIO)
}

/// Greatest tick whose sqrt ratio is at most `sqrt_price_x96`
pub fn get_tick_at_sqrt_ratio(env: &Env, sqrt_price_x96: u128) -> i32 {
    if !(MIN_SQRT_RATIO..MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        panic!("sqrt price out of bounds");
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(env, mid) <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

/// Round a tick onto the spacing grid, toward -inf or +inf
pub fn align_tick(tick: i32, tick_spacing: i32, round_up: bool) -> i32 {
    let floor = tick.div_euclid(tick_spacing) * tick_spacing;
    if round_up && floor != tick {
        floor + tick_spacing
    } else {
        floor
    }
}

pub fn is_aligned(tick: i32, tick_spacing: i32) -> bool {
    tick.rem_euclid(tick_spacing) == 0
}
