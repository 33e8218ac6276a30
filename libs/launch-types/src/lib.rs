#![no_std]

mod auction;
mod call;
mod curve;
mod hook;
mod registry;
mod slug;
mod venue;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use auction::*;
pub use call::*;
pub use curve::*;
pub use hook::*;
pub use registry::*;
pub use slug::*;
pub use venue::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation (originally -887272 for uint160)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
/// Limited by u128 representation (originally 887272 for uint160)
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
pub const MIN_SQRT_RATIO: u128 = 18446743374134;

/// Maximum sqrt price (at MAX_TICK), bounded by u128::MAX
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693834;

/// 1e18, the unit for percentages and the scaled tick accumulator
pub const WAD: i128 = 1_000_000_000_000_000_000;

/// Basis point denominator (10_000 = 100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Largest tick spacing accepted by the auctions
pub const MAX_TICK_SPACING: i32 = 16_384;

/// Upper limit on price discovery slugs per placement
pub const MAX_PRICE_DISCOVERY_SLUGS: u32 = 15;

/// Position salts used by the slug planner
pub const LOWER_SLUG_SALT: u32 = 1;
pub const UPPER_SLUG_SALT: u32 = 2;
pub const PRICE_DISCOVERY_SALT_OFFSET: u32 = 3;

/// Smallest usable tick for a spacing (rounded toward zero, as the venue does)
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    (MIN_TICK / tick_spacing) * tick_spacing
}

/// Largest usable tick for a spacing
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    (MAX_TICK / tick_spacing) * tick_spacing
}
