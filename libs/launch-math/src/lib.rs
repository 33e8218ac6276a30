#![no_std]

#[cfg(test)]
extern crate std;

pub mod full_math;
pub mod liquidity_math;
pub mod tick_math;
pub mod wad_math;
pub mod word256;

pub use full_math::*;
pub use liquidity_math::*;
pub use tick_math::*;
pub use wad_math::*;
pub use word256::*;
