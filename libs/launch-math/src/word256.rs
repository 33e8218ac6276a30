//! 256-bit occupancy words for the tick bitmap.

use core::ops::{BitAnd, BitOr, BitXor, Not};
use soroban_sdk::contracttype;

pub const WORD_BITS: u32 = 256;

/// A 256-bit mask stored as two u128 halves; bit 0 is the lowest bit of `lo`
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Word256 {
    pub hi: u128,
    pub lo: u128,
}

impl Word256 {
    pub const ZERO: Word256 = Word256 { hi: 0, lo: 0 };
    pub const MAX: Word256 = Word256 {
        hi: u128::MAX,
        lo: u128::MAX,
    };

    pub fn bit(position: u32) -> Self {
        debug_assert!(position < WORD_BITS);
        if position >= 128 {
            Word256 {
                hi: 1u128 << (position - 128),
                lo: 0,
            }
        } else {
            Word256 {
                hi: 0,
                lo: 1u128 << position,
            }
        }
    }

    /// Bits 0..=position set
    pub fn mask_at_or_below(position: u32) -> Self {
        debug_assert!(position < WORD_BITS);
        if position >= 128 {
            let hi = if position == 255 {
                u128::MAX
            } else {
                (1u128 << (position - 127)) - 1
            };
            Word256 { hi, lo: u128::MAX }
        } else {
            let lo = if position == 127 {
                u128::MAX
            } else {
                (1u128 << (position + 1)) - 1
            };
            Word256 { hi: 0, lo }
        }
    }

    /// Bits position..=255 set
    pub fn mask_at_or_above(position: u32) -> Self {
        !Self::mask_at_or_below(position) | Self::bit(position)
    }

    pub fn is_zero(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    pub fn is_set(&self, position: u32) -> bool {
        !(*self & Self::bit(position)).is_zero()
    }

    pub fn set(&mut self, position: u32) {
        *self = *self | Self::bit(position);
    }

    pub fn clear(&mut self, position: u32) {
        *self = *self & !Self::bit(position);
    }

    pub fn flip(&mut self, position: u32) {
        *self = *self ^ Self::bit(position);
    }

    pub fn count_ones(&self) -> u32 {
        self.hi.count_ones() + self.lo.count_ones()
    }

    pub fn highest_set_bit(&self) -> Option<u32> {
        if self.hi != 0 {
            Some(255 - self.hi.leading_zeros())
        } else if self.lo != 0 {
            Some(127 - self.lo.leading_zeros())
        } else {
            None
        }
    }

    pub fn lowest_set_bit(&self) -> Option<u32> {
        if self.lo != 0 {
            Some(self.lo.trailing_zeros())
        } else if self.hi != 0 {
            Some(128 + self.hi.trailing_zeros())
        } else {
            None
        }
    }

    pub fn highest_set_at_or_below(&self, position: u32) -> Option<u32> {
        (*self & Self::mask_at_or_below(position)).highest_set_bit()
    }

    pub fn lowest_set_at_or_above(&self, position: u32) -> Option<u32> {
        (*self & Self::mask_at_or_above(position)).lowest_set_bit()
    }
}

impl BitAnd for Word256 {
    type Output = Word256;

    fn bitand(self, rhs: Word256) -> Word256 {
        Word256 {
            hi: self.hi & rhs.hi,
            lo: self.lo & rhs.lo,
        }
    }
}

impl BitOr for Word256 {
    type Output = Word256;

    fn bitor(self, rhs: Word256) -> Word256 {
        Word256 {
            hi: self.hi | rhs.hi,
            lo: self.lo | rhs.lo,
        }
    }
}

impl BitXor for Word256 {
    type Output = Word256;

    fn bitxor(self, rhs: Word256) -> Word256 {
        Word256 {
            hi: self.hi ^ rhs.hi,
            lo: self.lo ^ rhs.lo,
        }
    }
}

impl Not for Word256 {
    type Output = Word256;

    fn not(self) -> Word256 {
        Word256 {
            hi: !self.hi,
            lo: !self.lo,
        }
    }
}
