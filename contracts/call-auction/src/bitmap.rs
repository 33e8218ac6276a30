//! Sparse set of bid ticks: word index -> 256-bit mask, plus the aggregated
//! liquidity behind every set bit.
//!
//! Ticks are compressed by the spacing before indexing, so word `w` covers
//! compressed ticks `[256w, 256w + 255]`. Euclidean division keeps negative
//! ticks in the word below zero. A bit is set iff its tick holds liquidity.

use launch_math::{is_aligned, WORD_BITS};
use launch_types::{BitmapSummary, MAX_TICK, MIN_TICK};
use soroban_sdk::{log, Env};

use crate::errors::CallAuctionError;
use crate::storage::{
    get_summary, get_tick_liquidity, get_word, set_summary, set_tick_liquidity, set_word,
};

/// Scan direction along the price axis
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Copy)]
pub struct TickBitmap<'a> {
    env: &'a Env,
    tick_spacing: i32,
}

impl<'a> TickBitmap<'a> {
    pub fn new(env: &'a Env, tick_spacing: i32) -> Self {
        Self { env, tick_spacing }
    }

    pub fn liquidity_at(&self, tick: i32) -> i128 {
        get_tick_liquidity(self.env, tick)
    }

    pub fn summary(&self) -> BitmapSummary {
        get_summary(self.env)
    }

    pub fn is_active(&self, tick: i32) -> bool {
        if !is_aligned(tick, self.tick_spacing) {
            return false;
        }
        let (word_index, bit) = self.position(tick);
        get_word(self.env, word_index).is_set(bit)
    }

    /// Adds `liquidity_delta` at `tick`.
    ///
    /// Returns true when the tick flipped between active and inactive.
    pub fn set_tick(&self, tick: i32, liquidity_delta: i128) -> Result<bool, CallAuctionError> {
        if !is_aligned(tick, self.tick_spacing) || !(MIN_TICK..=MAX_TICK).contains(&tick) {
            log!(self.env, "invalid tick", tick, self.tick_spacing);
            return Err(CallAuctionError::InvalidTick);
        }

        let current = self.liquidity_at(tick);
        let next = current
            .checked_add(liquidity_delta)
            .ok_or(CallAuctionError::ArithmeticOverflow)?;
        if next < 0 {
            log!(self.env, "liquidity underflow", tick, current, liquidity_delta);
            return Err(CallAuctionError::LiquidityUnderflow);
        }
        set_tick_liquidity(self.env, tick, next);

        let flipped = (current == 0) != (next == 0);
        if !flipped {
            return Ok(false);
        }

        let (word_index, bit) = self.position(tick);
        let mut word = get_word(self.env, word_index);
        word.flip(bit);
        set_word(self.env, word_index, &word);

        let mut summary = self.summary();
        if next != 0 {
            if summary.has_active_ticks {
                summary.min_tick = summary.min_tick.min(tick);
                summary.max_tick = summary.max_tick.max(tick);
            } else {
                summary = BitmapSummary {
                    min_tick: tick,
                    max_tick: tick,
                    has_active_ticks: true,
                };
            }
        } else {
            // the old summary still bounds the remaining ticks
            let min_tick = if tick == summary.min_tick {
                self.scan(tick, Direction::Up, &summary)
            } else {
                Some(summary.min_tick)
            };
            let max_tick = if tick == summary.max_tick {
                self.scan(tick, Direction::Down, &summary)
            } else {
                Some(summary.max_tick)
            };
            summary = match (min_tick, max_tick) {
                (Some(min_tick), Some(max_tick)) => BitmapSummary {
                    min_tick,
                    max_tick,
                    has_active_ticks: true,
                },
                _ => BitmapSummary::default(),
            };
        }
        set_summary(self.env, &summary);
        Ok(true)
    }

    /// Nearest active tick strictly beyond `from` in `direction`
    pub fn next_active_tick(&self, from: i32, direction: Direction) -> Option<i32> {
        self.scan(from, direction, &self.summary())
    }

    /// Active ticks strictly beyond `from`, nearest first
    pub fn active_ticks(self, from: i32, direction: Direction) -> ActiveTicks<'a> {
        ActiveTicks {
            bitmap: self,
            cursor: Some(from),
            include_cursor: false,
            direction,
        }
    }

    /// Active ticks from `from` (inclusive), nearest first
    pub fn active_ticks_from(self, from: i32, direction: Direction) -> ActiveTicks<'a> {
        ActiveTicks {
            bitmap: self,
            cursor: Some(from),
            include_cursor: true,
            direction,
        }
    }

    fn position(&self, tick: i32) -> (i32, u32) {
        let compressed = tick / self.tick_spacing;
        let bits = WORD_BITS as i32;
        (compressed.div_euclid(bits), compressed.rem_euclid(bits) as u32)
    }

    fn tick_at(&self, word_index: i32, bit: u32) -> i32 {
        (word_index * WORD_BITS as i32 + bit as i32) * self.tick_spacing
    }

    fn scan(&self, from: i32, direction: Direction, summary: &BitmapSummary) -> Option<i32> {
        if !summary.has_active_ticks {
            return None;
        }
        let spacing = self.tick_spacing;
        let bits = WORD_BITS as i32;
        let compressed = from.div_euclid(spacing);
        let lowest = summary.min_tick / spacing;
        let highest = summary.max_tick / spacing;

        match direction {
            Direction::Down => {
                let start = if from.rem_euclid(spacing) == 0 {
                    compressed - 1
                } else {
                    compressed
                };
                if start < lowest {
                    return None;
                }
                let start = start.min(highest);
                let last_word = lowest.div_euclid(bits);
                let mut word_index = start.div_euclid(bits);
                let mut bit = start.rem_euclid(bits) as u32;
                loop {
                    let word = get_word(self.env, word_index);
                    if let Some(found) = word.highest_set_at_or_below(bit) {
                        return Some(self.tick_at(word_index, found));
                    }
                    if word_index <= last_word {
                        return None;
                    }
                    word_index -= 1;
                    bit = WORD_BITS - 1;
                }
            }
            Direction::Up => {
                let start = compressed + 1;
                if start > highest {
                    return None;
                }
                let start = start.max(lowest);
                let last_word = highest.div_euclid(bits);
                let mut word_index = start.div_euclid(bits);
                let mut bit = start.rem_euclid(bits) as u32;
                loop {
                    let word = get_word(self.env, word_index);
                    if let Some(found) = word.lowest_set_at_or_above(bit) {
                        return Some(self.tick_at(word_index, found));
                    }
                    if word_index >= last_word {
                        return None;
                    }
                    word_index += 1;
                    bit = 0;
                }
            }
        }
    }
}

/// Lazy walk over active ticks; every step reads at most the words between
/// two neighbouring ticks
pub struct ActiveTicks<'a> {
    bitmap: TickBitmap<'a>,
    cursor: Option<i32>,
    include_cursor: bool,
    direction: Direction,
}

impl Iterator for ActiveTicks<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let cursor = self.cursor?;
        let found = if self.include_cursor && self.bitmap.is_active(cursor) {
            Some(cursor)
        } else {
            self.bitmap.next_active_tick(cursor, self.direction)
        };
        self.include_cursor = false;
        self.cursor = found;
        found
    }
}
