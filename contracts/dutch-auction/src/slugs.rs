//! Slug position planner.
//!
//! Turns the accumulator state into three-to-N contiguous positions, all in
//! asset-price ticks: a numeraire slug below the anchor that buys back sold
//! tokens, an asset slug above it covering the next epoch's schedule, and
//! price discovery slugs holding the rest of the supply up to the curve top.

use launch_math::{
    align_tick, liquidity_for_asset_above, liquidity_for_numeraire_below, mul_div_floor,
    numeraire_to_absorb, tick_at_or_below_price, to_unsigned,
};
use launch_types::{
    min_usable_tick, AuctionState, DutchAuctionConfig, Placement, SlugPosition, LOWER_SLUG_SALT,
    PRICE_DISCOVERY_SALT_OFFSET, UPPER_SLUG_SALT,
};
use soroban_sdk::{contracttype, vec, Env, Vec};

use crate::epoch::{auction_tick, epoch_start, expected_sold_at, remaining_epochs};
use crate::errors::AuctionError;

/// The slugs of one placement
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlugSet {
    pub lower: SlugPosition,
    pub upper: SlugPosition,
    pub price_discovery: Vec<SlugPosition>,
    /// Venue price the slugs were planned around
    pub anchor_tick: i32,
}

impl SlugSet {
    /// Every slug, lower to upper
    pub fn positions(&self, env: &Env) -> Vec<SlugPosition> {
        let mut positions = vec![env, self.lower.clone(), self.upper.clone()];
        positions.append(&self.price_discovery);
        positions
    }

    /// Upper and price discovery slugs, the asset side of the curve
    pub fn ask_side(&self, env: &Env) -> Vec<SlugPosition> {
        let mut positions = vec![env, self.upper.clone()];
        positions.append(&self.price_discovery);
        positions
    }

    /// Slugs that carry liquidity, as handed to the venue
    pub fn to_placement(&self, env: &Env) -> Placement {
        let mut positions = Vec::new(env);
        for slug in self.positions(env).iter() {
            if !slug.is_empty() {
                positions.push_back(slug);
            }
        }
        Placement {
            positions,
            target_tick: self.anchor_tick,
        }
    }

    pub fn empty(env: &Env, tick: i32) -> Self {
        Self {
            lower: SlugPosition::empty_at(tick, LOWER_SLUG_SALT),
            upper: SlugPosition::empty_at(tick, UPPER_SLUG_SALT),
            price_discovery: Vec::new(env),
            anchor_tick: tick,
        }
    }

    pub fn asset_listed(&self) -> bool {
        !self.upper.is_empty() || self.price_discovery.iter().any(|slug| !slug.is_empty())
    }
}

/// Live curve `[tick_lower, tick_lower + gamma]` for an accumulator value
pub fn global_bounds(config: &DutchAuctionConfig, accumulator: i128) -> (i32, i32) {
    let tick_lower = align_tick(
        auction_tick(config, accumulator),
        config.tick_spacing,
        false,
    )
    .max(config.ending_tick);
    (tick_lower, tick_lower + config.gamma)
}

/// Tick the next placement starts from.
///
/// Without net sales since the last rebalance the price decays to the curve
/// bottom; otherwise the market price is kept, clamped into the curve. The
/// anchor stays one upper slug width under the curve top so the upper slug
/// always has room.
pub fn anchor_tick(
    config: &DutchAuctionConfig,
    accumulator: i128,
    market_tick: i32,
    net_sold: i128,
) -> i32 {
    let (tick_lower, tick_upper) = global_bounds(config, accumulator);
    if net_sold <= 0 {
        return tick_lower;
    }
    let ceiling = tick_upper - upper_slug_width(config);
    align_tick(market_tick, config.tick_spacing, false).clamp(tick_lower, ceiling)
}

/// Plans every slug for `epoch` around `anchor`
pub fn plan(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    anchor: i32,
    epoch: u64,
) -> Result<SlugSet, AuctionError> {
    let (_, tick_upper) = global_bounds(config, state.tick_accumulator);
    let unsold = config
        .num_tokens_to_sell
        .checked_sub(state.total_tokens_sold)
        .ok_or(AuctionError::ArithmeticOverflow)?
        .max(0);

    let lower = lower_slug(env, config, state, anchor);
    let (upper, listed) = upper_slug(env, config, state, anchor, tick_upper, epoch, unsold)?;
    let price_discovery = price_discovery_slugs(
        env,
        config,
        upper.tick_upper,
        tick_upper,
        epoch,
        unsold - listed,
    );

    Ok(SlugSet {
        lower,
        upper,
        price_discovery,
        anchor_tick: anchor,
    })
}

/// Proceeds below the anchor, sized to absorb every sold token
fn lower_slug(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    anchor: i32,
) -> SlugPosition {
    let sold = state.total_tokens_sold;
    let proceeds = state.total_proceeds;
    if sold <= 0 || proceeds <= 0 {
        return SlugPosition::empty_at(anchor, LOWER_SLUG_SALT);
    }

    let (tick_lower, _) = global_bounds(config, state.tick_accumulator);
    let range_lower = if tick_lower < anchor {
        tick_lower
    } else {
        anchor - config.tick_spacing
    };

    let required = numeraire_to_absorb(env, range_lower, anchor, to_unsigned(sold));
    if to_unsigned(proceeds) < required {
        return average_clearing_slug(env, config, sold, proceeds, anchor);
    }

    SlugPosition {
        tick_lower: range_lower,
        tick_upper: anchor,
        liquidity: liquidity_for_numeraire_below(env, range_lower, anchor, to_unsigned(proceeds)),
        salt: LOWER_SLUG_SALT,
    }
}

/// One-spacing slug just under the average sale price, holding all proceeds.
/// Its prices never exceed what sellers paid, so it absorbs every sold token.
pub fn average_clearing_slug(
    env: &Env,
    config: &DutchAuctionConfig,
    sold: i128,
    proceeds: i128,
    ceiling: i32,
) -> SlugPosition {
    let spacing = config.tick_spacing;
    let floor = min_usable_tick(spacing) + spacing;
    let price_tick = tick_at_or_below_price(
        env,
        to_unsigned(sold),
        to_unsigned(proceeds),
        floor,
        ceiling.max(floor),
    );
    let tick_upper = align_tick(price_tick, spacing, false).max(floor);
    let tick_lower = tick_upper - spacing;

    SlugPosition {
        tick_lower,
        tick_upper,
        liquidity: liquidity_for_numeraire_below(env, tick_lower, tick_upper, to_unsigned(proceeds)),
        salt: LOWER_SLUG_SALT,
    }
}

/// Width of the upper slug: the curve share of one epoch, at least one spacing
pub fn upper_slug_width(config: &DutchAuctionConfig) -> i32 {
    let share = config.gamma as i128 * config.epoch_length as i128 / config.duration() as i128;
    align_tick(share as i32, config.tick_spacing, false).max(config.tick_spacing)
}

/// Tokens the schedule releases per epoch
pub fn epoch_share(env: &Env, config: &DutchAuctionConfig) -> Result<i128, AuctionError> {
    mul_div_floor(
        env,
        config.num_tokens_to_sell,
        config.epoch_length as i128,
        config.duration() as i128,
    )
    .ok_or(AuctionError::ArithmeticOverflow)
}

/// Asset just above the anchor: the shortfall against the schedule at the
/// end of `epoch`, or one epoch's share when sales are ahead.
fn upper_slug(
    env: &Env,
    config: &DutchAuctionConfig,
    state: &AuctionState,
    anchor: i32,
    tick_upper: i32,
    epoch: u64,
    unsold: i128,
) -> Result<(SlugPosition, i128), AuctionError> {
    let expected_next = expected_sold_at(env, config, epoch_start(config, epoch + 1))?;
    let shortfall = expected_next - state.total_tokens_sold;
    let tokens = if shortfall > 0 {
        shortfall
    } else {
        epoch_share(env, config)?
    }
    .min(unsold);

    let top = (anchor + upper_slug_width(config)).min(tick_upper);
    if top <= anchor || tokens <= 0 {
        return Ok((SlugPosition::empty_at(anchor, UPPER_SLUG_SALT), 0));
    }

    let slug = SlugPosition {
        tick_lower: anchor,
        tick_upper: top,
        liquidity: liquidity_for_asset_above(env, anchor, top, to_unsigned(tokens)),
        salt: UPPER_SLUG_SALT,
    };
    Ok((slug, tokens))
}

/// Equal bands from `start` to the curve top, one per remaining epoch at most
fn price_discovery_slugs(
    env: &Env,
    config: &DutchAuctionConfig,
    start: i32,
    tick_upper: i32,
    epoch: u64,
    unlisted: i128,
) -> Vec<SlugPosition> {
    let mut slugs = Vec::new(env);
    let spacing = config.tick_spacing;
    let span = tick_upper - start;
    let fit = (span / spacing).max(0) as u64;
    let count = (config.num_pd_slugs as u64)
        .min(remaining_epochs(config, epoch))
        .min(fit);
    if count == 0 || unlisted <= 0 {
        return slugs;
    }

    let band = align_tick(span / count as i32, spacing, false);
    let per_slug = unlisted / count as i128;
    let mut tick_lower = start;
    for index in 0..count {
        let top = if index + 1 == count {
            tick_upper
        } else {
            tick_lower + band
        };
        slugs.push_back(SlugPosition {
            tick_lower,
            tick_upper: top,
            liquidity: liquidity_for_asset_above(env, tick_lower, top, to_unsigned(per_slug)),
            salt: PRICE_DISCOVERY_SALT_OFFSET + index as u32,
        });
        tick_lower = top;
    }
    slugs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::accumulator_floor;
    use crate::invariants::{slugs_aligned, slugs_contiguous};
    use crate::test_support::{sample_config, E18};
    use launch_types::WAD;
    use proptest::prelude::*;
    use soroban_sdk::Env;

    #[test]
    fn test_initial_placement() {
        let env = Env::default();
        let config = sample_config();
        let slugs = plan(&env, &config, &AuctionState::default(), config.starting_tick, 0).unwrap();

        assert_eq!(slugs.lower, SlugPosition::empty_at(6_000, LOWER_SLUG_SALT));
        assert_eq!((slugs.upper.tick_lower, slugs.upper.tick_upper), (6_000, 6_120));
        assert!(slugs.upper.liquidity > 0);

        assert_eq!(slugs.price_discovery.len(), 3);
        let bounds: std::vec::Vec<(i32, i32)> = slugs
            .price_discovery
            .iter()
            .map(|slug| (slug.tick_lower, slug.tick_upper))
            .collect();
        assert_eq!(bounds, std::vec![(6_120, 6_480), (6_480, 6_840), (6_840, 7_200)]);
        assert!(slugs_contiguous(&slugs.positions(&env)));
        assert!(slugs_aligned(&slugs.positions(&env), config.tick_spacing));
    }

    #[test]
    fn test_zero_width_lower_slug_is_not_placed() {
        let env = Env::default();
        let config = sample_config();
        let slugs = plan(&env, &config, &AuctionState::default(), config.starting_tick, 0).unwrap();
        let placement = slugs.to_placement(&env);
        assert_eq!(placement.positions.len(), 4);
        assert_eq!(placement.positions.get(0).unwrap().salt, UPPER_SLUG_SALT);
        assert_eq!(placement.target_tick, config.starting_tick);
    }

    #[test]
    fn test_global_bounds_follow_accumulator() {
        let config = sample_config();
        assert_eq!(global_bounds(&config, 0), (6_000, 7_200));
        assert_eq!(global_bounds(&config, -90 * WAD), (5_880, 7_080));
        assert_eq!(global_bounds(&config, accumulator_floor(&config)), (-6_000, -4_800));
    }

    #[test]
    fn test_anchor_decays_without_sales() {
        let config = sample_config();
        let accumulator = -config.max_tick_delta_per_epoch;
        assert_eq!(anchor_tick(&config, accumulator, 6_000, 0), 4_800);
        assert_eq!(anchor_tick(&config, accumulator, 5_130, E18), 5_100);
        assert_eq!(anchor_tick(&config, accumulator, 9_000, E18), 5_880);
        assert_eq!(anchor_tick(&config, accumulator, 0, E18), 4_800);
    }

    #[test]
    fn test_market_above_curve_still_lists_asset() {
        let env = Env::default();
        let config = sample_config();
        // 20% sold in epoch 0, then idle until a trade in epoch 3
        let mut state = AuctionState {
            total_tokens_sold: config.num_tokens_to_sell / 5,
            total_proceeds: 30_000 * E18,
            ..AuctionState::default()
        };
        let market = 6_240;
        let now = config.starting_time + 3 * crate::test_support::EPOCH;
        crate::epoch::advance(&env, &config, &mut state, now, market).unwrap();
        assert_eq!(state.tick_accumulator, -2_160 * WAD);
        assert_eq!(global_bounds(&config, state.tick_accumulator), (3_840, 5_040));

        let anchor = anchor_tick(&config, state.tick_accumulator, market, config.num_tokens_to_sell / 5);
        assert_eq!(anchor, 4_920);
        let slugs = plan(&env, &config, &state, anchor, 3).unwrap();
        assert_eq!((slugs.upper.tick_lower, slugs.upper.tick_upper), (4_920, 5_040));
        assert!(slugs.upper.liquidity > 0);
        assert!(slugs.asset_listed());
    }

    #[test]
    fn test_lower_slug_holds_proceeds_below_anchor() {
        let env = Env::default();
        let config = sample_config();
        let state = AuctionState {
            last_epoch: 1,
            tick_accumulator: -config.max_tick_delta_per_epoch,
            total_tokens_sold: 1_000 * E18,
            total_proceeds: 2_000 * E18,
            total_tokens_sold_last_epoch: 1_000 * E18,
        };
        let slugs = plan(&env, &config, &state, 5_100, 1).unwrap();
        assert_eq!((slugs.lower.tick_lower, slugs.lower.tick_upper), (4_800, 5_100));
        assert!(slugs.lower.liquidity > 0);
        assert!(slugs_contiguous(&slugs.positions(&env)));
    }

    #[test]
    fn test_lower_slug_gets_width_when_anchor_is_curve_bottom() {
        let env = Env::default();
        let config = sample_config();
        let state = AuctionState {
            total_tokens_sold: E18,
            total_proceeds: 10 * E18,
            ..AuctionState::default()
        };
        let slugs = plan(&env, &config, &state, config.starting_tick, 0).unwrap();
        assert_eq!((slugs.lower.tick_lower, slugs.lower.tick_upper), (5_940, 6_000));
    }

    #[test]
    fn test_short_proceeds_move_lower_slug_to_average_price() {
        let env = Env::default();
        let config = sample_config();
        // sold at ~1.0 while the curve sits near 1.0001^5100
        let state = AuctionState {
            last_epoch: 1,
            tick_accumulator: -config.max_tick_delta_per_epoch,
            total_tokens_sold: 1_000 * E18,
            total_proceeds: 1_000 * E18,
            total_tokens_sold_last_epoch: 1_000 * E18,
        };
        let slugs = plan(&env, &config, &state, 5_100, 1).unwrap();
        assert!(slugs.lower.tick_upper <= 0);
        assert!(slugs.lower.tick_upper > -config.tick_spacing * 2);
        assert_eq!(slugs.lower.tick_upper - slugs.lower.tick_lower, config.tick_spacing);
        assert!(slugs_contiguous(&slugs.ask_side(&env)));
    }

    #[test]
    fn test_upper_slug_covers_schedule_shortfall() {
        let env = Env::default();
        let config = sample_config();
        let slugs = plan(&env, &config, &AuctionState::default(), config.starting_tick, 0).unwrap();
        let expected = liquidity_for_asset_above(
            &env,
            6_000,
            6_120,
            to_unsigned(config.num_tokens_to_sell / 10),
        );
        assert_eq!(slugs.upper.liquidity, expected);
    }

    #[test]
    fn test_final_epoch_has_no_price_discovery() {
        let env = Env::default();
        let config = sample_config();
        let last = config.total_epochs() - 1;
        let state = AuctionState {
            last_epoch: last,
            ..AuctionState::default()
        };
        let slugs = plan(&env, &config, &state, config.starting_tick, last).unwrap();
        assert_eq!(slugs.price_discovery.len(), 0);
        let all_unsold = liquidity_for_asset_above(
            &env,
            slugs.upper.tick_lower,
            slugs.upper.tick_upper,
            to_unsigned(config.num_tokens_to_sell),
        );
        assert_eq!(slugs.upper.liquidity, all_unsold);
    }

    #[test]
    fn test_sold_out_lists_no_asset() {
        let env = Env::default();
        let config = sample_config();
        let state = AuctionState {
            total_tokens_sold: config.num_tokens_to_sell,
            total_proceeds: config.maximum_proceeds,
            ..AuctionState::default()
        };
        let slugs = plan(&env, &config, &state, 6_600, 0).unwrap();
        assert!(!slugs.asset_listed());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_placements_are_contiguous_and_aligned(
            epoch in 0u64..10,
            accumulator_steps in 0i128..10,
            sold_bps in 0i128..10_000,
            price_bps in 1i128..40_000,
            market_offset in 0i32..1_500,
        ) {
            let env = Env::default();
            let config = sample_config();
            let sold = config.num_tokens_to_sell * sold_bps / 10_000;
            let state = AuctionState {
                last_epoch: epoch,
                tick_accumulator: -accumulator_steps * config.max_tick_delta_per_epoch,
                total_tokens_sold: sold,
                total_proceeds: sold * price_bps / 10_000,
                total_tokens_sold_last_epoch: 0,
            };
            let (tick_lower, tick_upper) = global_bounds(&config, state.tick_accumulator);
            let anchor = anchor_tick(&config, state.tick_accumulator, tick_lower + market_offset, sold);
            let slugs = plan(&env, &config, &state, anchor, epoch).unwrap();

            prop_assert!(slugs_aligned(&slugs.positions(&env), config.tick_spacing));
            prop_assert!(slugs_contiguous(&slugs.ask_side(&env)));
            prop_assert!(slugs.lower.tick_upper <= anchor);
            prop_assert_eq!(slugs.upper.tick_lower, anchor);
            let top = slugs.price_discovery.last().map(|slug| slug.tick_upper).unwrap_or(slugs.upper.tick_upper);
            prop_assert!(top <= tick_upper);
            if slugs.lower.tick_upper == anchor {
                prop_assert!(slugs_contiguous(&slugs.positions(&env)));
            }
        }
    }
}
