use launch_types::{DutchAuctionConfig, WAD};

pub const E18: i128 = 1_000_000_000_000_000_000;
pub const EPOCH: u64 = 3_600;
pub const START: u64 = 1_000;

/// Ten one-hour epochs, decaying from tick 6000 to -6000
pub fn sample_config() -> DutchAuctionConfig {
    DutchAuctionConfig {
        num_tokens_to_sell: 100_000 * E18,
        minimum_proceeds: 1_000 * E18,
        maximum_proceeds: 50_000 * E18,
        starting_time: START,
        ending_time: START + 10 * EPOCH,
        starting_tick: 6_000,
        ending_tick: -6_000,
        epoch_length: EPOCH,
        gamma: 1_200,
        tick_spacing: 60,
        num_pd_slugs: 3,
        max_tick_delta_per_epoch: 1_200 * WAD,
        asset_is_token0: true,
    }
}
