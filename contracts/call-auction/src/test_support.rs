use launch_types::CallAuctionConfig;

pub const START: u64 = 1_000;
pub const DURATION: u64 = 10_000;

/// 10% of a 1M supply goes to incentives; bids from tick -6000 up
pub fn sample_config() -> CallAuctionConfig {
    CallAuctionConfig {
        tick_spacing: 60,
        starting_time: START,
        auction_duration: DURATION,
        min_acceptable_tick: -6_000,
        total_tokens: 1_000_000,
        incentive_share_bps: 1_000,
        min_liquidity: 10,
    }
}
