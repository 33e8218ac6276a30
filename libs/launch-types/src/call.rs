use soroban_sdk::{contracttype, Address};

/// Call auction configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallAuctionConfig {
    pub tick_spacing: i32,
    pub starting_time: u64,
    pub auction_duration: u64,
    /// Lowest asset-price tick a bid may sit at
    pub min_acceptable_tick: i32,
    /// Asset deposited for sale plus incentives
    pub total_tokens: i128,
    /// Share of `total_tokens` paid out as time-in-range incentives
    pub incentive_share_bps: u32,
    /// Smallest bid, in asset units
    pub min_liquidity: i128,
}

impl CallAuctionConfig {
    pub fn ending_time(&self) -> u64 {
        self.starting_time + self.auction_duration
    }
}

/// A resting bid for `liquidity` asset units at `tick` or better
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bid {
    pub bidder: Address,
    pub tick: i32,
    pub liquidity: i128,
    /// Numeraire held for the bid at its own limit price
    pub escrow: i128,
    /// Tick's cumulative in-range seconds when the bid was placed
    pub seconds_in_range_snapshot: u64,
}

/// Running in-range timer of a single tick
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickTimer {
    pub in_range: bool,
    pub entered_at: u64,
    /// Seconds accumulated by completed in-range stretches
    pub seconds_in_range: u64,
}

impl TickTimer {
    /// Total in-range seconds as of `now`, including an open stretch
    pub fn cumulative(&self, now: u64) -> u64 {
        if self.in_range {
            self.seconds_in_range + (now - self.entered_at)
        } else {
            self.seconds_in_range
        }
    }
}

/// Incrementally maintained extremes of the active tick set
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BitmapSummary {
    pub min_tick: i32,
    pub max_tick: i32,
    pub has_active_ticks: bool,
}

/// Auction-wide bookkeeping for bids and incentives
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallAuctionTotals {
    /// Running clearing-tick estimate; ticks at or above it are in range
    pub in_range_boundary: Option<i32>,
    /// Aggregated liquidity of all in-range ticks
    pub in_range_liquidity: i128,
    /// Sum of liquidity * in-range seconds over live bids
    pub weight_accumulator: u128,
    pub last_update: u64,
    pub next_bid_id: u32,
    pub open_bids: u32,
    pub locked_at: Option<u64>,
}

/// Outcome of the one-shot settlement pass
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettlementResult {
    /// None when the auction had no bids
    pub clearing_tick: Option<i32>,
    pub tokens_sold: i128,
    /// Pro-rata fill at the clearing tick is numerator / denominator
    pub fill_numerator: i128,
    pub fill_denominator: i128,
    /// Numeraire owed to the issuer
    pub proceeds: i128,
    pub incentive_pool: i128,
    pub total_weight: u128,
    pub closed_at: u64,
}

/// What a bidder receives when claiming a settled bid
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BidClaim {
    pub asset_filled: i128,
    pub incentive: i128,
    pub numeraire_paid: i128,
    pub numeraire_refund: i128,
}
