use soroban_sdk::contracttype;

/// Lifecycle shared by the launch contracts. Transitions only move forward.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolStatus {
    Uninitialized = 0,
    Initialized = 1,
    /// No new bids or buys; waiting for settlement or sell-backs
    Locked = 2,
    Settled = 3,
    Exited = 4,
}

/// Dutch auction configuration - immutable after initialization
///
/// All ticks are asset-price ticks: the price of one asset unit in numeraire
/// is 1.0001^tick, so the auction decays from `starting_tick` down to
/// `ending_tick`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DutchAuctionConfig {
    /// Asset supply deposited by the airlock and offered for sale
    pub num_tokens_to_sell: i128,
    /// Proceeds needed for migration at maturity
    pub minimum_proceeds: i128,
    /// Proceeds that end the auction early
    pub maximum_proceeds: i128,
    pub starting_time: u64,
    pub ending_time: u64,
    pub starting_tick: i32,
    pub ending_tick: i32,
    pub epoch_length: u64,
    /// Width of the live curve above the auction price, in ticks
    pub gamma: i32,
    pub tick_spacing: i32,
    pub num_pd_slugs: u32,
    /// Largest accumulator move per epoch, in WAD-scaled ticks
    pub max_tick_delta_per_epoch: i128,
    /// True when the venue orders the asset as token0
    pub asset_is_token0: bool,
}

impl DutchAuctionConfig {
    pub fn duration(&self) -> u64 {
        self.ending_time - self.starting_time
    }

    pub fn total_epochs(&self) -> u64 {
        self.duration() / self.epoch_length
    }
}

/// Epoch accumulator state - rewritten on every trade
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuctionState {
    /// Epoch of the last rebalance (epoch 0 is the initial placement)
    pub last_epoch: u64,
    /// Cumulative price drift in WAD-scaled ticks, never positive
    pub tick_accumulator: i128,
    pub total_tokens_sold: i128,
    pub total_proceeds: i128,
    /// `total_tokens_sold` as of the last epoch transition
    pub total_tokens_sold_last_epoch: i128,
}
