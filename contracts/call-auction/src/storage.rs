use launch_math::Word256;
use launch_types::{
    Bid, BitmapSummary, CallAuctionConfig, CallAuctionTotals, PoolStatus, SettlementResult,
    TickTimer,
};
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::CallAuctionError;

/// Storage keys for the call auction.
///
/// Auction-wide records live in instance storage. Per-tick and per-bid
/// records live in persistent storage and are removed once empty.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Parties,
    Status,
    Summary,
    Totals,
    Settlement,
    /// Word index -> 256-bit occupancy mask (Persistent storage)
    BitmapWord(i32),
    /// Tick -> aggregated bid liquidity (Persistent storage)
    TickLiquidity(i32),
    /// Tick -> in-range timer (Persistent storage)
    TickTimer(i32),
    /// Tick -> number of open bids (Persistent storage)
    TickBids(i32),
    /// Bid id -> bid (Persistent storage)
    Bid(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parties {
    pub airlock: Address,
    pub asset: Address,
    pub numeraire: Address,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<CallAuctionConfig, CallAuctionError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CallAuctionError::NotInitialized)
}

pub fn set_config(env: &Env, config: &CallAuctionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_parties(env: &Env) -> Result<Parties, CallAuctionError> {
    env.storage()
        .instance()
        .get(&DataKey::Parties)
        .ok_or(CallAuctionError::NotInitialized)
}

pub fn set_parties(env: &Env, parties: &Parties) {
    env.storage().instance().set(&DataKey::Parties, parties);
}

pub fn get_status(env: &Env) -> PoolStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or(PoolStatus::Uninitialized)
}

pub fn set_status(env: &Env, status: PoolStatus) {
    env.storage().instance().set(&DataKey::Status, &status);
}

// === Bookkeeping ===

pub fn get_summary(env: &Env) -> BitmapSummary {
    env.storage()
        .instance()
        .get(&DataKey::Summary)
        .unwrap_or_default()
}

pub fn set_summary(env: &Env, summary: &BitmapSummary) {
    env.storage().instance().set(&DataKey::Summary, summary);
}

pub fn get_totals(env: &Env) -> CallAuctionTotals {
    env.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_default()
}

pub fn set_totals(env: &Env, totals: &CallAuctionTotals) {
    env.storage().instance().set(&DataKey::Totals, totals);
    extend_instance_ttl(env);
}

pub fn get_settlement(env: &Env) -> Option<SettlementResult> {
    env.storage().instance().get(&DataKey::Settlement)
}

pub fn set_settlement(env: &Env, settlement: &SettlementResult) {
    env.storage().instance().set(&DataKey::Settlement, settlement);
}

// === Bitmap ===

pub fn get_word(env: &Env, index: i32) -> Word256 {
    env.storage()
        .persistent()
        .get(&DataKey::BitmapWord(index))
        .unwrap_or(Word256::ZERO)
}

pub fn set_word(env: &Env, index: i32, word: &Word256) {
    let key = DataKey::BitmapWord(index);
    if word.is_zero() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, word);
        extend_persistent_ttl(env, &key);
    }
}

pub fn get_tick_liquidity(env: &Env, tick: i32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TickLiquidity(tick))
        .unwrap_or(0)
}

pub fn set_tick_liquidity(env: &Env, tick: i32, liquidity: i128) {
    let key = DataKey::TickLiquidity(tick);
    if liquidity == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &liquidity);
        extend_persistent_ttl(env, &key);
    }
}

// === Timers ===

pub fn get_timer(env: &Env, tick: i32) -> TickTimer {
    env.storage()
        .persistent()
        .get(&DataKey::TickTimer(tick))
        .unwrap_or_default()
}

pub fn set_timer(env: &Env, tick: i32, timer: &TickTimer) {
    let key = DataKey::TickTimer(tick);
    env.storage().persistent().set(&key, timer);
    extend_persistent_ttl(env, &key);
}

pub fn get_tick_bids(env: &Env, tick: i32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::TickBids(tick))
        .unwrap_or(0)
}

pub fn set_tick_bids(env: &Env, tick: i32, bids: u32) {
    let key = DataKey::TickBids(tick);
    if bids == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &bids);
        extend_persistent_ttl(env, &key);
    }
}

// === Bids ===

pub fn get_bid(env: &Env, id: u32) -> Result<Bid, CallAuctionError> {
    let key = DataKey::Bid(id);
    let bid = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(CallAuctionError::BidNotFound)?;
    extend_persistent_ttl(env, &key);
    Ok(bid)
}

pub fn set_bid(env: &Env, id: u32, bid: &Bid) {
    let key = DataKey::Bid(id);
    env.storage().persistent().set(&key, bid);
    extend_persistent_ttl(env, &key);
}

pub fn remove_bid(env: &Env, id: u32) {
    env.storage().persistent().remove(&DataKey::Bid(id));
}
