use launch_types::{AuctionState, DookConfig, DutchAuctionConfig, PoolStatus};
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::AuctionError;
use crate::slugs::SlugSet;

/// Storage keys for the auction contract. Everything lives in instance
/// storage: the auction keeps a fixed, small footprint.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Parties,
    Dook,
    State,
    Status,
    /// Slugs of the latest placement, in asset-price ticks
    Slugs,
}

/// Contracts the auction talks to, fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parties {
    pub airlock: Address,
    pub registry: Address,
    pub venue: Address,
    pub asset: Address,
    pub numeraire: Address,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<DutchAuctionConfig, AuctionError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(AuctionError::NotInitialized)
}

pub fn set_config(env: &Env, config: &DutchAuctionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_parties(env: &Env) -> Result<Parties, AuctionError> {
    env.storage()
        .instance()
        .get(&DataKey::Parties)
        .ok_or(AuctionError::NotInitialized)
}

pub fn set_parties(env: &Env, parties: &Parties) {
    env.storage().instance().set(&DataKey::Parties, parties);
}

pub fn get_dook(env: &Env) -> Option<DookConfig> {
    env.storage().instance().get(&DataKey::Dook)
}

pub fn set_dook(env: &Env, dook: &Option<DookConfig>) {
    match dook {
        Some(dook) => env.storage().instance().set(&DataKey::Dook, dook),
        None => env.storage().instance().remove(&DataKey::Dook),
    }
}

// === State ===

pub fn get_state(env: &Env) -> AuctionState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_default()
}

pub fn set_state(env: &Env, state: &AuctionState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
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

// === Slugs ===

pub fn get_slugs(env: &Env) -> Result<SlugSet, AuctionError> {
    env.storage()
        .instance()
        .get(&DataKey::Slugs)
        .ok_or(AuctionError::NotInitialized)
}

pub fn set_slugs(env: &Env, slugs: &SlugSet) {
    env.storage().instance().set(&DataKey::Slugs, slugs);
}
