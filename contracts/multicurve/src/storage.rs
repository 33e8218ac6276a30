use launch_types::{CurveSegment, Placement, PoolStatus};
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::CurveError;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Parties,
    Status,
    /// Bands as placed, in asset-price ticks
    Plan,
}

/// Launch parameters, fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveConfig {
    pub tick_spacing: i32,
    pub curves: Vec<CurveSegment>,
    /// Asset taken from the airlock and spread over the curves
    pub supply: i128,
    pub asset_is_token0: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parties {
    pub airlock: Address,
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

pub fn get_config(env: &Env) -> Result<CurveConfig, CurveError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CurveError::NotInitialized)
}

pub fn set_config(env: &Env, config: &CurveConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_parties(env: &Env) -> Result<Parties, CurveError> {
    env.storage()
        .instance()
        .get(&DataKey::Parties)
        .ok_or(CurveError::NotInitialized)
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

pub fn get_plan(env: &Env) -> Result<Placement, CurveError> {
    env.storage()
        .instance()
        .get(&DataKey::Plan)
        .ok_or(CurveError::NotInitialized)
}

pub fn set_plan(env: &Env, plan: &Placement) {
    env.storage().instance().set(&DataKey::Plan, plan);
}
