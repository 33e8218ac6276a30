use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

use crate::{BalanceDelta, TradeParams};

/// Lifecycle points a dook can subscribe to
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HookCallback {
    OnInitialization,
    OnSwap,
    OnGraduation,
}

/// Optional per-pool extension contract and the callbacks it wants
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DookConfig {
    pub address: Address,
    pub callbacks: Vec<HookCallback>,
}

impl DookConfig {
    pub fn wants(&self, callback: HookCallback) -> bool {
        self.callbacks.contains(callback)
    }
}

/// Interface a dook contract exposes to the auction that owns it
#[contractclient(name = "DookClient")]
pub trait DookInterface {
    fn on_initialization(env: Env, pool: Address, asset: Address, numeraire: Address);
    fn on_swap(env: Env, pool: Address, trader: Address, params: TradeParams, delta: BalanceDelta);
    fn on_graduation(env: Env, pool: Address, recipient: Address);
}
