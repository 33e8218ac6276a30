//! In-process test doubles for the venue and dook collaborators.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

use crate::{BalanceDelta, HookCallback, Placement, TradeParams};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Tick,
    Placement,
    PlacementCount,
    PlacementDelta,
    NextSwap,
    SwapCount,
    Calls(HookCallback),
}

#[contracttype]
#[derive(Clone)]
struct StagedSwap {
    delta: BalanceDelta,
    tick_after: i32,
}

/// Venue that records placements and replays staged trade results
#[contract]
pub struct MockVenue;

#[contractimpl]
impl MockVenue {
    pub fn set_tick(env: Env, tick: i32) {
        env.storage().instance().set(&MockKey::Tick, &tick);
    }

    /// Result returned by the next `swap`, which also moves the tick
    pub fn stage_swap(env: Env, delta: BalanceDelta, tick_after: i32) {
        env.storage()
            .instance()
            .set(&MockKey::NextSwap, &StagedSwap { delta, tick_after });
    }

    /// Delta returned by every following `set_positions`
    pub fn stage_placement_delta(env: Env, delta: BalanceDelta) {
        env.storage().instance().set(&MockKey::PlacementDelta, &delta);
    }

    pub fn placement(env: Env) -> Option<Placement> {
        env.storage().instance().get(&MockKey::Placement)
    }

    pub fn placement_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::PlacementCount)
            .unwrap_or(0)
    }

    pub fn swap_count(env: Env) -> u32 {
        env.storage().instance().get(&MockKey::SwapCount).unwrap_or(0)
    }

    pub fn current_tick(env: Env) -> i32 {
        env.storage().instance().get(&MockKey::Tick).unwrap_or(0)
    }

    pub fn set_positions(env: Env, placement: Placement) -> BalanceDelta {
        let count = Self::placement_count(env.clone());
        env.storage()
            .instance()
            .set(&MockKey::Tick, &placement.target_tick);
        env.storage().instance().set(&MockKey::Placement, &placement);
        env.storage()
            .instance()
            .set(&MockKey::PlacementCount, &(count + 1));
        env.storage()
            .instance()
            .get(&MockKey::PlacementDelta)
            .unwrap_or_default()
    }

    pub fn swap(env: Env, _trader: Address, _params: TradeParams) -> BalanceDelta {
        let count = Self::swap_count(env.clone());
        env.storage().instance().set(&MockKey::SwapCount, &(count + 1));
        let staged: Option<StagedSwap> = env.storage().instance().get(&MockKey::NextSwap);
        match staged {
            Some(staged) => {
                env.storage().instance().remove(&MockKey::NextSwap);
                env.storage().instance().set(&MockKey::Tick, &staged.tick_after);
                staged.delta
            }
            None => BalanceDelta::default(),
        }
    }
}

/// Dook that counts every callback it receives
#[contract]
pub struct RecordingDook;

#[contractimpl]
impl RecordingDook {
    pub fn calls(env: Env, callback: HookCallback) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::Calls(callback))
            .unwrap_or(0)
    }

    pub fn on_initialization(env: Env, _pool: Address, _asset: Address, _numeraire: Address) {
        record(&env, HookCallback::OnInitialization);
    }

    pub fn on_swap(
        env: Env,
        _pool: Address,
        _trader: Address,
        _params: TradeParams,
        _delta: BalanceDelta,
    ) {
        record(&env, HookCallback::OnSwap);
    }

    pub fn on_graduation(env: Env, _pool: Address, _recipient: Address) {
        record(&env, HookCallback::OnGraduation);
    }
}

fn record(env: &Env, callback: HookCallback) {
    let key = MockKey::Calls(callback);
    let calls: u32 = env.storage().instance().get(&key).unwrap_or(0);
    env.storage().instance().set(&key, &(calls + 1));
}

/// Dook whose every callback panics
#[contract]
pub struct RevertingDook;

#[contractimpl]
impl RevertingDook {
    pub fn on_initialization(_env: Env, _pool: Address, _asset: Address, _numeraire: Address) {
        panic!("dook reverted");
    }

    pub fn on_swap(
        _env: Env,
        _pool: Address,
        _trader: Address,
        _params: TradeParams,
        _delta: BalanceDelta,
    ) {
        panic!("dook reverted");
    }

    pub fn on_graduation(_env: Env, _pool: Address, _recipient: Address) {
        panic!("dook reverted");
    }
}
