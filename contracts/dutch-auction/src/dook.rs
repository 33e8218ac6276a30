//! Tolerant dispatch to the optional dook.
//!
//! A dook only hears the callbacks it subscribed to. A failing dook is
//! reported and skipped; the host rolls back whatever it wrote, and the
//! auction's own writes are already in place before it is called.

use launch_types::{BalanceDelta, DookClient, DookConfig, HookCallback, TradeParams};
use soroban_sdk::{log, Address, Env, Symbol};

pub fn notify_initialization(
    env: &Env,
    dook: &Option<DookConfig>,
    asset: &Address,
    numeraire: &Address,
) {
    let Some(dook) = subscribed(dook, HookCallback::OnInitialization) else {
        return;
    };
    let client = DookClient::new(env, &dook.address);
    let pool = env.current_contract_address();
    let ok = client.try_on_initialization(&pool, asset, numeraire).is_ok();
    report(env, dook, HookCallback::OnInitialization, ok);
}

pub fn notify_swap(
    env: &Env,
    dook: &Option<DookConfig>,
    trader: &Address,
    params: &TradeParams,
    delta: &BalanceDelta,
) {
    let Some(dook) = subscribed(dook, HookCallback::OnSwap) else {
        return;
    };
    let client = DookClient::new(env, &dook.address);
    let pool = env.current_contract_address();
    let ok = client.try_on_swap(&pool, trader, params, delta).is_ok();
    report(env, dook, HookCallback::OnSwap, ok);
}

pub fn notify_graduation(env: &Env, dook: &Option<DookConfig>, recipient: &Address) {
    let Some(dook) = subscribed(dook, HookCallback::OnGraduation) else {
        return;
    };
    let client = DookClient::new(env, &dook.address);
    let pool = env.current_contract_address();
    let ok = client.try_on_graduation(&pool, recipient).is_ok();
    report(env, dook, HookCallback::OnGraduation, ok);
}

fn subscribed(dook: &Option<DookConfig>, callback: HookCallback) -> Option<&DookConfig> {
    dook.as_ref().filter(|dook| dook.wants(callback))
}

fn report(env: &Env, dook: &DookConfig, callback: HookCallback, ok: bool) {
    if ok {
        return;
    }
    log!(env, "dook callback failed", dook.address, callback);
    env.events().publish(
        (Symbol::new(env, "dook_failed"), dook.address.clone()),
        callback,
    );
}
