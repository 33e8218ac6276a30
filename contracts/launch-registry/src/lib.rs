#![no_std]

//! Module registry injected into the launch contracts.
//!
//! Holds the role of every whitelisted address. Auctions receive the
//! registry address at initialization and only read from it.

use launch_types::ModuleState;
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, Symbol, Vec};

#[contract]
pub struct LaunchRegistry;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ArrayLengthsMismatch = 3,
}

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    /// address -> ModuleState, absent means NotWhitelisted
    Module(Address),
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl LaunchRegistry {
    pub fn initialize(env: Env, admin: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(RegistryError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Assign roles in bulk; `NotWhitelisted` removes an entry
    pub fn set_module_state(
        env: Env,
        modules: Vec<Address>,
        states: Vec<ModuleState>,
    ) -> Result<(), RegistryError> {
        let admin = read_admin(&env)?;
        admin.require_auth();

        if modules.len() != states.len() {
            return Err(RegistryError::ArrayLengthsMismatch);
        }

        for (module, state) in modules.iter().zip(states.iter()) {
            let key = DataKey::Module(module.clone());
            if state == ModuleState::NotWhitelisted {
                env.storage().persistent().remove(&key);
            } else {
                env.storage().persistent().set(&key, &state);
                extend_persistent_ttl(&env, &key);
            }
            env.events()
                .publish((Symbol::new(&env, "module_state"), module), state);
        }

        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn module_state(env: Env, module: Address) -> ModuleState {
        let key = DataKey::Module(module);
        match env.storage().persistent().get(&key) {
            Some(state) => {
                extend_persistent_ttl(&env, &key);
                state
            }
            None => ModuleState::NotWhitelisted,
        }
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), RegistryError> {
        let admin = read_admin(&env)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &new_admin);
        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, RegistryError> {
        read_admin(&env)
    }
}

fn read_admin(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(RegistryError::NotInitialized)
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
