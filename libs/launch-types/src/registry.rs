use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Role of an address in the launch registry
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ModuleState {
    NotWhitelisted = 0,
    TokenFactory = 1,
    GovernanceFactory = 2,
    PoolInitializer = 3,
    LiquidityMigrator = 4,
    Dook = 5,
}

/// Read side of the registry, as seen by the auctions
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn module_state(env: Env, module: Address) -> ModuleState;
}
