#![no_std]

#[cfg(test)]
extern crate std;

mod curves;
mod errors;
mod storage;

pub use curves::MAX_CURVE_POSITIONS;
pub use errors::CurveError;
pub use storage::CurveConfig;

use launch_types::{
    BalanceDelta, CurveSegment, Placement, PoolStatus, VenueClient, VenueOrientation,
};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol, Vec};
use storage::{
    get_config, get_parties, get_plan, get_status, is_initialized, set_config, set_parties,
    set_plan, set_status, Parties,
};

/// Static launch: the supply sits on fixed bands until the issuer migrates
#[contract]
pub struct Multicurve;

#[contractimpl]
impl Multicurve {
    /// Take the supply from the airlock and place every curve band once
    ///
    /// # Arguments
    /// * `curves` - Sorted by lower tick, in asset-price ticks; shares sum to WAD
    /// * `asset_is_token0` - Venue orientation of the asset
    pub fn initialize(
        env: Env,
        airlock: Address,
        venue: Address,
        asset: Address,
        numeraire: Address,
        tick_spacing: i32,
        curves: Vec<CurveSegment>,
        supply: i128,
        asset_is_token0: bool,
    ) -> Result<(), CurveError> {
        if is_initialized(&env) {
            return Err(CurveError::AlreadyInitialized);
        }
        airlock.require_auth();

        let plan = curves::plan_curves(&env, &curves, tick_spacing, supply)?;
        let config = CurveConfig {
            tick_spacing,
            curves,
            supply,
            asset_is_token0,
        };
        let parties = Parties {
            airlock: airlock.clone(),
            venue,
            asset: asset.clone(),
            numeraire,
        };
        set_config(&env, &config);
        set_parties(&env, &parties);
        set_plan(&env, &plan);
        set_status(&env, PoolStatus::Initialized);

        token::Client::new(&env, &asset).transfer(
            &airlock,
            &env.current_contract_address(),
            &supply,
        );
        place(&env, &parties, &config, &plan);

        env.events().publish(
            (Symbol::new(&env, "curves_placed"),),
            (plan.positions.len(), plan.target_tick, supply),
        );
        Ok(())
    }

    /// Pull every band back from the venue and hand the balances to `recipient`
    ///
    /// # Returns
    /// (asset, numeraire) - Amounts sent to `recipient`
    pub fn migrate(env: Env, recipient: Address) -> Result<(i128, i128), CurveError> {
        let config = get_config(&env)?;
        let parties = get_parties(&env)?;
        parties.airlock.require_auth();
        let status = get_status(&env);
        if status != PoolStatus::Initialized {
            log!(&env, "wrong pool status", PoolStatus::Initialized as u32, status as u32);
            return Err(CurveError::WrongPoolStatus);
        }
        set_status(&env, PoolStatus::Exited);

        let orientation = VenueOrientation::new(config.asset_is_token0);
        let venue = VenueClient::new(&env, &parties.venue);
        let market = orientation.from_venue_tick(venue.current_tick());
        let cleared = Placement {
            positions: Vec::new(&env),
            target_tick: market,
        };
        place(&env, &parties, &config, &cleared);

        let contract_address = env.current_contract_address();
        let asset_client = token::Client::new(&env, &parties.asset);
        let numeraire_client = token::Client::new(&env, &parties.numeraire);
        let asset = asset_client.balance(&contract_address);
        let numeraire = numeraire_client.balance(&contract_address);
        if asset > 0 {
            asset_client.transfer(&contract_address, &recipient, &asset);
        }
        if numeraire > 0 {
            numeraire_client.transfer(&contract_address, &recipient, &numeraire);
        }

        env.events().publish(
            (Symbol::new(&env, "migrated"), recipient),
            (asset, numeraire),
        );
        Ok((asset, numeraire))
    }

    // === View Functions ===

    pub fn config(env: Env) -> Result<CurveConfig, CurveError> {
        get_config(&env)
    }

    pub fn status(env: Env) -> PoolStatus {
        get_status(&env)
    }

    /// Bands as planned, in asset-price ticks
    pub fn positions(env: Env) -> Result<Placement, CurveError> {
        get_plan(&env)
    }
}

/// Hands `placement` to the venue and pays whatever it left owing
fn place(env: &Env, parties: &Parties, config: &CurveConfig, placement: &Placement) -> BalanceDelta {
    let orientation = VenueOrientation::new(config.asset_is_token0);
    let venue_placement = orientation.to_venue_placement(env, placement);
    let delta = VenueClient::new(env, &parties.venue).set_positions(&venue_placement);

    let contract_address = env.current_contract_address();
    if delta.asset > 0 {
        token::Client::new(env, &parties.asset).transfer(
            &contract_address,
            &parties.venue,
            &delta.asset,
        );
    }
    if delta.numeraire > 0 {
        token::Client::new(env, &parties.numeraire).transfer(
            &contract_address,
            &parties.venue,
            &delta.numeraire,
        );
    }
    delta
}
