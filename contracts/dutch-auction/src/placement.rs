//! Everything the auction hands to the venue goes through here.

use launch_types::{BalanceDelta, DutchAuctionConfig, VenueClient, VenueOrientation};
use soroban_sdk::{token, Env};

use crate::slugs::SlugSet;
use crate::storage::{set_slugs, Parties};

/// Market tick in asset-price orientation
pub fn market_tick(env: &Env, parties: &Parties, config: &DutchAuctionConfig) -> i32 {
    let venue_tick = VenueClient::new(env, &parties.venue).current_tick();
    VenueOrientation::new(config.asset_is_token0).from_venue_tick(venue_tick)
}

/// Stores `slugs`, then replaces the venue's positions with them
pub fn apply(
    env: &Env,
    parties: &Parties,
    config: &DutchAuctionConfig,
    slugs: &SlugSet,
) -> BalanceDelta {
    set_slugs(env, slugs);
    let orientation = VenueOrientation::new(config.asset_is_token0);
    let placement = orientation.to_venue_placement(env, &slugs.to_placement(env));
    let delta = VenueClient::new(env, &parties.venue).set_positions(&placement);
    pay_owed(env, parties, &delta);
    delta
}

/// Pays the venue what a placement left owing; the venue settles the
/// negative side itself
pub fn pay_owed(env: &Env, parties: &Parties, delta: &BalanceDelta) {
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
}
