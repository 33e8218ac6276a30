#![no_std]

#[cfg(test)]
extern crate std;

mod config;
mod dook;
mod epoch;
mod errors;
mod invariants;
mod migration;
mod placement;
mod slugs;
mod storage;
#[cfg(test)]
mod test_support;

pub use errors::AuctionError;
pub use slugs::SlugSet;

use launch_types::{
    AuctionState, BalanceDelta, DookConfig, DutchAuctionConfig, ModuleState, Placement,
    PoolStatus, RegistryClient, TradeParams, VenueClient,
};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};
use storage::{
    get_config, get_dook, get_parties, get_slugs, get_state, get_status, is_initialized,
    set_config, set_dook, set_parties, set_state, set_status, Parties,
};

#[contract]
pub struct DutchAuction;

#[contractimpl]
impl DutchAuction {
    /// Initialize the auction and place the first slugs
    ///
    /// # Arguments
    /// * `airlock` - Deployer; supplies the asset and receives control at migration
    /// * `registry` - Launch registry consulted to whitelist the dook
    /// * `venue` - Concentrated liquidity venue holding the slugs
    /// * `dook` - Optional extension contract and its callbacks
    pub fn initialize(
        env: Env,
        airlock: Address,
        registry: Address,
        venue: Address,
        asset: Address,
        numeraire: Address,
        config: DutchAuctionConfig,
        dook: Option<DookConfig>,
    ) -> Result<(), AuctionError> {
        if is_initialized(&env) {
            return Err(AuctionError::AlreadyInitialized);
        }
        airlock.require_auth();
        config::validate_config(&env, &config)?;

        let now = env.ledger().timestamp();
        if now > config.starting_time {
            log!(&env, "auction already started", now, config.starting_time);
            return Err(AuctionError::InvalidTime);
        }

        if let Some(dook) = &dook {
            let state = RegistryClient::new(&env, &registry).module_state(&dook.address);
            if state != ModuleState::Dook {
                log!(&env, "dook not enabled", dook.address);
                return Err(AuctionError::DookNotEnabled);
            }
        }

        let parties = Parties {
            airlock: airlock.clone(),
            registry,
            venue,
            asset: asset.clone(),
            numeraire: numeraire.clone(),
        };
        let state = AuctionState::default();
        set_config(&env, &config);
        set_parties(&env, &parties);
        set_dook(&env, &dook);
        set_state(&env, &state);
        set_status(&env, PoolStatus::Initialized);

        let slugs = slugs::plan(&env, &config, &state, config.starting_tick, 0)?;

        token::Client::new(&env, &asset).transfer(
            &airlock,
            &env.current_contract_address(),
            &config.num_tokens_to_sell,
        );
        placement::apply(&env, &parties, &config, &slugs);

        env.events().publish(
            (Symbol::new(&env, "initialized"),),
            (asset.clone(), numeraire.clone(), config.num_tokens_to_sell),
        );
        dook::notify_initialization(&env, &dook, &asset, &numeraire);
        Ok(())
    }

    /// Trade against the auction's slugs
    ///
    /// The first trade of a new epoch rebalances the slugs before it executes.
    ///
    /// # Returns
    /// Balance change of the slugs; positive amounts were paid in by `trader`
    pub fn swap(
        env: Env,
        trader: Address,
        params: TradeParams,
    ) -> Result<BalanceDelta, AuctionError> {
        trader.require_auth();
        if params.amount_in <= 0 || params.min_amount_out < 0 {
            return Err(AuctionError::InvalidTradeAmount);
        }

        let config = get_config(&env)?;
        let parties = get_parties(&env)?;
        let mut status = get_status(&env);
        if status != PoolStatus::Initialized && status != PoolStatus::Locked {
            log!(&env, "wrong pool status", PoolStatus::Initialized as u32, status as u32);
            return Err(AuctionError::WrongPoolStatus);
        }

        let now = env.ledger().timestamp();
        if now < config.starting_time {
            log!(&env, "auction not started", now, config.starting_time);
            return Err(AuctionError::InvalidTime);
        }

        let mut state = get_state(&env);
        if status == PoolStatus::Initialized && now >= config.ending_time {
            if migration::reached_minimum_proceeds(&config, &state) {
                log!(&env, "auction ended", now, config.ending_time);
                return Err(AuctionError::InvalidTime);
            }
            status = lock_with_buyback(&env, &parties, &config, &state);
        } else if status == PoolStatus::Initialized {
            rebalance(&env, &parties, &config, &mut state, now)?;
        }

        if status == PoolStatus::Locked && params.buy_asset {
            return Err(AuctionError::BuyAfterInsufficientProceeds);
        }

        let delta = VenueClient::new(&env, &parties.venue).swap(&trader, &params);
        epoch::record_trade(&mut state, &delta)?;
        set_state(&env, &state);

        if status == PoolStatus::Initialized {
            let lower = get_slugs(&env)?.lower;
            let market = placement::market_tick(&env, &parties, &config);
            migration::check_floor(&env, &config, &state, &lower, market)?;

            if migration::reached_maximum_proceeds(&config, &state) {
                set_status(&env, PoolStatus::Settled);
                env.events().publish(
                    (Symbol::new(&env, "early_exit"),),
                    (state.total_tokens_sold, state.total_proceeds),
                );
            }
        }

        env.events().publish(
            (Symbol::new(&env, "trade"), trader.clone()),
            (params.buy_asset, delta.asset, delta.numeraire),
        );
        dook::notify_swap(&env, &get_dook(&env), &trader, &params, &delta);
        Ok(delta)
    }

    /// Hand the auction's balances over once it graduates
    ///
    /// # Returns
    /// (asset, numeraire) - Amounts sent to `recipient`
    pub fn migrate(env: Env, recipient: Address) -> Result<(i128, i128), AuctionError> {
        let config = get_config(&env)?;
        let parties = get_parties(&env)?;
        parties.airlock.require_auth();

        let state = get_state(&env);
        let now = env.ledger().timestamp();
        migration::can_migrate(&env, &config, &state, get_status(&env), now)?;
        set_status(&env, PoolStatus::Exited);

        let market = placement::market_tick(&env, &parties, &config);
        placement::apply(&env, &parties, &config, &SlugSet::empty(&env, market));

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
            (Symbol::new(&env, "migrated"), recipient.clone()),
            (asset, numeraire),
        );
        dook::notify_graduation(&env, &get_dook(&env), &recipient);
        Ok((asset, numeraire))
    }

    // === View Functions ===

    pub fn config(env: Env) -> Result<DutchAuctionConfig, AuctionError> {
        get_config(&env)
    }

    pub fn state(env: Env) -> AuctionState {
        get_state(&env)
    }

    pub fn status(env: Env) -> PoolStatus {
        get_status(&env)
    }

    /// Latest slugs, in asset-price ticks
    pub fn slugs(env: Env) -> Result<SlugSet, AuctionError> {
        get_slugs(&env)
    }

    /// Latest placement as handed to the venue
    pub fn placement(env: Env) -> Result<Placement, AuctionError> {
        let config = get_config(&env)?;
        let slugs = get_slugs(&env)?;
        let orientation = launch_types::VenueOrientation::new(config.asset_is_token0);
        Ok(orientation.to_venue_placement(&env, &slugs.to_placement(&env)))
    }

    pub fn current_epoch(env: Env) -> Result<u64, AuctionError> {
        let config = get_config(&env)?;
        Ok(epoch::current_epoch(&config, env.ledger().timestamp()))
    }
}

/// Rolls the accumulator into the current epoch and re-places the slugs,
/// at most once per epoch
fn rebalance(
    env: &Env,
    parties: &Parties,
    config: &DutchAuctionConfig,
    state: &mut AuctionState,
    now: u64,
) -> Result<(), AuctionError> {
    let market = placement::market_tick(env, parties, config);
    let previous = state.tick_accumulator;
    let Some(transition) = epoch::advance(env, config, state, now, market)? else {
        return Ok(());
    };
    debug_assert!(invariants::drift_bounded(
        previous,
        state.tick_accumulator,
        config.max_tick_delta_per_epoch,
        transition.epochs_passed,
    ));

    let anchor = slugs::anchor_tick(config, state.tick_accumulator, market, transition.net_sold);
    let slugs = slugs::plan(env, config, state, anchor, transition.epoch)?;
    debug_assert!(invariants::slugs_aligned(&slugs.positions(env), config.tick_spacing));
    debug_assert!(invariants::slugs_contiguous(&slugs.ask_side(env)));

    set_state(env, state);
    placement::apply(env, parties, config, &slugs);

    env.events().publish(
        (Symbol::new(env, "rebalance"), transition.epoch),
        (state.tick_accumulator, anchor, transition.net_sold),
    );
    Ok(())
}

/// Matured short of the minimum: list nothing and keep every proceed in
/// one buy-back slug
fn lock_with_buyback(
    env: &Env,
    parties: &Parties,
    config: &DutchAuctionConfig,
    state: &AuctionState,
) -> PoolStatus {
    set_status(env, PoolStatus::Locked);
    let market = placement::market_tick(env, parties, config);
    let slugs = migration::insufficient_proceeds_slugs(env, config, state, market);
    placement::apply(env, parties, config, &slugs);

    env.events().publish(
        (Symbol::new(env, "insufficient_proceeds"),),
        (state.total_tokens_sold, state.total_proceeds, config.minimum_proceeds),
    );
    PoolStatus::Locked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_config, E18, EPOCH, START};
    use launch_registry::{LaunchRegistry, LaunchRegistryClient};
    use launch_types::testutils::{
        MockVenue, MockVenueClient, RecordingDook, RecordingDookClient, RevertingDook,
    };
    use launch_types::{HookCallback, SlugPosition};
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::token::{StellarAssetClient, TokenClient};
    use soroban_sdk::{vec, Address, Env};

    struct Setup<'a> {
        env: Env,
        airlock: Address,
        registry: LaunchRegistryClient<'a>,
        venue: MockVenueClient<'a>,
        asset: Address,
        numeraire: Address,
        auction: DutchAuctionClient<'a>,
    }

    impl<'a> Setup<'a> {
        fn new() -> Self {
            let env = Env::default();
            env.mock_all_auths();
            env.ledger().set_timestamp(START - 100);

            let airlock = Address::generate(&env);
            let admin = Address::generate(&env);
            let asset = env
                .register_stellar_asset_contract_v2(admin.clone())
                .address();
            let numeraire = env
                .register_stellar_asset_contract_v2(admin.clone())
                .address();
            StellarAssetClient::new(&env, &asset).mint(&airlock, &(1_000_000 * E18));

            let registry = LaunchRegistryClient::new(&env, &env.register(LaunchRegistry, ()));
            registry.initialize(&admin);
            let venue = MockVenueClient::new(&env, &env.register(MockVenue, ()));
            let auction = DutchAuctionClient::new(&env, &env.register(DutchAuction, ()));

            Setup {
                env,
                airlock,
                registry,
                venue,
                asset,
                numeraire,
                auction,
            }
        }

        fn init(&self, config: &DutchAuctionConfig, dook: &Option<DookConfig>) {
            self.auction.initialize(
                &self.airlock,
                &self.registry.address,
                &self.venue.address,
                &self.asset,
                &self.numeraire,
                config,
                dook,
            );
        }

        fn started() -> Self {
            let setup = Self::new();
            setup.init(&sample_config(), &None);
            setup
        }

        fn whitelist(&self, dook: &Address) {
            self.registry
                .set_module_state(&vec![&self.env, dook.clone()], &vec![&self.env, ModuleState::Dook]);
        }

        fn at(&self, timestamp: u64) {
            self.env.ledger().set_timestamp(timestamp);
        }

        /// Stages the venue result, then trades through the auction
        fn trade(&self, buy_asset: bool, asset: i128, numeraire: i128, tick_after: i32) -> BalanceDelta {
            self.venue
                .stage_swap(&BalanceDelta { asset, numeraire }, &tick_after);
            self.auction.swap(&Address::generate(&self.env), &trade_params(buy_asset))
        }

        fn balance(&self, token: &Address, owner: &Address) -> i128 {
            TokenClient::new(&self.env, token).balance(owner)
        }
    }

    fn trade_params(buy_asset: bool) -> TradeParams {
        TradeParams {
            buy_asset,
            amount_in: E18,
            min_amount_out: 0,
        }
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize_places_first_slugs() {
        let setup = Setup::started();
        let config = sample_config();

        assert_eq!(setup.auction.status(), PoolStatus::Initialized);
        assert_eq!(setup.venue.placement_count(), 1);
        let placement = setup.venue.placement().unwrap();
        assert_eq!(placement.target_tick, config.starting_tick);
        // upper slug plus three price discovery slugs; the empty lower slug is skipped
        assert_eq!(placement.positions.len(), 4);
        assert_eq!(setup.auction.placement(), placement);
        assert_eq!(
            setup.balance(&setup.asset, &setup.auction.address),
            config.num_tokens_to_sell
        );
    }

    #[test]
    fn test_initialize_twice_fails() {
        let setup = Setup::started();
        let result = setup.auction.try_initialize(
            &setup.airlock,
            &setup.registry.address,
            &setup.venue.address,
            &setup.asset,
            &setup.numeraire,
            &sample_config(),
            &None,
        );
        assert_eq!(result, Err(Ok(AuctionError::AlreadyInitialized)));
    }

    #[test]
    fn test_initialize_rejects_invalid_config() {
        let setup = Setup::new();
        let mut config = sample_config();
        config.gamma = 0;
        let result = setup.auction.try_initialize(
            &setup.airlock,
            &setup.registry.address,
            &setup.venue.address,
            &setup.asset,
            &setup.numeraire,
            &config,
            &None,
        );
        assert_eq!(result, Err(Ok(AuctionError::InvalidGamma)));
        assert_eq!(setup.auction.status(), PoolStatus::Uninitialized);
    }

    #[test]
    fn test_initialize_after_start_fails() {
        let setup = Setup::new();
        setup.at(START + 1);
        let result = setup.auction.try_initialize(
            &setup.airlock,
            &setup.registry.address,
            &setup.venue.address,
            &setup.asset,
            &setup.numeraire,
            &sample_config(),
            &None,
        );
        assert_eq!(result, Err(Ok(AuctionError::InvalidTime)));
    }

    #[test]
    fn test_dook_must_be_whitelisted() {
        let setup = Setup::new();
        let dook = DookConfig {
            address: setup.env.register(RecordingDook, ()),
            callbacks: vec![&setup.env, HookCallback::OnSwap],
        };
        let result = setup.auction.try_initialize(
            &setup.airlock,
            &setup.registry.address,
            &setup.venue.address,
            &setup.asset,
            &setup.numeraire,
            &sample_config(),
            &Some(dook),
        );
        assert_eq!(result, Err(Ok(AuctionError::DookNotEnabled)));
    }

    #[test]
    fn test_initialize_pays_owed_placement() {
        let setup = Setup::new();
        let owed = 10_000 * E18;
        setup.venue.stage_placement_delta(&BalanceDelta {
            asset: owed,
            numeraire: 0,
        });
        setup.init(&sample_config(), &None);
        assert_eq!(setup.balance(&setup.asset, &setup.venue.address), owed);
    }

    #[test]
    fn test_asset_as_token1_negates_placement() {
        let setup = Setup::new();
        let mut config = sample_config();
        config.asset_is_token0 = false;
        setup.init(&config, &None);

        let placement = setup.venue.placement().unwrap();
        assert_eq!(placement.target_tick, -config.starting_tick);
        let upper = setup.auction.slugs().upper;
        assert_eq!(
            placement.positions.get(0).unwrap(),
            SlugPosition {
                tick_lower: -upper.tick_upper,
                tick_upper: -upper.tick_lower,
                liquidity: upper.liquidity,
                salt: upper.salt,
            }
        );
    }

    // === Swap Tests ===

    #[test]
    fn test_swap_before_start_fails() {
        let setup = Setup::started();
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::InvalidTime)));
    }

    #[test]
    fn test_swap_rejects_empty_trade() {
        let setup = Setup::started();
        setup.at(START);
        let params = TradeParams {
            buy_asset: true,
            amount_in: 0,
            min_amount_out: 0,
        };
        let result = setup.auction.try_swap(&Address::generate(&setup.env), &params);
        assert_eq!(result, Err(Ok(AuctionError::InvalidTradeAmount)));
    }

    #[test]
    fn test_swap_on_uninitialized_auction_fails() {
        let setup = Setup::new();
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::NotInitialized)));
    }

    #[test]
    fn test_first_epoch_trade_keeps_initial_slugs() {
        let setup = Setup::started();
        setup.at(START + 10);
        setup.trade(true, -10 * E18, 20 * E18, 6_060);

        assert_eq!(setup.venue.placement_count(), 1);
        let state = setup.auction.state();
        assert_eq!(state.total_tokens_sold, 10 * E18);
        assert_eq!(state.total_proceeds, 20 * E18);
        assert_eq!(state.last_epoch, 0);
    }

    #[test]
    fn test_rebalances_once_per_epoch() {
        let setup = Setup::started();
        setup.at(START + EPOCH + 1);
        setup.trade(true, -E18, 2 * E18, 6_000);
        assert_eq!(setup.venue.placement_count(), 2);
        assert_eq!(setup.auction.state().last_epoch, 1);

        setup.trade(true, -E18, 2 * E18, 6_000);
        assert_eq!(setup.venue.placement_count(), 2);
        assert_eq!(setup.auction.current_epoch(), 1);
    }

    #[test]
    fn test_idle_epochs_decay_price() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 2 * EPOCH + 5);
        setup.trade(true, 0, 0, 3_600);

        let state = setup.auction.state();
        assert_eq!(state.tick_accumulator, -2 * config.max_tick_delta_per_epoch);
        let slugs = setup.auction.slugs();
        assert_eq!(slugs.anchor_tick, 3_600);
        assert_eq!(setup.venue.placement().unwrap().target_tick, 3_600);
    }

    #[test]
    fn test_behind_schedule_epoch_drops_by_shortfall() {
        let setup = Setup::started();
        let config = sample_config();
        // half of the 10_000e18 the schedule expects by the end of epoch 0
        setup.at(START + 10);
        setup.trade(true, -5_000 * E18, 9_000 * E18, 6_060);

        setup.at(START + EPOCH + 1);
        setup.trade(true, 0, 0, 6_120);

        let state = setup.auction.state();
        assert_eq!(state.last_epoch, 1);
        assert_eq!(state.tick_accumulator, -config.max_tick_delta_per_epoch / 2);
        assert_eq!(state.total_tokens_sold_last_epoch, 5_000 * E18);

        let slugs = setup.auction.slugs();
        assert_eq!(slugs.anchor_tick, 6_060);
        assert_eq!((slugs.lower.tick_lower, slugs.lower.tick_upper), (5_400, 6_060));
        assert_eq!((slugs.upper.tick_lower, slugs.upper.tick_upper), (6_060, 6_180));
        assert!(slugs.upper.liquidity > 0);
        assert_eq!(setup.venue.placement_count(), 2);
    }

    #[test]
    fn test_sell_back_within_epoch_returns_sold_to_zero() {
        let setup = Setup::started();
        setup.at(START + 10);
        setup.trade(true, -5 * E18, 10 * E18, 6_060);
        setup.trade(false, 5 * E18, -10 * E18, 6_000);

        let state = setup.auction.state();
        assert_eq!(state.total_tokens_sold, 0);
        assert_eq!(state.total_proceeds, 0);
    }

    #[test]
    fn test_selling_more_than_bought_fails() {
        let setup = Setup::started();
        setup.at(START + 10);
        setup.venue.stage_swap(
            &BalanceDelta {
                asset: E18,
                numeraire: -E18,
            },
            &6_000,
        );
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(false));
        assert_eq!(result, Err(Ok(AuctionError::NegativeNetSold)));
    }

    #[test]
    fn test_swap_below_range_fails() {
        let setup = Setup::started();
        setup.at(START + 10);
        setup.venue.stage_swap(
            &BalanceDelta {
                asset: -E18,
                numeraire: 2 * E18,
            },
            &5_900,
        );
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::SwapBelowRange)));
        assert_eq!(setup.auction.state(), AuctionState::default());
    }

    #[test]
    fn test_maximum_proceeds_settles_early() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 10);
        setup.trade(true, -20_000 * E18, config.maximum_proceeds, 6_600);
        assert_eq!(setup.auction.status(), PoolStatus::Settled);

        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::WrongPoolStatus)));

        let recipient = Address::generate(&setup.env);
        setup.auction.migrate(&recipient);
        assert_eq!(setup.auction.status(), PoolStatus::Exited);
    }

    #[test]
    fn test_swap_after_successful_end_fails() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 10);
        setup.trade(true, -1_000 * E18, config.minimum_proceeds, 6_060);

        setup.at(config.ending_time);
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::InvalidTime)));
    }

    // === Insufficient Proceeds Tests ===

    #[test]
    fn test_insufficient_proceeds_lock_and_allow_only_sells() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 10);
        setup.trade(true, -10 * E18, 10 * E18, 6_000);

        setup.at(config.ending_time);
        setup.trade(false, E18, -E18, 0);
        assert_eq!(setup.auction.status(), PoolStatus::Locked);

        let placement = setup.venue.placement().unwrap();
        assert_eq!(placement.positions.len(), 1);
        assert_eq!(placement.target_tick, 0);
        assert_eq!(setup.auction.slugs().lower.tick_upper, 0);
        assert_eq!(setup.auction.state().total_tokens_sold, 9 * E18);

        setup.venue.stage_swap(
            &BalanceDelta {
                asset: -E18,
                numeraire: E18,
            },
            &0,
        );
        let result = setup
            .auction
            .try_swap(&Address::generate(&setup.env), &trade_params(true));
        assert_eq!(result, Err(Ok(AuctionError::BuyAfterInsufficientProceeds)));

        let result = setup.auction.try_migrate(&Address::generate(&setup.env));
        assert_eq!(result, Err(Ok(AuctionError::CannotMigrate)));
    }

    // === Migration Tests ===

    #[test]
    fn test_migrate_before_end_fails() {
        let setup = Setup::started();
        setup.at(START + 10);
        setup.trade(true, -1_000 * E18, sample_config().minimum_proceeds, 6_060);
        let result = setup.auction.try_migrate(&Address::generate(&setup.env));
        assert_eq!(result, Err(Ok(AuctionError::CannotMigrate)));
    }

    #[test]
    fn test_migrate_pays_out_balances() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 10);
        setup.trade(true, -1_000 * E18, config.minimum_proceeds, 6_060);
        // proceeds handed back by the venue when positions are cleared
        StellarAssetClient::new(&setup.env, &setup.numeraire)
            .mint(&setup.auction.address, &config.minimum_proceeds);

        setup.at(config.ending_time);
        let recipient = Address::generate(&setup.env);
        let (asset, numeraire) = setup.auction.migrate(&recipient);

        assert_eq!(asset, config.num_tokens_to_sell);
        assert_eq!(numeraire, config.minimum_proceeds);
        assert_eq!(setup.balance(&setup.asset, &recipient), asset);
        assert_eq!(setup.balance(&setup.numeraire, &recipient), numeraire);
        assert_eq!(setup.venue.placement().unwrap().positions.len(), 0);
        assert_eq!(setup.auction.status(), PoolStatus::Exited);

        let result = setup.auction.try_migrate(&recipient);
        assert_eq!(result, Err(Ok(AuctionError::WrongPoolStatus)));
    }

    #[test]
    #[should_panic]
    fn test_migrate_requires_airlock_auth() {
        let setup = Setup::started();
        let config = sample_config();
        setup.at(START + 10);
        setup.trade(true, -10_000 * E18, config.maximum_proceeds, 6_600);
        setup.env.set_auths(&[]);
        setup.auction.migrate(&Address::generate(&setup.env));
    }

    // === Dook Tests ===

    #[test]
    fn test_dook_hears_only_subscribed_callbacks() {
        let setup = Setup::new();
        let dook_address = setup.env.register(RecordingDook, ());
        setup.whitelist(&dook_address);
        let dook = DookConfig {
            address: dook_address.clone(),
            callbacks: vec![&setup.env, HookCallback::OnInitialization, HookCallback::OnSwap],
        };
        setup.init(&sample_config(), &Some(dook));

        setup.at(START + 10);
        setup.trade(true, -20_000 * E18, sample_config().maximum_proceeds, 6_600);
        setup.auction.migrate(&Address::generate(&setup.env));

        let recorder = RecordingDookClient::new(&setup.env, &dook_address);
        assert_eq!(recorder.calls(&HookCallback::OnInitialization), 1);
        assert_eq!(recorder.calls(&HookCallback::OnSwap), 1);
        assert_eq!(recorder.calls(&HookCallback::OnGraduation), 0);
    }

    #[test]
    fn test_reverting_dook_does_not_break_trades() {
        let setup = Setup::new();
        let dook_address = setup.env.register(RevertingDook, ());
        setup.whitelist(&dook_address);
        let dook = DookConfig {
            address: dook_address,
            callbacks: vec![
                &setup.env,
                HookCallback::OnInitialization,
                HookCallback::OnSwap,
                HookCallback::OnGraduation,
            ],
        };
        setup.init(&sample_config(), &Some(dook));

        setup.at(START + 10);
        setup.trade(true, -10 * E18, 20 * E18, 6_060);
        assert_eq!(setup.auction.state().total_tokens_sold, 10 * E18);
        assert_eq!(setup.auction.status(), PoolStatus::Initialized);
    }
}
