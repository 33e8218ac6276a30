#![no_std]

#[cfg(test)]
extern crate std;

mod bitmap;
mod config;
mod errors;
mod incentives;
mod settlement;
mod storage;
#[cfg(test)]
mod test_support;

pub use errors::CallAuctionError;

use bitmap::{Direction, TickBitmap};
use launch_math::{is_aligned, numeraire_at_tick, to_unsigned};
use launch_types::{
    Bid, BidClaim, BitmapSummary, CallAuctionConfig, CallAuctionTotals, PoolStatus,
    SettlementResult, MAX_TICK, MIN_TICK,
};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};
use storage::{
    get_bid, get_config, get_parties, get_settlement, get_status, get_tick_bids, get_totals,
    is_initialized, remove_bid, set_bid, set_config, set_parties, set_settlement, set_status,
    set_tick_bids, set_totals, Parties,
};

#[contract]
pub struct CallAuction;

#[contractimpl]
impl CallAuction {
    /// Initialize the auction and take custody of the supply
    ///
    /// # Arguments
    /// * `airlock` - Issuer; supplies `total_tokens` and receives the proceeds
    pub fn initialize(
        env: Env,
        airlock: Address,
        asset: Address,
        numeraire: Address,
        config: CallAuctionConfig,
    ) -> Result<(), CallAuctionError> {
        if is_initialized(&env) {
            return Err(CallAuctionError::AlreadyInitialized);
        }
        airlock.require_auth();
        config::validate_config(&env, &config)?;

        let now = env.ledger().timestamp();
        if now > config.starting_time {
            log!(&env, "auction already started", now, config.starting_time);
            return Err(CallAuctionError::InvalidTime);
        }

        set_config(&env, &config);
        set_parties(
            &env,
            &Parties {
                airlock: airlock.clone(),
                asset: asset.clone(),
                numeraire: numeraire.clone(),
            },
        );
        set_totals(
            &env,
            &CallAuctionTotals {
                last_update: config.starting_time,
                ..CallAuctionTotals::default()
            },
        );
        set_status(&env, PoolStatus::Initialized);

        token::Client::new(&env, &asset).transfer(
            &airlock,
            &env.current_contract_address(),
            &config.total_tokens,
        );

        env.events().publish(
            (Symbol::new(&env, "initialized"),),
            (asset, numeraire, config.total_tokens),
        );
        Ok(())
    }

    /// Bid for `liquidity` asset at `tick` or better, escrowing numeraire at
    /// the bid's own price
    ///
    /// # Returns
    /// Id of the new bid
    pub fn place_bid(
        env: Env,
        bidder: Address,
        tick: i32,
        liquidity: i128,
    ) -> Result<u32, CallAuctionError> {
        bidder.require_auth();
        let config = get_config(&env)?;
        require_status(&env, PoolStatus::Initialized)?;
        let now = env.ledger().timestamp();
        require_open(&env, &config, now)?;

        if !is_aligned(tick, config.tick_spacing) || !(MIN_TICK..=MAX_TICK).contains(&tick) {
            log!(&env, "invalid tick", tick, config.tick_spacing);
            return Err(CallAuctionError::InvalidTick);
        }
        if tick < config.min_acceptable_tick {
            log!(&env, "bid below minimum tick", tick, config.min_acceptable_tick);
            return Err(CallAuctionError::BidBelowMinimumTick);
        }
        if liquidity <= 0 || liquidity < config.min_liquidity {
            log!(&env, "bid too small", liquidity, config.min_liquidity);
            return Err(CallAuctionError::BidTooSmall);
        }

        let escrow = numeraire_at_tick(&env, to_unsigned(liquidity), tick, true)
            .and_then(|escrow| i128::try_from(escrow).ok())
            .ok_or(CallAuctionError::ArithmeticOverflow)?;
        let (_, allocation) = config::split_supply(&env, &config)?;
        let bitmap = TickBitmap::new(&env, config.tick_spacing);
        let mut totals = get_totals(&env);
        incentives::accrue(&mut totals, now)?;
        incentives::apply_liquidity_change(&env, bitmap, &mut totals, allocation, tick, liquidity, now)?;

        let id = totals.next_bid_id;
        let bid = Bid {
            bidder: bidder.clone(),
            tick,
            liquidity,
            escrow,
            seconds_in_range_snapshot: incentives::seconds_in_range(&env, tick, now),
        };
        set_bid(&env, id, &bid);
        set_tick_bids(&env, tick, get_tick_bids(&env, tick) + 1);
        totals.next_bid_id += 1;
        totals.open_bids += 1;
        set_totals(&env, &totals);

        let parties = get_parties(&env)?;
        token::Client::new(&env, &parties.numeraire).transfer(
            &bidder,
            &env.current_contract_address(),
            &escrow,
        );

        env.events().publish(
            (Symbol::new(&env, "bid_placed"), bidder),
            (id, tick, liquidity, escrow),
        );
        Ok(id)
    }

    /// Cancel a bid before the auction closes; its incentive weight is forfeited
    pub fn withdraw_bid(env: Env, id: u32) -> Result<(), CallAuctionError> {
        let bid = get_bid(&env, id)?;
        bid.bidder.require_auth();
        let config = get_config(&env)?;
        require_status(&env, PoolStatus::Initialized)?;
        let now = env.ledger().timestamp();
        require_open(&env, &config, now)?;

        let (_, allocation) = config::split_supply(&env, &config)?;
        let bitmap = TickBitmap::new(&env, config.tick_spacing);
        let mut totals = get_totals(&env);
        incentives::accrue(&mut totals, now)?;
        let weight = incentives::bid_weight(&env, &bid, now)?;
        totals.weight_accumulator = totals
            .weight_accumulator
            .checked_sub(weight)
            .ok_or(CallAuctionError::ArithmeticOverflow)?;
        incentives::apply_liquidity_change(
            &env,
            bitmap,
            &mut totals,
            allocation,
            bid.tick,
            -bid.liquidity,
            now,
        )?;

        remove_bid(&env, id);
        set_tick_bids(&env, bid.tick, get_tick_bids(&env, bid.tick).saturating_sub(1));
        totals.open_bids -= 1;
        set_totals(&env, &totals);

        let parties = get_parties(&env)?;
        token::Client::new(&env, &parties.numeraire).transfer(
            &env.current_contract_address(),
            &bid.bidder,
            &bid.escrow,
        );

        env.events().publish(
            (Symbol::new(&env, "bid_withdrawn"), bid.bidder),
            (id, weight),
        );
        Ok(())
    }

    /// Stop taking bids ahead of the scheduled end
    pub fn lock(env: Env) -> Result<(), CallAuctionError> {
        let config = get_config(&env)?;
        let parties = get_parties(&env)?;
        parties.airlock.require_auth();
        require_status(&env, PoolStatus::Initialized)?;
        let now = env.ledger().timestamp();
        require_open(&env, &config, now)?;

        let mut totals = get_totals(&env);
        incentives::accrue(&mut totals, now)?;
        totals.locked_at = Some(now);
        set_totals(&env, &totals);
        set_status(&env, PoolStatus::Locked);

        env.events().publish((Symbol::new(&env, "locked"),), now);
        Ok(())
    }

    /// Close the auction and fix the clearing tick; callable by anyone once
    /// the auction ended or was locked
    pub fn settle(env: Env) -> Result<SettlementResult, CallAuctionError> {
        let config = get_config(&env)?;
        let now = env.ledger().timestamp();
        let mut totals = get_totals(&env);
        let closed_at = match get_status(&env) {
            PoolStatus::Initialized if now >= config.ending_time() => config.ending_time(),
            PoolStatus::Initialized => {
                log!(&env, "auction still open", now, config.ending_time());
                return Err(CallAuctionError::InvalidTime);
            }
            PoolStatus::Locked => totals.locked_at.unwrap_or(now),
            status => {
                log!(&env, "wrong pool status", PoolStatus::Initialized as u32, status as u32);
                return Err(CallAuctionError::WrongPoolStatus);
            }
        };
        incentives::accrue(&mut totals, closed_at)?;

        let (pool, allocation) = config::split_supply(&env, &config)?;
        let bitmap = TickBitmap::new(&env, config.tick_spacing);
        let result = settlement::clear(
            &env,
            bitmap,
            allocation,
            pool,
            totals.weight_accumulator,
            closed_at,
        )?;
        set_settlement(&env, &result);
        set_totals(&env, &totals);
        set_status(&env, PoolStatus::Settled);

        env.events().publish(
            (Symbol::new(&env, "settled"),),
            (result.clearing_tick, result.tokens_sold, result.proceeds),
        );
        Ok(result)
    }

    /// Pay out a settled bid: filled asset plus incentive, and the unspent
    /// escrow
    pub fn claim(env: Env, id: u32) -> Result<BidClaim, CallAuctionError> {
        let bid = get_bid(&env, id)?;
        bid.bidder.require_auth();
        let status = get_status(&env);
        if status != PoolStatus::Settled && status != PoolStatus::Exited {
            log!(&env, "wrong pool status", PoolStatus::Settled as u32, status as u32);
            return Err(CallAuctionError::WrongPoolStatus);
        }
        let settlement = get_settlement(&env).ok_or(CallAuctionError::WrongPoolStatus)?;
        let claim = settlement::claim_for(&env, &settlement, &bid)?;

        remove_bid(&env, id);
        let mut totals = get_totals(&env);
        totals.open_bids -= 1;
        set_totals(&env, &totals);

        let parties = get_parties(&env)?;
        let contract_address = env.current_contract_address();
        let asset_out = claim.asset_filled + claim.incentive;
        if asset_out > 0 {
            token::Client::new(&env, &parties.asset).transfer(
                &contract_address,
                &bid.bidder,
                &asset_out,
            );
        }
        if claim.numeraire_refund > 0 {
            token::Client::new(&env, &parties.numeraire).transfer(
                &contract_address,
                &bid.bidder,
                &claim.numeraire_refund,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "claimed"), bid.bidder),
            (id, claim.asset_filled, claim.incentive, claim.numeraire_paid),
        );
        Ok(claim)
    }

    /// Pay the issuer the proceeds and the unsold allocation
    ///
    /// # Returns
    /// (asset, numeraire) - Amounts sent to `recipient`
    pub fn migrate(env: Env, recipient: Address) -> Result<(i128, i128), CallAuctionError> {
        let config = get_config(&env)?;
        let parties = get_parties(&env)?;
        parties.airlock.require_auth();
        require_status(&env, PoolStatus::Settled)?;
        let settlement = get_settlement(&env).ok_or(CallAuctionError::WrongPoolStatus)?;
        set_status(&env, PoolStatus::Exited);

        let (_, allocation) = config::split_supply(&env, &config)?;
        let unsold = allocation - settlement.tokens_sold;
        let contract_address = env.current_contract_address();
        if unsold > 0 {
            token::Client::new(&env, &parties.asset).transfer(&contract_address, &recipient, &unsold);
        }
        if settlement.proceeds > 0 {
            token::Client::new(&env, &parties.numeraire).transfer(
                &contract_address,
                &recipient,
                &settlement.proceeds,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "migrated"), recipient),
            (unsold, settlement.proceeds),
        );
        Ok((unsold, settlement.proceeds))
    }

    /// Sweep rounding dust once every bid has been claimed
    ///
    /// # Returns
    /// (asset, numeraire) - Amounts sent to `recipient`
    pub fn recover_dust(env: Env, recipient: Address) -> Result<(i128, i128), CallAuctionError> {
        let parties = get_parties(&env)?;
        parties.airlock.require_auth();
        require_status(&env, PoolStatus::Exited)?;
        let totals = get_totals(&env);
        if totals.open_bids > 0 {
            log!(&env, "bids outstanding", totals.open_bids);
            return Err(CallAuctionError::BidsOutstanding);
        }

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
            (Symbol::new(&env, "dust_recovered"), recipient),
            (asset, numeraire),
        );
        Ok((asset, numeraire))
    }

    // === View Functions ===

    pub fn config(env: Env) -> Result<CallAuctionConfig, CallAuctionError> {
        get_config(&env)
    }

    pub fn status(env: Env) -> PoolStatus {
        get_status(&env)
    }

    pub fn bid(env: Env, id: u32) -> Result<Bid, CallAuctionError> {
        get_bid(&env, id)
    }

    pub fn tick_liquidity(env: Env, tick: i32) -> i128 {
        storage::get_tick_liquidity(&env, tick)
    }

    pub fn bitmap_summary(env: Env) -> BitmapSummary {
        storage::get_summary(&env)
    }

    /// Nearest tick holding bids strictly above (`up`) or below `from`
    pub fn next_active_tick(env: Env, from: i32, up: bool) -> Result<Option<i32>, CallAuctionError> {
        let config = get_config(&env)?;
        let direction = if up { Direction::Up } else { Direction::Down };
        Ok(TickBitmap::new(&env, config.tick_spacing).next_active_tick(from, direction))
    }

    /// Running clearing-tick estimate; ticks at or above it are in range
    pub fn clearing_estimate(env: Env) -> Option<i32> {
        get_totals(&env).in_range_boundary
    }

    pub fn settlement(env: Env) -> Option<SettlementResult> {
        get_settlement(&env)
    }

    /// Incentive a bid has earned so far, or its final incentive once settled
    pub fn incentive_of(env: Env, id: u32) -> Result<i128, CallAuctionError> {
        let bid = get_bid(&env, id)?;
        if let Some(settlement) = get_settlement(&env) {
            return Ok(settlement::claim_for(&env, &settlement, &bid)?.incentive);
        }

        let config = get_config(&env)?;
        let (pool, _) = config::split_supply(&env, &config)?;
        let mut totals = get_totals(&env);
        let now = totals
            .locked_at
            .unwrap_or_else(|| env.ledger().timestamp().min(config.ending_time()));
        incentives::accrue(&mut totals, now)?;
        let weight = incentives::bid_weight(&env, &bid, now)?;
        incentives::incentive_share(&env, pool, weight, totals.weight_accumulator)
    }
}

fn require_status(env: &Env, required: PoolStatus) -> Result<(), CallAuctionError> {
    let status = get_status(env);
    if status != required {
        log!(env, "wrong pool status", required as u32, status as u32);
        return Err(CallAuctionError::WrongPoolStatus);
    }
    Ok(())
}

/// Bids move only while the auction runs
fn require_open(env: &Env, config: &CallAuctionConfig, now: u64) -> Result<(), CallAuctionError> {
    if now < config.starting_time || now >= config.ending_time() {
        log!(env, "auction not open", now, config.starting_time, config.ending_time());
        return Err(CallAuctionError::InvalidTime);
    }
    Ok(())
}
