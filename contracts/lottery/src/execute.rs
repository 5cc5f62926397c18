use cosmwasm_std::{
    coins, Addr, BankMsg, Coin, Deps, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};
use lottery_common::{draw_seed, BeaconResponse, BeaconRng, OracleQueryMsg, RandomSource};

use crate::error::ContractError;
use crate::query::pool_balance;
use crate::state::{
    PendingDraw, BID_AMOUNT, CONFIG, LAST_BEACON_ROUND, PENDING_DRAW, PLAYERS, PLAYERS_LIST,
    PLAYER_COUNT, ROUND, WINNER,
};

/// Registry size cap. Settling clears one entry per player in a single transaction.
pub const MAX_PLAYERS: u32 = 1_000;

/// Result of a settled draw, before it is turned into a response.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    pub winner: Addr,
    pub winner_index: u32,
    pub player_count: u32,
    /// Pool balance at draw time, paid out in full
    pub prize: Uint128,
    /// Round that was just closed
    pub round: u64,
    pub payout: Option<BankMsg>,
}

/// Sum of `funds` in `denom`.
fn amount_in_denom(funds: &[Coin], denom: &str) -> Uint128 {
    funds
        .iter()
        .filter(|c| c.denom == denom)
        .fold(Uint128::zero(), |total, c| total + c.amount)
}

/// Join the current round. The attached funds must be exactly the bid.
pub fn join_lottery(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let bid_amount = BID_AMOUNT.load(deps.storage)?;

    // Entries are frozen once a draw is committed
    if let Some(pending) = PENDING_DRAW.may_load(deps.storage)? {
        return Err(ContractError::DrawInProgress {
            beacon_round: pending.beacon_round,
        });
    }

    if let Some(coin) = info.funds.iter().find(|c| c.denom != config.denom) {
        return Err(ContractError::WrongDenom {
            denom: coin.denom.clone(),
        });
    }
    let received = amount_in_denom(&info.funds, &config.denom);
    if received != bid_amount {
        return Err(ContractError::IncorrectBidAmount {
            expected: bid_amount,
            received,
        });
    }

    if PLAYERS.has(deps.storage, &info.sender) {
        return Err(ContractError::AlreadyRegistered {
            address: info.sender.to_string(),
        });
    }

    let position = PLAYER_COUNT.load(deps.storage)?;
    if position >= MAX_PLAYERS {
        return Err(ContractError::LotteryFull { max: MAX_PLAYERS });
    }

    PLAYERS_LIST.save(deps.storage, position, &info.sender)?;
    PLAYERS.save(deps.storage, &info.sender, &())?;
    PLAYER_COUNT.save(deps.storage, &(position + 1))?;

    let round = ROUND.load(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "join_lottery")
        .add_attribute("player", info.sender.to_string())
        .add_event(
            Event::new("lottery_player_joined")
                .add_attribute("player", info.sender.to_string())
                .add_attribute("position", position.to_string())
                .add_attribute("round", round.to_string())
                .add_attribute("bid_amount", bid_amount.to_string()),
        ))
}

/// Add funds to the pool without taking part in the round.
pub fn deposit(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if let Some(coin) = info.funds.iter().find(|c| c.denom != config.denom) {
        return Err(ContractError::WrongDenom {
            denom: coin.denom.clone(),
        });
    }
    let amount = amount_in_denom(&info.funds, &config.denom);
    if amount.is_zero() {
        return Err(ContractError::NoFundsSent);
    }

    // Funds are credited before execution, so this already includes `amount`.
    let pool = pool_balance(deps.as_ref(), &env, &config.denom)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("lottery_deposit")
                .add_attribute("sender", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("denom", config.denom)
                .add_attribute("pool_balance", pool.to_string()),
        ))
}

/// Commit the current round to a future drand beacon. Admin only.
///
/// The target beacon must not be published yet, so its randomness is unknown
/// to everyone when the player set is frozen. Joins are refused until the
/// draw settles, and only this beacon round can settle it.
pub fn commit_draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    target_beacon_round: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can commit draws".to_string(),
        });
    }

    if let Some(pending) = PENDING_DRAW.may_load(deps.storage)? {
        return Err(ContractError::DrawAlreadyCommitted {
            beacon_round: pending.beacon_round,
        });
    }

    let player_count = PLAYER_COUNT.load(deps.storage)?;
    if player_count == 0 {
        return Err(ContractError::NoParticipants);
    }

    if let Some(last) = LAST_BEACON_ROUND.may_load(deps.storage)? {
        if target_beacon_round <= last {
            return Err(ContractError::StaleBeaconRound {
                round: target_beacon_round,
                last,
            });
        }
    }

    let published: Option<BeaconResponse> = deps.querier.query_wasm_smart(
        config.randomness_oracle.to_string(),
        &OracleQueryMsg::Beacon {
            round: target_beacon_round,
        },
    )?;
    if published.is_some() {
        return Err(ContractError::BeaconAlreadyPublished {
            round: target_beacon_round,
        });
    }

    let round = ROUND.load(deps.storage)?;
    PENDING_DRAW.save(
        deps.storage,
        &PendingDraw {
            beacon_round: target_beacon_round,
            player_count,
            committed_at: env.block.time,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "commit_draw")
        .add_attribute("beacon_round", target_beacon_round.to_string())
        .add_event(
            Event::new("lottery_draw_committed")
                .add_attribute("round", round.to_string())
                .add_attribute("beacon_round", target_beacon_round.to_string())
                .add_attribute("player_count", player_count.to_string()),
        ))
}

/// Settle the committed draw. Admin only.
///
/// 1. `beacon_round` must be the committed one
/// 2. Query the oracle for the beacon's randomness
/// 3. seed = sha256(tag || randomness || lottery_round || contract_addr)
/// 4. Settle the draw with a `BeaconRng` over that seed
pub fn pick_winner(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beacon_round: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can pick the winner".to_string(),
        });
    }

    if PLAYER_COUNT.load(deps.storage)? == 0 {
        return Err(ContractError::NoParticipants);
    }

    let pending = PENDING_DRAW
        .may_load(deps.storage)?
        .ok_or(ContractError::NoDrawCommitted)?;
    if beacon_round != pending.beacon_round {
        return Err(ContractError::BeaconRoundMismatch {
            committed: pending.beacon_round,
            requested: beacon_round,
        });
    }

    let beacon = fetch_beacon(deps.as_ref(), &config.randomness_oracle, beacon_round)?;

    let round = ROUND.load(deps.storage)?;
    let seed = draw_seed(&beacon.randomness, round, env.contract.address.as_str());
    let mut rng = BeaconRng::from_seed(seed);

    let outcome = settle_draw(deps.branch(), &env, &mut rng)?;
    LAST_BEACON_ROUND.save(deps.storage, &beacon_round)?;
    PENDING_DRAW.remove(deps.storage);

    let mut response = Response::new();
    if let Some(payout) = outcome.payout {
        response = response.add_message(payout);
    }

    Ok(response
        .add_attribute("action", "pick_winner")
        .add_attribute("winner", outcome.winner.to_string())
        .add_attribute("prize", outcome.prize.to_string())
        .add_event(
            Event::new("lottery_winner_picked")
                .add_attribute("winner", outcome.winner.to_string())
                .add_attribute("prize", outcome.prize.to_string())
                .add_attribute("denom", config.denom)
                .add_attribute("round", outcome.round.to_string())
                .add_attribute("winner_index", outcome.winner_index.to_string())
                .add_attribute("player_count", outcome.player_count.to_string())
                .add_attribute("beacon_round", beacon_round.to_string())
                .add_attribute("seed", hex::encode(seed)),
        ))
}

/// Select the winner with `rng`, reset the registry and build the payout.
///
/// The prize is the whole pool balance read before any state changes. The
/// registry (positions and markers) is cleared, the winner recorded and the
/// round advanced. The payout message rides in the same transaction, so a
/// failed transfer reverts all of this.
pub fn settle_draw(
    deps: DepsMut,
    env: &Env,
    rng: &mut impl RandomSource,
) -> Result<DrawOutcome, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let player_count = PLAYER_COUNT.load(deps.storage)?;

    let winner_index = rng
        .pick_index(player_count)
        .ok_or(ContractError::NoParticipants)?;
    let winner = PLAYERS_LIST.load(deps.storage, winner_index)?;
    let prize = pool_balance(deps.as_ref(), env, &config.denom)?;

    for index in 0..player_count {
        if let Some(player) = PLAYERS_LIST.may_load(deps.storage, index)? {
            PLAYERS.remove(deps.storage, &player);
        }
        PLAYERS_LIST.remove(deps.storage, index);
    }
    PLAYER_COUNT.save(deps.storage, &0)?;
    WINNER.save(deps.storage, &winner)?;

    let round = ROUND.load(deps.storage)?;
    ROUND.save(deps.storage, &(round + 1))?;

    let payout = if prize.is_zero() {
        None
    } else {
        Some(BankMsg::Send {
            to_address: winner.to_string(),
            amount: coins(prize.u128(), config.denom),
        })
    };

    Ok(DrawOutcome {
        winner,
        winner_index,
        player_count,
        prize,
        round,
        payout,
    })
}

/// Load a verified 32-byte beacon from the oracle.
fn fetch_beacon(deps: Deps, oracle: &Addr, round: u64) -> Result<BeaconResponse, ContractError> {
    let beacon: Option<BeaconResponse> = deps
        .querier
        .query_wasm_smart(oracle.to_string(), &OracleQueryMsg::Beacon { round })?;
    let beacon = beacon.ok_or(ContractError::BeaconNotFound { round })?;

    if beacon.round != round {
        return Err(ContractError::InvalidBeacon {
            round,
            reason: format!("oracle answered for round {}", beacon.round),
        });
    }
    if !beacon.verified {
        return Err(ContractError::InvalidBeacon {
            round,
            reason: "beacon is not verified".to_string(),
        });
    }
    if beacon.randomness.len() != 32 {
        return Err(ContractError::InvalidBeacon {
            round,
            reason: format!("randomness is {} bytes, expected 32", beacon.randomness.len()),
        });
    }

    Ok(beacon)
}

/// Change the bid for subsequent joins. Admin only.
/// Players already registered keep their place; the bid is never re-checked.
pub fn modify_required_bid(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_bid: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can modify the required bid".to_string(),
        });
    }

    if new_bid.is_zero() {
        return Err(ContractError::InvalidBidAmount);
    }

    let old_bid = BID_AMOUNT.load(deps.storage)?;
    BID_AMOUNT.save(deps.storage, &new_bid)?;
    let player_count = PLAYER_COUNT.load(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "modify_required_bid")
        .add_attribute("new_bid", new_bid.to_string())
        .add_event(
            Event::new("lottery_bid_modified")
                .add_attribute("old_bid", old_bid.to_string())
                .add_attribute("new_bid", new_bid.to_string())
                .add_attribute("player_count", player_count.to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    randomness_oracle: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(oracle) = randomness_oracle {
        // The committed beacon must be read from the oracle it was committed against
        if let Some(pending) = PENDING_DRAW.may_load(deps.storage)? {
            return Err(ContractError::DrawInProgress {
                beacon_round: pending.beacon_round,
            });
        }
        config.randomness_oracle = deps.api.addr_validate(&oracle)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("randomness_oracle", config.randomness_oracle.to_string()))
}
