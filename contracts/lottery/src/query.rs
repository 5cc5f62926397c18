use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{LotteryStateResponse, PlayerEntry, PlayersResponse};
use crate::state::{
    BID_AMOUNT, CONFIG, LAST_BEACON_ROUND, PENDING_DRAW, PLAYERS, PLAYERS_LIST, PLAYER_COUNT,
    ROUND, WINNER,
};

pub const DEFAULT_LIMIT: u32 = 30;
pub const MAX_LIMIT: u32 = 100;

/// Contract's balance in `denom`. This is the pool: bids plus direct deposits.
pub fn pool_balance(deps: Deps, env: &Env, denom: &str) -> StdResult<Uint128> {
    let balance = deps.querier.query_balance(&env.contract.address, denom)?;
    Ok(balance.amount)
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_contract_balance(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&pool_balance(deps, &env, &config.denom)?)
}

pub fn query_bid_amount(deps: Deps) -> StdResult<Binary> {
    let bid = BID_AMOUNT.load(deps.storage)?;
    to_json_binary(&bid)
}

pub fn query_players_list(deps: Deps, index: u32) -> Result<Binary, ContractError> {
    let len = PLAYER_COUNT.load(deps.storage)?;
    let player = PLAYERS_LIST
        .may_load(deps.storage, index)?
        .ok_or(ContractError::IndexOutOfRange { index, len })?;
    Ok(to_json_binary(&player)?)
}

pub fn query_players(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    to_json_binary(&PLAYERS.has(deps.storage, &addr))
}

pub fn query_player_count(deps: Deps) -> StdResult<Binary> {
    let count = PLAYER_COUNT.load(deps.storage)?;
    to_json_binary(&count)
}

pub fn query_all_players(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let players = PLAYERS_LIST
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|r| r.map(|(index, address)| PlayerEntry { index, address }))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&PlayersResponse { players })
}

pub fn query_winner(deps: Deps) -> StdResult<Binary> {
    let winner = WINNER.may_load(deps.storage)?;
    to_json_binary(&winner)
}

pub fn query_lottery_state(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let pool = pool_balance(deps, &env, &config.denom)?;

    to_json_binary(&LotteryStateResponse {
        round: ROUND.load(deps.storage)?,
        player_count: PLAYER_COUNT.load(deps.storage)?,
        bid_amount: BID_AMOUNT.load(deps.storage)?,
        pool_balance: pool,
        denom: config.denom,
        winner: WINNER.may_load(deps.storage)?,
        last_beacon_round: LAST_BEACON_ROUND.may_load(deps.storage)?,
        committed_beacon_round: PENDING_DRAW
            .may_load(deps.storage)?
            .map(|pending| pending.beacon_round),
    })
}
