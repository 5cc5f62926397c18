use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{LotteryConfig, BID_AMOUNT, CONFIG, PLAYER_COUNT, ROUND};

const CONTRACT_NAME: &str = "crates.io:lottery-contract";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // A zero bid would make joining free.
    if msg.bid_amount.is_zero() {
        return Err(ContractError::InvalidBidAmount);
    }
    if msg.denom.trim().is_empty() {
        return Err(ContractError::InvalidDenom);
    }

    let config = LotteryConfig {
        admin: info.sender.clone(),
        denom: msg.denom,
        randomness_oracle: deps.api.addr_validate(&msg.randomness_oracle)?,
    };
    CONFIG.save(deps.storage, &config)?;
    BID_AMOUNT.save(deps.storage, &msg.bid_amount)?;
    PLAYER_COUNT.save(deps.storage, &0u32)?;
    ROUND.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "lottery")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("bid_amount", msg.bid_amount.to_string())
        .add_attribute("denom", config.denom))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::JoinLottery {} => execute::join_lottery(deps, env, info),
        ExecuteMsg::Deposit {} => execute::deposit(deps, env, info),
        ExecuteMsg::CommitDraw {
            target_beacon_round,
        } => execute::commit_draw(deps, env, info, target_beacon_round),
        ExecuteMsg::PickWinner { beacon_round } => {
            execute::pick_winner(deps, env, info, beacon_round)
        }
        ExecuteMsg::ModifyRequiredBid { new_bid } => {
            execute::modify_required_bid(deps, env, info, new_bid)
        }
        ExecuteMsg::UpdateConfig { randomness_oracle } => {
            execute::update_config(deps, env, info, randomness_oracle)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => Ok(query::query_config(deps)?),
        QueryMsg::ContractBalance {} => Ok(query::query_contract_balance(deps, env)?),
        QueryMsg::BidAmount {} => Ok(query::query_bid_amount(deps)?),
        QueryMsg::PlayersList { index } => query::query_players_list(deps, index),
        QueryMsg::Players { address } => Ok(query::query_players(deps, address)?),
        QueryMsg::PlayerCount {} => Ok(query::query_player_count(deps)?),
        QueryMsg::AllPlayers { start_after, limit } => {
            Ok(query::query_all_players(deps, start_after, limit)?)
        }
        QueryMsg::Winner {} => Ok(query::query_winner(deps)?),
        QueryMsg::LotteryState {} => Ok(query::query_lottery_state(deps, env)?),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
