use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::LotteryConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub bid_amount: Uint128,
    pub denom: String,
    pub randomness_oracle: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register the sender for the current round. Must attach exactly the bid.
    JoinLottery {},
    /// Add funds to the pool without registering.
    Deposit {},
    /// Freeze the current round and commit to an unpublished drand round (admin only).
    CommitDraw { target_beacon_round: u64 },
    /// Settle the committed draw with its beacon and pay out the pool (admin only).
    PickWinner { beacon_round: u64 },
    /// Change the bid required for subsequent joins (admin only).
    ModifyRequiredBid { new_bid: Uint128 },
    /// Update configuration (admin only).
    UpdateConfig { randomness_oracle: Option<String> },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(LotteryConfig)]
    Config {},

    /// Current pool balance in the lottery denom.
    #[returns(Uint128)]
    ContractBalance {},

    #[returns(Uint128)]
    BidAmount {},

    /// Player at a join position in the current round.
    #[returns(Addr)]
    PlayersList { index: u32 },

    /// Whether an address is registered in the current round.
    #[returns(bool)]
    Players { address: String },

    #[returns(u32)]
    PlayerCount {},

    #[returns(PlayersResponse)]
    AllPlayers {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    /// Winner of the most recent draw, if any.
    #[returns(Option<Addr>)]
    Winner {},

    #[returns(LotteryStateResponse)]
    LotteryState {},
}

#[cw_serde]
pub struct PlayerEntry {
    pub index: u32,
    pub address: Addr,
}

#[cw_serde]
pub struct PlayersResponse {
    pub players: Vec<PlayerEntry>,
}

#[cw_serde]
pub struct LotteryStateResponse {
    pub round: u64,
    pub player_count: u32,
    pub bid_amount: Uint128,
    pub pool_balance: Uint128,
    pub denom: String,
    pub winner: Option<Addr>,
    pub last_beacon_round: Option<u64>,
    /// Beacon round of the committed draw; joins are closed while set
    pub committed_beacon_round: Option<u64>,
}
