use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("incorrect bid amount: expected {expected}, received {received}")]
    IncorrectBidAmount {
        expected: Uint128,
        received: Uint128,
    },

    #[error("{address} is already registered in the current round")]
    AlreadyRegistered { address: String },

    #[error("player index {index} out of range (players: {len})")]
    IndexOutOfRange { index: u32, len: u32 },

    #[error("no participants registered in the current round")]
    NoParticipants,

    #[error("bid amount must be greater than zero")]
    InvalidBidAmount,

    #[error("denom must not be empty")]
    InvalidDenom,

    #[error("must send funds to deposit")]
    NoFundsSent,

    #[error("wrong denom: {denom}")]
    WrongDenom { denom: String },

    #[error("beacon not found for round {round}")]
    BeaconNotFound { round: u64 },

    #[error("invalid beacon for round {round}: {reason}")]
    InvalidBeacon { round: u64, reason: String },

    #[error("beacon round {round} already consumed (last used: {last})")]
    StaleBeaconRound { round: u64, last: u64 },

    #[error("beacon for round {round} is already published")]
    BeaconAlreadyPublished { round: u64 },

    #[error("a draw is already committed to beacon round {beacon_round}")]
    DrawAlreadyCommitted { beacon_round: u64 },

    #[error("draw committed to beacon round {beacon_round} is in progress")]
    DrawInProgress { beacon_round: u64 },

    #[error("no draw committed for the current round")]
    NoDrawCommitted,

    #[error("draw is committed to beacon round {committed}, got {requested}")]
    BeaconRoundMismatch { committed: u64, requested: u64 },

    #[error("lottery is full ({max} players)")]
    LotteryFull { max: u32 },
}
