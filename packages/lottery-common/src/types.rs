use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};

/// Query message understood by the drand beacon oracle contract.
#[cw_serde]
pub enum OracleQueryMsg {
    Beacon { round: u64 },
}

/// A stored beacon as returned by the oracle's `Beacon` query
/// (the oracle answers with `Option<BeaconResponse>`).
#[cw_serde]
pub struct BeaconResponse {
    pub round: u64,
    /// sha256(signature), 32 bytes
    pub randomness: Vec<u8>,
    /// BLS signature on G1, 48 bytes
    pub signature: Vec<u8>,
    pub verified: bool,
    pub submitted_at: Timestamp,
    pub submitted_by: Addr,
}
