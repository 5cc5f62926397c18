use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<LotteryConfig> = Item::new("config");
/// Amount every player must attach to `JoinLottery`.
pub const BID_AMOUNT: Item<Uint128> = Item::new("bid_amount");

/// Ordered registry of the current round: join position -> player.
pub const PLAYERS_LIST: Map<u32, Addr> = Map::new("players_list");
/// Presence markers for the current round, used to reject duplicate joins.
pub const PLAYERS: Map<&Addr, ()> = Map::new("players");
pub const PLAYER_COUNT: Item<u32> = Item::new("player_count");

/// Winner of the most recent draw. Survives round resets.
pub const WINNER: Item<Addr> = Item::new("winner");
/// Current round number, starts at 1.
pub const ROUND: Item<u64> = Item::new("round");
/// Beacon round that seeded the last draw.
pub const LAST_BEACON_ROUND: Item<u64> = Item::new("last_beacon_round");
/// Draw committed for the current round, cleared when it settles.
pub const PENDING_DRAW: Item<PendingDraw> = Item::new("pending_draw");

#[cw_serde]
pub struct LotteryConfig {
    pub admin: Addr,
    /// Native denom of bids, deposits and the prize
    pub denom: String,
    /// drand beacon oracle queried for draw randomness
    pub randomness_oracle: Addr,
}

#[cw_serde]
pub struct PendingDraw {
    /// drand round whose beacon will seed the draw
    pub beacon_round: u64,
    pub player_count: u32,
    pub committed_at: Timestamp,
}
