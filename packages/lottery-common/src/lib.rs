pub mod randomness;
pub mod types;

pub use randomness::{draw_seed, BeaconRng, RandomSource};
pub use types::{BeaconResponse, OracleQueryMsg};
