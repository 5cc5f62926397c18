use sha2::{Digest, Sha256};

/// Domain tag mixed into every draw seed.
const DRAW_SEED_TAG: &[u8] = b"lottery-draw-v1";

/// A source of uniformly distributed 64-bit values.
///
/// The draw only ever asks for an index through [`RandomSource::pick_index`],
/// so any implementation of `next_u64` gets unbiased selection for free.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Pick an index uniformly in `[0, len)`. Returns `None` when `len == 0`.
    ///
    /// Uses rejection sampling: values in the top partial bucket of the u64
    /// range are discarded so that every index has exactly the same odds.
    fn pick_index(&mut self, len: u32) -> Option<u32> {
        if len == 0 {
            return None;
        }
        let n = u64::from(len);
        // 2^64 mod n
        let rem = (u64::MAX % n + 1) % n;
        let accept_max = u64::MAX - rem;
        loop {
            let x = self.next_u64();
            if x <= accept_max {
                return Some((x % n) as u32);
            }
        }
    }
}

/// Deterministic stream derived from a 32-byte seed.
///
/// Block `i` of the stream is `sha256(seed || i_u64_be)`; values are read
/// 8 bytes at a time, big-endian.
#[derive(Debug, Clone)]
pub struct BeaconRng {
    seed: [u8; 32],
    counter: u64,
    block: [u8; 32],
    pos: usize,
}

impl BeaconRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            seed,
            counter: 0,
            block: [0u8; 32],
            pos: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.block = hasher.finalize().into();
        self.counter += 1;
        self.pos = 0;
    }
}

impl RandomSource for BeaconRng {
    fn next_u64(&mut self) -> u64 {
        if self.pos + 8 > self.block.len() {
            self.refill();
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.block[self.pos..self.pos + 8]);
        self.pos += 8;
        u64::from_be_bytes(bytes)
    }
}

/// Derive the seed for one draw.
///
/// `seed = sha256( tag || beacon_randomness || lottery_round_u64_be || contract_addr )`
///
/// Binding the lottery round and contract address means the same beacon
/// yields unrelated draws across rounds and across lottery instances.
pub fn draw_seed(beacon_randomness: &[u8], lottery_round: u64, contract_addr: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DRAW_SEED_TAG);
    hasher.update(beacon_randomness);
    hasher.update(lottery_round.to_be_bytes());
    hasher.update(contract_addr.as_bytes());
    hasher.finalize().into()
}
