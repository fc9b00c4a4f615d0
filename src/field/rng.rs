//! Seeded Park–Miller generator for the reproducible initial layout
//!
//! Minimal-standard LCG: `s = s * 16807 mod (2^31 - 1)`. Exposed through
//! `RngCore` so the same sampling code runs on it and on the runtime
//! `Pcg32`.

use rand::RngCore;
use rand::rand_core::impls;

/// Modulus 2^31 - 1
const MODULUS: u64 = 2_147_483_647;
/// Multiplier (minimal standard)
const MULTIPLIER: u64 = 16_807;

/// Linear-congruential generator with a fixed seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    pub fn new(seed: u32) -> Self {
        // Zero (or a multiple of the modulus) is a fixed point
        let state = seed as u64 % MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance and return the raw state in [1, 2^31 - 2]
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as u32
    }

    /// Next value in (0, 1)
    pub fn next_unit(&mut self) -> f64 {
        self.next_raw() as f64 / MODULUS as f64
    }
}

impl RngCore for ParkMiller {
    fn next_u32(&mut self) -> u32 {
        // Stretch [1, M-1] over the full u32 range
        let raw = (self.next_raw() - 1) as u64;
        ((raw << 32) / (MODULUS - 1)) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
