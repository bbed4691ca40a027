//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the minimal C PCG32 implementation from <https://www.pcg-random.org/>, exposed through the [rand] traits.
//!
//! PCG32 was chosen as the default source of (pseudo)random numbers as it is simple, fast, and --- with a fixed seed --- gives the deterministic solves and byte-identical proofs the tests rely on.
//!
//! A [context](crate::context) is generic over its source of randomness, fixed to [MinimalPCG32] by the canonical [Context](crate::context::Context) and seeded from [Config::random_seed](crate::config::Config::random_seed).

use rand::{RngCore, SeedableRng};

/// State and increment of a PCG32 generator.
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        /// Entirely unmotivated.
        const INCREMENT: u64 = 3215534235932367344;
        Self {
            state: u64::from_le_bytes(seed).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determined_by_seed() {
        let mut a = MinimalPCG32::from_seed(91648253_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(91648253_u64.to_le_bytes());

        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn seeds_diverge() {
        let mut a = MinimalPCG32::from_seed(2_u64.to_le_bytes());
        let mut b = MinimalPCG32::from_seed(3_u64.to_le_bytes());

        let a_values: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_values: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_values, b_values);
    }
}
