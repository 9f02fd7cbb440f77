//! Functionality for building challenges.
//!
//! In an interactive proof the verifier picks the challenge at random after seeing the
//! commitment contributions. It is standard practice to use the Fiat-Shamir heuristic to
//! make the proof non-interactive instead: the challenge is a hash over the public inputs
//! and the ordered contribution vector, so neither side can steer it. The verifier
//! recomputes the hash over the re-derived contributions and accepts only if it lands on
//! the same challenge.
//!
//! Integers are fed to the hash with a sign tag and a length prefix, so distinct
//! transcripts cannot collide by concatenation.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;
use sha3::{Digest, Sha3_256};

/// Accumulates transcript data and produces a challenge by hashing.
#[derive(Debug, Default)]
pub struct ChallengeBuilder {
    hasher: Sha3_256,
}

impl ChallengeBuilder {
    /// Initialize a new, empty transcript.
    pub fn new() -> Self {
        Self {
            hasher: Sha3_256::new(),
        }
    }

    /// Incorporate arbitrary bytes into the transcript.
    pub fn with_bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.hasher.update(bytes.as_ref());
        self
    }

    /// Incorporate a big integer into the transcript.
    pub fn with_int(self, value: &BigInt) -> Self {
        let (sign, bytes) = value.to_bytes_be();
        let tag: u8 = if sign == Sign::Minus { 0 } else { 1 };
        self.with_bytes([tag])
            .with_bytes((bytes.len() as u64).to_be_bytes())
            .with_bytes(bytes)
    }

    /// Incorporate an ordered list of commitment contributions into the transcript.
    pub fn with_contributions<'a>(self, contributions: impl IntoIterator<Item = &'a BigInt>) -> Self {
        contributions
            .into_iter()
            .fold(self, |builder, contribution| builder.with_int(contribution))
    }

    /// Consume the builder and produce a challenge of at most `bits` bits.
    pub fn finish(self, bits: u32) -> BigInt {
        let digest = self.hasher.finalize();
        let challenge = BigUint::from_bytes_be(&digest);
        let mask = (BigUint::one() << bits.min(256) as usize) - 1u32;
        BigInt::from(challenge & mask)
    }
}
