//! This crate implements a zero-knowledge range proof over an RSA quadratic-residue group:
//! - A Σ-protocol showing `a·m − k ≥ 0` for a secret attribute `m`, without revealing `m`,
//!   by exhibiting a sum-of-squares decomposition of the difference in zero knowledge.
//! - Pluggable strategies for decomposing a non-negative integer into three or four squares.
//! - A generic proof-of-representation kernel for multi-base product relations in the group,
//!   shared with the surrounding credential machinery through name-indexed resolvers.
//! - A Fiat-Shamir challenge builder for making the proof non-interactive.
//!
//! The proof is designed to run alongside a Camenisch-Lysyanskaya signature proof over the
//! same attribute: the caller supplies the attribute and its randomizer, and the response for
//! `m` in the finished [`Proof`] must match the response in the companion signature proof.

#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]

pub mod challenge;
pub mod qr_group;
pub mod range_proof;
pub mod representation;
pub mod splitter;

mod serde;

pub use crate::qr_group::QrGroup;
pub use crate::range_proof::{Proof, ProofCommit, ProofStructure};
pub use crate::splitter::{FourSquares, SquareSplitter, SquaresTable};

use num_bigint::{BigInt, RandBigInt};
use thiserror::Error;

/// Error types that may arise when building or checking a range proof.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The statement `a·m − k ≥ 0` is false for the supplied attribute; no proof exists.
    #[error("requested inequality does not hold")]
    InequalityDoesNotHold,
    /// The splitter returned a different number of summands than it declared.
    #[error("splitter returned {got} summands, expected {expected}")]
    SplitArityMismatch {
        /// The arity the splitter declared through `square_count`.
        expected: usize,
        /// The number of summands actually returned.
        got: usize,
    },
    /// The splitter returned a summand wider than its declared per-square bound.
    #[error("splitter returned a {got}-bit summand, above the declared {bound}-bit bound")]
    SplitSummandTooLarge {
        /// The bound the splitter declared through `ld`.
        bound: u32,
        /// The bit length of the offending summand.
        got: u64,
    },
    /// The splitter returned a negative summand.
    #[error("splitter returned a negative summand")]
    SplitSummandNegative,
    /// The value to decompose lies outside the splitter's supported domain.
    #[error("value cannot be split in this splitter's domain")]
    SplitDomain,
    /// A received proof is malformed or refers to an unusable statement.
    #[error("invalid proof")]
    InvalidProof,
}

/// A trait synonym for a cryptographically secure random number generator. This trait is
/// blanket-implemented for all valid types and will never need to be implemented by-hand.
pub trait Rng: rand::CryptoRng + rand::RngCore {}
impl<T: rand::CryptoRng + rand::RngCore> Rng for T {}

/// Sample a non-negative integer uniformly at random from `[0, 2^bits)`.
pub fn random_bits(rng: &mut impl Rng, bits: u32) -> BigInt {
    rng.gen_biguint(u64::from(bits)).into()
}
