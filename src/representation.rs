//! Proofs of knowledge of a representation - that is, of exponents satisfying a multi-base
//! product relation `Π lhs_base^power = Π rhs_base^secret·power` in a quadratic-residue group.
//!
//! This is the Σ-protocol kernel the range proof composes in. It is deliberately decoupled
//! from the range proof's internal layout: bases, secrets, randomizers, and responses are
//! resolved by short string names ("R", "C0", "d3", "v5", "m") through the lookup traits
//! below, so the same kernel serves both fixed group generators and bases transmitted inside
//! a proof.
//!
//! The kernel computes commitment contributions for the two halves of the protocol:
//!
//! 1. *Commit*. From secrets: the contribution is `Π rhs_base^(randomizer·power) mod N`.
//! 2. *Verify*. From responses: the contribution is
//!    `lhs^(−challenge) · Π rhs_base^(response·power) mod N`.
//!
//! For an honest prover and matching challenge the two coincide, since each response is
//! `challenge·secret + randomizer` over the integers. The contributions are folded into a
//! Fiat-Shamir transcript by the enclosing protocol; equality of the transcripts is what is
//! actually checked.

use crate::qr_group::{mod_exp, QrGroup};
use crate::Error;
use num_bigint::BigInt;
use num_traits::One;

/// Named-base resolution for a group or a proof object carrying transmitted bases.
pub trait Bases {
    /// Look up a base by name. Unknown names yield `None`.
    fn base(&self, name: &str) -> Option<&BigInt>;

    /// Compute `base(name)^exponent mod modulus`.
    ///
    /// Returns `None` when the name is unknown, or when the exponent is negative and the
    /// base is not invertible.
    fn exp(&self, name: &str, exponent: &BigInt, modulus: &BigInt) -> Option<BigInt> {
        self.base(name)
            .and_then(|base| mod_exp(base, exponent, modulus))
    }

    /// Enumerate the names this resolver knows.
    fn names(&self) -> Vec<String>;
}

/// Named lookup of the secrets and randomizers held by a prover during the commit phase.
pub trait Secrets {
    /// Look up a secret by name.
    fn secret(&self, name: &str) -> Option<&BigInt>;

    /// Look up the randomizer blinding the named secret.
    fn randomizer(&self, name: &str) -> Option<&BigInt>;
}

/// Named lookup of the responses carried by a finished proof.
pub trait Responses {
    /// Look up the response for the named secret.
    fn response(&self, name: &str) -> Option<&BigInt>;
}

/// Chains two base resolvers, trying the first and falling back to the second.
///
/// Used to resolve both the fixed group generators and the bases transmitted with a
/// commitment or proof through a single lookup.
#[derive(Debug, Clone, Copy)]
pub struct BaseMerge<'a, A, B>(&'a A, &'a B);

impl<'a, A: Bases, B: Bases> BaseMerge<'a, A, B> {
    /// Merge two base resolvers.
    pub fn new(first: &'a A, second: &'a B) -> Self {
        Self(first, second)
    }
}

impl<A: Bases, B: Bases> Bases for BaseMerge<'_, A, B> {
    fn base(&self, name: &str) -> Option<&BigInt> {
        self.0.base(name).or_else(|| self.1.base(name))
    }

    fn names(&self) -> Vec<String> {
        let mut names = self.0.names();
        names.extend(self.1.names());
        names
    }
}

/// One multiplicand `base^power` on the left-hand side of a relation.
#[derive(Debug, Clone)]
pub struct LhsContribution {
    /// Name of the base, resolved at computation time.
    pub base: String,
    /// The public power the base is raised to.
    pub power: BigInt,
}

/// One multiplicand `base^(secret·power)` on the right-hand side of a relation.
#[derive(Debug, Clone)]
pub struct RhsContribution {
    /// Name of the base, resolved at computation time.
    pub base: String,
    /// Name of the secret exponent.
    pub secret: String,
    /// Small public multiplier applied to the secret.
    pub power: i64,
}

/// A multi-base product relation `Π lhs = Π rhs` to be proven in zero knowledge.
#[derive(Debug, Clone)]
pub struct Representation {
    /// The left-hand side, a product of publicly known powers.
    pub lhs: Vec<LhsContribution>,
    /// The right-hand side, a product of secret powers.
    pub rhs: Vec<RhsContribution>,
}

impl Representation {
    /// Compute the commit-phase contribution from the prover's randomizers.
    ///
    /// Returns `None` when a referenced name does not resolve; relations built by this
    /// crate only reference names their commit objects define.
    pub fn commitment_from_secrets(
        &self,
        group: &QrGroup,
        bases: &impl Bases,
        secrets: &impl Secrets,
    ) -> Option<BigInt> {
        let mut commitment = BigInt::one();
        for term in &self.rhs {
            let randomizer = secrets.randomizer(&term.secret)?;
            let exponent = randomizer * BigInt::from(term.power);
            let contribution = bases.exp(&term.base, &exponent, &group.n)?;
            commitment = commitment * contribution % &group.n;
        }
        Some(commitment)
    }

    /// Re-derive the commit-phase contribution from a proof's responses and the challenge.
    ///
    /// Fails with [`Error::InvalidProof`] when a transmitted base is not invertible modulo
    /// `N`, which cannot happen for honestly computed bases.
    pub fn commitment_from_proof(
        &self,
        group: &QrGroup,
        challenge: &BigInt,
        bases: &impl Bases,
        responses: &impl Responses,
    ) -> Result<BigInt, Error> {
        let mut lhs = BigInt::one();
        for term in &self.lhs {
            let contribution = bases
                .exp(&term.base, &term.power, &group.n)
                .ok_or(Error::InvalidProof)?;
            lhs = lhs * contribution % &group.n;
        }

        let mut commitment = mod_exp(&lhs, &-challenge, &group.n).ok_or(Error::InvalidProof)?;
        for term in &self.rhs {
            let response = responses.response(&term.secret).ok_or(Error::InvalidProof)?;
            let exponent = response * BigInt::from(term.power);
            let contribution = bases
                .exp(&term.base, &exponent, &group.n)
                .ok_or(Error::InvalidProof)?;
            commitment = commitment * contribution % &group.n;
        }
        Ok(commitment)
    }
}
