//! Zero-knowledge proofs that a linear function of a secret attribute is non-negative.
//!
//! Given public constants `a` and `k` and a secret attribute `m`, the prover shows
//! `a·m − k ≥ 0` without revealing `m`. The attribute is assumed to be bound into a
//! Camenisch-Lysyanskaya signature held by the prover; the proof here runs alongside the
//! signature proof and shares `m` and its randomizer with it, so that both proofs speak
//! about the same attribute.
//!
//! ## Intuition
//! Over the integers, a number is non-negative exactly when it is a sum of squares. The
//! prover decomposes `δ = a·m − k` as `Σ d_i²` (three or four squares, depending on the
//! chosen [`SquareSplitter`]), commits to each `d_i` as `C_i = R^d_i·S^v_i`, and proves two
//! families of relations in the quadratic-residue group:
//!
//! - `C_i = R^d_i · S^v_i` for each `i`, and
//! - `R^k · Π C_i^d_i = R^a·m · S^v5` where `v5 = Σ d_i·v_i`,
//!
//! which together force `a·m − k = Σ d_i²`. Since the group has unknown order, a prover
//! that could satisfy these relations for a negative difference would contradict the
//! strong RSA assumption.
//!
//! Not every integer is a sum of three squares, but every `n ≡ 2 (mod 4)` is; when a
//! three-square splitter is selected the statement is scaled to `(4a)·m − (4k − 2) ≥ 0`,
//! which is equivalent and lands in that class. Both sides of the protocol derive the
//! adjustment from the number of transmitted bases, so prover and verifier always agree.
//!
//! The protocol has the usual three phases. [`ProofStructure::commitments_from_secrets`]
//! produces the commitment contributions to be folded into the challenge transcript,
//! along with the single-use [`ProofCommit`] witness. After the challenge is fixed (see
//! [`ChallengeBuilder`](crate::challenge::ChallengeBuilder)),
//! [`ProofStructure::build_proof`] consumes the witness and produces the [`Proof`]. The
//! verifier checks shape and size bounds with
//! [`ProofStructure::verify_proof_structure`] and re-derives the same contribution vector
//! from the responses with [`ProofStructure::commitments_from_proof`]; the enclosing
//! transcript comparison does the rest.
//!
//! A [`Proof`] is self-describing: it carries `(a, k, l_d)` so a verifier can rebuild the
//! matching [`ProofStructure`] with [`Proof::extract_structure`]. The verifier must still
//! confirm the proof speaks about the intended statement with [`Proof::proves_statement`];
//! decoding and meaning are deliberately separate steps.

use crate::qr_group::QrGroup;
use crate::representation::{
    BaseMerge, Bases, LhsContribution, Representation, Responses, RhsContribution, Secrets,
};
use crate::splitter::SquareSplitter;
use crate::{random_bits, Error, Rng};
use num_bigint::{BigInt, Sign};
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement descriptor for a proof of `a·m − k ≥ 0`.
///
/// Immutable after construction and shareable across concurrent proof sessions. A
/// structure built by [`ProofStructure::new`] can both prove and verify; one rebuilt from
/// a received proof by [`Proof::extract_structure`] carries no splitter and can only
/// verify.
pub struct ProofStructure {
    c_rep: Vec<Representation>,
    m_correct: Representation,

    a: i64,
    k: BigInt,

    splitter: Option<Box<dyn SquareSplitter + Send + Sync>>,
    ld: u32,
    lm: u32,
    lh: u32,
    lstatzk: u32,
}

/// A finished, transmittable range proof.
///
/// Big integers serialize as decimal strings; `v5`, `m`, and `k` may be absent on the
/// wire, which [`ProofStructure::verify_proof_structure`] and
/// [`Proof::extract_structure`] treat as a rejection rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The transmitted bases `C_i`, one per square.
    #[serde(rename = "C", with = "crate::serde::big_int_vec")]
    pub commitments: Vec<BigInt>,
    /// Responses for the squares `d_i`.
    #[serde(rename = "d", with = "crate::serde::big_int_vec")]
    pub d_responses: Vec<BigInt>,
    /// Responses for the hiders `v_i`.
    #[serde(rename = "v", with = "crate::serde::big_int_vec")]
    pub v_responses: Vec<BigInt>,
    /// Response for the combined hider `v5 = Σ d_i·v_i`.
    #[serde(rename = "v5", with = "crate::serde::opt_big_int", default)]
    pub v5_response: Option<BigInt>,
    /// Response for the attribute `m`; must match the response in the companion
    /// signature proof.
    #[serde(rename = "m", with = "crate::serde::opt_big_int", default)]
    pub m_response: Option<BigInt>,

    /// Per-square bit bound the proof was built with.
    #[serde(rename = "l_d")]
    pub ld: u32,
    /// The (possibly three-square-adjusted) statement constant `a`.
    pub a: i64,
    /// The (possibly three-square-adjusted) statement constant `k`.
    #[serde(with = "crate::serde::opt_big_int", default)]
    pub k: Option<BigInt>,
}

/// The prover's transient witness between the commit and response phases.
///
/// Contains secret material. It is consumed by [`ProofStructure::build_proof`] and must
/// never be used for more than one challenge; answering two challenges from the same
/// commitment reveals the secrets.
#[derive(Debug)]
pub struct ProofCommit {
    // bases
    c: Vec<BigInt>,

    // secrets
    d: Vec<BigInt>,
    d_randomizers: Vec<BigInt>,
    v: Vec<BigInt>,
    v_randomizers: Vec<BigInt>,
    v5: BigInt,
    v5_randomizer: BigInt,
    m: BigInt,
    m_randomizer: BigInt,
}

impl ProofStructure {
    /// Create a structure for proving `a·m − k ≥ 0`.
    ///
    /// `splitter` selects the sum-of-squares strategy; `lh` is the challenge width in
    /// bits, `lm` the width of `m` (also used for computational hiding), and `lstatzk`
    /// the number of bits of statistical hiding.
    ///
    /// # Panics
    /// Panics if the splitter wants to produce more than four squares.
    pub fn new(
        a: i64,
        k: &BigInt,
        splitter: Box<dyn SquareSplitter + Send + Sync>,
        lh: u32,
        lstatzk: u32,
        lm: u32,
    ) -> Self {
        let n_split = splitter.square_count();
        let ld = splitter.ld();
        let (a, k) = if n_split == 3 {
            // Not every number is a sum of three squares, but n ≡ 2 (mod 4) always is;
            // scale the statement so a·m − k falls in that class.
            (a * 4, k * BigInt::from(4) - BigInt::from(2))
        } else {
            (a, k.clone())
        };

        Self::with_params(a, k, Some(splitter), n_split, ld, lh, lstatzk, lm)
    }

    #[allow(clippy::too_many_arguments)]
    fn with_params(
        a: i64,
        k: BigInt,
        splitter: Option<Box<dyn SquareSplitter + Send + Sync>>,
        n_split: usize,
        ld: u32,
        lh: u32,
        lstatzk: u32,
        lm: u32,
    ) -> Self {
        assert!(
            n_split <= 4,
            "no support for splitting delta into more than four squares"
        );

        let mut m_correct = Representation {
            lhs: vec![LhsContribution {
                base: "R".into(),
                power: -k.clone(),
            }],
            rhs: vec![
                RhsContribution {
                    base: "S".into(),
                    secret: "v5".into(),
                    power: -1,
                },
                RhsContribution {
                    base: "R".into(),
                    secret: "m".into(),
                    power: -a,
                },
            ],
        };

        let mut c_rep = Vec::with_capacity(n_split);
        for i in 0..n_split {
            c_rep.push(Representation {
                lhs: vec![LhsContribution {
                    base: format!("C{}", i),
                    power: BigInt::one(),
                }],
                rhs: vec![
                    RhsContribution {
                        base: "R".into(),
                        secret: format!("d{}", i),
                        power: 1,
                    },
                    RhsContribution {
                        base: "S".into(),
                        secret: format!("v{}", i),
                        power: 1,
                    },
                ],
            });

            m_correct.rhs.push(RhsContribution {
                base: format!("C{}", i),
                secret: format!("d{}", i),
                power: 1,
            });
        }

        Self {
            c_rep,
            m_correct,
            a,
            k,
            splitter,
            ld,
            lm,
            lh,
            lstatzk,
        }
    }

    /// Run the commit phase: split `δ = a·m − k`, sample all randomizers, compute the
    /// bases `C_i`, and return the ordered commitment contributions together with the
    /// retained witness.
    ///
    /// The contribution order (the `m`-correctness relation first, then the `C_i`
    /// relations in index order) is part of the protocol: the challenge transcript feeds
    /// on this vector and the verifier reproduces it element for element.
    ///
    /// `m_randomizer` is supplied by the caller so the companion signature proof can use
    /// the same one, binding both proofs to the same attribute.
    pub fn commitments_from_secrets(
        &self,
        rng: &mut impl Rng,
        group: &QrGroup,
        m: &BigInt,
        m_randomizer: &BigInt,
    ) -> Result<(Vec<BigInt>, ProofCommit), Error> {
        let delta = m * BigInt::from(self.a) - &self.k;
        if delta.sign() == Sign::Minus {
            return Err(Error::InequalityDoesNotHold);
        }

        let splitter = self
            .splitter
            .as_ref()
            .expect("a structure reconstructed from a proof cannot prove");
        let d = splitter.split(&delta)?;
        if d.len() != self.c_rep.len() {
            return Err(Error::SplitArityMismatch {
                expected: self.c_rep.len(),
                got: d.len(),
            });
        }

        let mut d_randomizers = Vec::with_capacity(d.len());
        for d_i in &d {
            if d_i.sign() == Sign::Minus {
                return Err(Error::SplitSummandNegative);
            }
            if d_i.bits() > u64::from(self.ld) {
                return Err(Error::SplitSummandTooLarge {
                    bound: self.ld,
                    got: d_i.bits(),
                });
            }
            d_randomizers.push(random_bits(rng, self.ld + self.lh + self.lstatzk));
        }

        let mut v = Vec::with_capacity(d.len());
        let mut v_randomizers = Vec::with_capacity(d.len());
        for _ in 0..d.len() {
            v.push(random_bits(rng, self.lm));
            v_randomizers.push(random_bits(rng, self.lm + self.lh + self.lstatzk));
        }

        // v5 is an integer, never reduced; its size comes from the arithmetic itself.
        let v5: BigInt = d.iter().zip(&v).map(|(d_i, v_i)| d_i * v_i).sum();
        let v5_randomizer = random_bits(rng, self.lm + self.ld + 2 + self.lh + self.lstatzk);

        let c = d
            .iter()
            .zip(&v)
            .map(|(d_i, v_i)| {
                group.r.modpow(d_i, &group.n) * group.s.modpow(v_i, &group.n) % &group.n
            })
            .collect();

        let commit = ProofCommit {
            c,
            d,
            d_randomizers,
            v,
            v_randomizers,
            v5,
            v5_randomizer,
            m: m.clone(),
            m_randomizer: m_randomizer.clone(),
        };

        let bases = BaseMerge::new(group, &commit);
        let mut contributions = Vec::with_capacity(self.c_rep.len() + 1);
        contributions.push(
            self.m_correct
                .commitment_from_secrets(group, &bases, &commit)
                .expect("relation names all resolve in the commit"),
        );
        for rep in &self.c_rep {
            contributions.push(
                rep.commitment_from_secrets(group, &bases, &commit)
                    .expect("relation names all resolve in the commit"),
            );
        }

        Ok((contributions, commit))
    }

    /// Run the response phase: fold the challenge into every secret and emit the proof.
    ///
    /// Consumes the witness; the secret material is dropped here and cannot answer a
    /// second challenge.
    pub fn build_proof(&self, commit: ProofCommit, challenge: &BigInt) -> Proof {
        Proof {
            d_responses: commit
                .d
                .iter()
                .zip(&commit.d_randomizers)
                .map(|(d_i, r)| challenge * d_i + r)
                .collect(),
            v_responses: commit
                .v
                .iter()
                .zip(&commit.v_randomizers)
                .map(|(v_i, r)| challenge * v_i + r)
                .collect(),
            v5_response: Some(challenge * &commit.v5 + &commit.v5_randomizer),
            m_response: Some(challenge * &commit.m + &commit.m_randomizer),
            commitments: commit.c,

            ld: self.ld,
            a: self.a,
            k: Some(self.k.clone()),
        }
    }

    /// Check the shape and size bounds of a received proof. No algebra is performed.
    ///
    /// Rejects missing responses, arrays whose length disagrees with the statement, any
    /// base wider than the modulus, and any response wider than its Σ-protocol bound.
    pub fn verify_proof_structure(&self, group: &QrGroup, proof: &Proof) -> bool {
        if proof.commitments.len() != self.c_rep.len()
            || proof.d_responses.len() != self.c_rep.len()
            || proof.v_responses.len() != self.c_rep.len()
        {
            return false;
        }

        let (v5_response, m_response) = match (&proof.v5_response, &proof.m_response) {
            (Some(v5), Some(m)) => (v5, m),
            _ => return false,
        };
        if v5_response.bits() > u64::from(self.lm + self.ld + 2 + self.lh + self.lstatzk + 1)
            || m_response.bits() > u64::from(self.lm + self.lh + self.lstatzk + 1)
        {
            return false;
        }

        for i in 0..self.c_rep.len() {
            if proof.commitments[i].bits() > group.n.bits()
                || proof.d_responses[i].bits() > u64::from(self.ld + self.lh + self.lstatzk + 1)
                || proof.v_responses[i].bits() > u64::from(self.lm + self.lh + self.lstatzk + 1)
            {
                return false;
            }
        }

        true
    }

    /// Re-derive the commitment contributions from a proof's responses and the challenge,
    /// in the same order as [`commitments_from_secrets`](Self::commitments_from_secrets).
    ///
    /// For an honest proof and the matching challenge the result equals the prover's
    /// vector; the enclosing transcript comparison confirms it. Fails only when a
    /// transmitted base is not invertible modulo `N`, which honest bases never are.
    pub fn commitments_from_proof(
        &self,
        group: &QrGroup,
        proof: &Proof,
        challenge: &BigInt,
    ) -> Result<Vec<BigInt>, Error> {
        let bases = BaseMerge::new(group, proof);

        let mut contributions = Vec::with_capacity(self.c_rep.len() + 1);
        contributions.push(
            self.m_correct
                .commitment_from_proof(group, challenge, &bases, proof)?,
        );
        for rep in &self.c_rep {
            contributions.push(rep.commitment_from_proof(group, challenge, &bases, proof)?);
        }

        Ok(contributions)
    }
}

impl fmt::Debug for ProofStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofStructure")
            .field("a", &self.a)
            .field("k", &self.k)
            .field("n_split", &self.c_rep.len())
            .field("ld", &self.ld)
            .field("lm", &self.lm)
            .field("lh", &self.lh)
            .field("lstatzk", &self.lstatzk)
            .finish_non_exhaustive()
    }
}

impl Proof {
    /// Check that this proof speaks about the statement `a·m − k ≥ 0`.
    ///
    /// The embedded constants carry the three-square adjustment when the prover used a
    /// three-square splitter, so the caller's `(a, k)` are adjusted the same way (derived
    /// from the number of transmitted bases) before comparing.
    pub fn proves_statement(&self, a: i64, k: &BigInt) -> bool {
        let (a, k) = if self.commitments.len() == 3 {
            (a * 4, k * BigInt::from(4) - BigInt::from(2))
        } else {
            (a, k.clone())
        };
        self.a == a && self.k.as_ref() == Some(&k)
    }

    /// Rebuild the [`ProofStructure`] this proof was made with, for verification.
    ///
    /// The result has no splitter and cannot prove. Rejects proofs whose self-described
    /// parameters are unusable: a missing `k`, a per-square bound wider than `lm` (which
    /// would exceed any attainable difference), a square count outside `{3, 4}`, or a
    /// `k` so large the statement is trivially true or false.
    pub fn extract_structure(
        &self,
        lh: u32,
        lstatzk: u32,
        lm: u32,
    ) -> Result<ProofStructure, Error> {
        let k = self.k.as_ref().ok_or(Error::InvalidProof)?;
        if self.ld > lm
            || self.commitments.len() < 3
            || self.commitments.len() > 4
            || k.bits() > u64::from(lm) + u64::from(i64::BITS)
        {
            return Err(Error::InvalidProof);
        }

        Ok(ProofStructure::with_params(
            self.a,
            k.clone(),
            None,
            self.commitments.len(),
            self.ld,
            lh,
            lstatzk,
            lm,
        ))
    }
}

fn parse_index(name: &str, prefix: char) -> Option<usize> {
    name.strip_prefix(prefix)?.parse().ok()
}

impl Secrets for ProofCommit {
    fn secret(&self, name: &str) -> Option<&BigInt> {
        match name {
            "m" => Some(&self.m),
            "v5" => Some(&self.v5),
            _ if name.starts_with('v') => parse_index(name, 'v').and_then(|i| self.v.get(i)),
            _ if name.starts_with('d') => parse_index(name, 'd').and_then(|i| self.d.get(i)),
            _ => None,
        }
    }

    fn randomizer(&self, name: &str) -> Option<&BigInt> {
        match name {
            "m" => Some(&self.m_randomizer),
            "v5" => Some(&self.v5_randomizer),
            _ if name.starts_with('v') => {
                parse_index(name, 'v').and_then(|i| self.v_randomizers.get(i))
            }
            _ if name.starts_with('d') => {
                parse_index(name, 'd').and_then(|i| self.d_randomizers.get(i))
            }
            _ => None,
        }
    }
}

impl Bases for ProofCommit {
    fn base(&self, name: &str) -> Option<&BigInt> {
        parse_index(name, 'C').and_then(|i| self.c.get(i))
    }

    fn names(&self) -> Vec<String> {
        (0..self.c.len()).map(|i| format!("C{}", i)).collect()
    }
}

impl Responses for Proof {
    fn response(&self, name: &str) -> Option<&BigInt> {
        match name {
            "m" => self.m_response.as_ref(),
            "v5" => self.v5_response.as_ref(),
            _ if name.starts_with('v') => {
                parse_index(name, 'v').and_then(|i| self.v_responses.get(i))
            }
            _ if name.starts_with('d') => {
                parse_index(name, 'd').and_then(|i| self.d_responses.get(i))
            }
            _ => None,
        }
    }
}

impl Bases for Proof {
    fn base(&self, name: &str) -> Option<&BigInt> {
        parse_index(name, 'C').and_then(|i| self.commitments.get(i))
    }

    fn names(&self) -> Vec<String> {
        (0..self.commitments.len())
            .map(|i| format!("C{}", i))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::splitter::SquaresTable;
    use crate::FourSquares;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::from_seed(*b"NEVER SEED PRODUCTION RNGS SO OK")
    }

    // A toy group keeps the unit tests fast; the full-size group lives in the
    // integration tests.
    fn group() -> QrGroup {
        QrGroup::new(BigInt::from(35), BigInt::from(3), BigInt::from(4))
    }

    fn structure_3() -> ProofStructure {
        ProofStructure::new(1, &BigInt::from(45), Box::new(SquaresTable::generate(512)), 256, 128, 256)
    }

    fn proof_3(rng: &mut StdRng) -> (ProofStructure, Proof) {
        let g = group();
        let s = structure_3();
        let m = BigInt::from(112);
        let m_randomizer = random_bits(rng, 256 + 256 + 128);
        let (_, commit) = s
            .commitments_from_secrets(rng, &g, &m, &m_randomizer)
            .unwrap();
        let proof = s.build_proof(commit, &BigInt::from(1_234_567));
        (s, proof)
    }

    #[test]
    fn three_square_statement_adjustment() {
        let s = structure_3();
        assert_eq!(s.a, 4);
        assert_eq!(s.k, BigInt::from(4 * 45 - 2));
        assert_eq!(s.c_rep.len(), 3);

        let s = ProofStructure::new(1, &BigInt::from(45), Box::new(FourSquares), 256, 128, 256);
        assert_eq!(s.a, 1);
        assert_eq!(s.k, BigInt::from(45));
        assert_eq!(s.c_rep.len(), 4);
    }

    #[test]
    fn adjustment_does_not_touch_callers_k() {
        let k = BigInt::from(45);
        let _ = ProofStructure::new(1, &k, Box::new(SquaresTable::generate(512)), 256, 128, 256);
        assert_eq!(k, BigInt::from(45));
    }

    #[test]
    #[should_panic(expected = "more than four squares")]
    fn five_squares_is_a_programmer_error() {
        let _ = ProofStructure::with_params(
            1,
            BigInt::from(45),
            None,
            5,
            8,
            256,
            128,
            256,
        );
    }

    #[test]
    fn proof_carries_the_statement() {
        let mut rng = rng();
        let (_, proof) = proof_3(&mut rng);
        assert_eq!(proof.a, 4);
        assert_eq!(proof.k, Some(BigInt::from(178)));

        // the caller asks about the unadjusted statement
        assert!(proof.proves_statement(1, &BigInt::from(45)));
        assert!(!proof.proves_statement(1, &BigInt::from(46)));
        assert!(!proof.proves_statement(2, &BigInt::from(45)));
    }

    #[test]
    fn commit_resolvers() {
        let mut rng = rng();
        let g = group();
        let s = structure_3();
        let m = BigInt::from(112);
        let m_randomizer = random_bits(&mut rng, 256 + 256 + 128);
        let (_, commit) = s
            .commitments_from_secrets(&mut rng, &g, &m, &m_randomizer)
            .unwrap();

        let mut names = commit.names();
        names.sort();
        assert_eq!(names, vec!["C0".to_string(), "C1".into(), "C2".into()]);

        for i in 0..3 {
            let idx = |prefix: &str| format!("{}{}", prefix, i);
            assert_eq!(commit.base(&idx("C")), Some(&commit.c[i]));
            assert_eq!(commit.secret(&idx("d")), Some(&commit.d[i]));
            assert_eq!(commit.secret(&idx("v")), Some(&commit.v[i]));
            assert_eq!(commit.randomizer(&idx("d")), Some(&commit.d_randomizers[i]));
            assert_eq!(commit.randomizer(&idx("v")), Some(&commit.v_randomizers[i]));
        }
        assert_eq!(commit.secret("m"), Some(&commit.m));
        assert_eq!(commit.secret("v5"), Some(&commit.v5));
        assert_eq!(commit.randomizer("m"), Some(&commit.m_randomizer));
        assert_eq!(commit.randomizer("v5"), Some(&commit.v5_randomizer));

        for bad in ["C3", "C-1", "Cabcd", "jdsdfj", "d3", "d-1", "dxyz", "v3", "v-1", "vxyz", "malsd", ""] {
            assert_eq!(commit.base(bad), None, "{}", bad);
            assert_eq!(commit.secret(bad), None, "{}", bad);
            assert_eq!(commit.randomizer(bad), None, "{}", bad);
        }

        let exp = commit.exp("C0", &BigInt::from(15), g.modulus());
        assert_eq!(
            exp,
            Some(commit.c[0].modpow(&BigInt::from(15), g.modulus()))
        );
        assert_eq!(commit.exp("C3", &BigInt::from(21), g.modulus()), None);
    }

    #[test]
    fn proof_resolvers() {
        let mut rng = rng();
        let (_, proof) = proof_3(&mut rng);

        let mut names = Bases::names(&proof);
        names.sort();
        assert_eq!(names, vec!["C0".to_string(), "C1".into(), "C2".into()]);

        for i in 0..3 {
            assert_eq!(proof.base(&format!("C{}", i)), Some(&proof.commitments[i]));
            assert_eq!(
                proof.response(&format!("d{}", i)),
                Some(&proof.d_responses[i])
            );
            assert_eq!(
                proof.response(&format!("v{}", i)),
                Some(&proof.v_responses[i])
            );
        }
        assert_eq!(proof.response("m"), proof.m_response.as_ref());
        assert_eq!(proof.response("v5"), proof.v5_response.as_ref());

        for bad in ["C3", "C-1", "Cabcd", "d3", "d-1", "dalsdf", "v3", "v-1", "vajdfsk", "msdfjk", "sjfd"] {
            assert_eq!(proof.base(bad), None, "{}", bad);
            assert_eq!(proof.response(bad), None, "{}", bad);
        }
    }

    #[test]
    fn structure_extraction_bounds() {
        let mut rng = rng();
        let (_, proof) = proof_3(&mut rng);

        assert!(proof.extract_structure(256, 128, 256).is_ok());

        let mut missing_k = proof.clone();
        missing_k.k = None;
        assert!(missing_k.extract_structure(256, 128, 256).is_err());

        let mut wide_ld = proof.clone();
        wide_ld.ld = 257;
        assert!(wide_ld.extract_structure(256, 128, 256).is_err());

        let mut short = proof.clone();
        let _ = short.commitments.pop();
        assert!(short.extract_structure(256, 128, 256).is_err());

        let mut wide_k = proof.clone();
        wide_k.k = Some(BigInt::one() << (256 + 64 + 1) as usize);
        assert!(wide_k.extract_structure(256, 128, 256).is_err());
    }
}
