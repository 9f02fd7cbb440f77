//! The quadratic-residue group a range proof lives in.
//!
//! The group is described by a modulus `N` (in practice a product of two safe primes) and two
//! generators `R` and `S` of the subgroup of squares modulo `N`. The order of that subgroup is
//! unknown to the prover, which is what makes the sum-of-squares range proof sound under the
//! strong RSA assumption. The generators are assumed to be honestly generated quadratic
//! residues; this module does not (and cannot efficiently) verify that.

use crate::representation::Bases;
use crate::Rng;
use num_bigint::{BigInt, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::One;

/// An RSA quadratic-residue group `(N, R, S)`.
///
/// Immutable after construction; may be shared freely across concurrent proof sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrGroup {
    pub(crate) n: BigInt,
    pub(crate) r: BigInt,
    pub(crate) s: BigInt,
}

impl QrGroup {
    /// Create a group from a modulus and two quadratic-residue bases.
    pub fn new(n: BigInt, r: BigInt, s: BigInt) -> Self {
        Self { n, r, s }
    }

    /// Create a group over modulus `n` with uniformly sampled quadratic-residue bases.
    ///
    /// Useful for tests and setup ceremonies; sampling the bases independently means no
    /// discrete-logarithm relation between them is known.
    pub fn random(rng: &mut impl Rng, n: BigInt) -> Self {
        let mut group = Self {
            n,
            r: BigInt::one(),
            s: BigInt::one(),
        };
        group.r = group.random_qr(rng);
        group.s = group.random_qr(rng);
        group
    }

    /// The group modulus `N`.
    pub fn modulus(&self) -> &BigInt {
        &self.n
    }

    /// Sample a random quadratic residue modulo `N`.
    pub fn random_qr(&self, rng: &mut impl Rng) -> BigInt {
        let root: BigInt = rng.gen_biguint_below(self.n.magnitude()).into();
        &root * &root % &self.n
    }
}

impl Bases for QrGroup {
    fn base(&self, name: &str) -> Option<&BigInt> {
        match name {
            "R" => Some(&self.r),
            "S" => Some(&self.s),
            _ => None,
        }
    }

    fn names(&self) -> Vec<String> {
        vec!["R".into(), "S".into()]
    }
}

/// Invert `x` modulo `modulus`, if the two are coprime.
pub(crate) fn mod_inverse(x: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let extended = x.extended_gcd(modulus);
    if extended.gcd.is_one() {
        Some(extended.x.mod_floor(modulus))
    } else {
        None
    }
}

/// Modular exponentiation with support for negative exponents.
///
/// Returns `None` when the exponent is negative and the base is not invertible modulo
/// `modulus`, which for honestly generated groups only happens on adversarial input.
pub(crate) fn mod_exp(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let base = base.mod_floor(modulus);
    if exponent.sign() == Sign::Minus {
        let inverse = mod_inverse(&base, modulus)?;
        Some(inverse.modpow(&-exponent, modulus))
    } else {
        Some(base.modpow(exponent, modulus))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn group() -> QrGroup {
        QrGroup::new(BigInt::from(35), BigInt::from(3), BigInt::from(4))
    }

    #[test]
    fn base_lookup() {
        let g = group();
        assert_eq!(g.base("R"), Some(&BigInt::from(3)));
        assert_eq!(g.base("S"), Some(&BigInt::from(4)));
        assert_eq!(g.base("N"), None);
        assert_eq!(g.base("R1234"), None);
        assert_eq!(g.base(""), None);

        let mut names = g.names();
        names.sort();
        assert_eq!(names, vec!["R".to_string(), "S".to_string()]);
    }

    #[test]
    fn base_exp() {
        let g = group();
        assert_eq!(
            g.exp("R", &BigInt::from(5), g.modulus()),
            Some(BigInt::from(3).modpow(&BigInt::from(5), g.modulus()))
        );
        assert_eq!(
            g.exp("S", &BigInt::from(7), g.modulus()),
            Some(BigInt::from(4).modpow(&BigInt::from(7), g.modulus()))
        );
        assert_eq!(g.exp("N", &BigInt::from(9), g.modulus()), None);
        assert_eq!(g.exp("R1234", &BigInt::from(11), g.modulus()), None);
    }

    #[test]
    fn random_qr_is_a_square() {
        let mut rng = rand::rngs::OsRng;
        let g = group();
        for _ in 0..32 {
            let qr = g.random_qr(&mut rng);
            assert!(qr >= BigInt::from(0) && &qr < g.modulus());
        }
    }

    #[test]
    fn inverse() {
        let n = BigInt::from(35);
        // 3 * 12 = 36 ≡ 1 (mod 35)
        assert_eq!(mod_inverse(&BigInt::from(3), &n), Some(BigInt::from(12)));
        // gcd(5, 35) = 5, no inverse
        assert_eq!(mod_inverse(&BigInt::from(5), &n), None);
    }

    #[test]
    fn negative_exponents() {
        let n = BigInt::from(35);
        assert_eq!(mod_exp(&BigInt::from(3), &BigInt::from(-1), &n), Some(BigInt::from(12)));
        assert_eq!(
            mod_exp(&BigInt::from(3), &BigInt::from(-2), &n),
            Some(BigInt::from(12).modpow(&BigInt::from(2), &n))
        );
        assert_eq!(mod_exp(&BigInt::from(5), &BigInt::from(-1), &n), None);
        // negative bases are normalized before exponentiation
        assert_eq!(
            mod_exp(&BigInt::from(-32), &BigInt::from(2), &n),
            Some(BigInt::from(9))
        );
    }
}
