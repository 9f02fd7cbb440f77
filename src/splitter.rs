//! Strategies for decomposing a non-negative integer into a sum of squares.
//!
//! The range proof shows `δ = a·m − k ≥ 0` by exhibiting integers `d_i` with
//! `Σ d_i² = δ`; such a decomposition cannot exist for a negative δ. Two strategies are
//! provided:
//!
//! - [`SquaresTable`], a precomputed three-square lookup. Not every integer is a sum of
//!   three squares: by Legendre's theorem exactly the integers not of the form
//!   `4^j·(8t + 7)` are, and `δ ≡ 2 (mod 4)` always qualifies. The range proof steers δ
//!   into that class by scaling the statement, at the cost of a 4× range expansion.
//! - [`FourSquares`], a Rabin-Shallit-style probabilistic decomposition into four squares,
//!   which exist for every non-negative integer by Lagrange's theorem.
//!
//! Three squares save one commitment and a few exponentiations per proof; the table pays
//! for that with an up-front `O(limit^1.5)` generation cost and a bounded input domain.
//!
//! The prover treats splitters as untrusted: arity and per-square width are re-checked
//! against [`SquareSplitter::square_count`] and [`SquareSplitter::ld`] after every split. A
//! misbehaving splitter can only make its own proof fail verification, never forge one, but
//! catching it early gives a usable error instead of a rejected proof.

use crate::Error;
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;

/// A method for splitting a non-negative integer into a sum of squares.
pub trait SquareSplitter {
    /// Decompose `delta` into exactly [`square_count`](Self::square_count) non-negative
    /// integers whose squares sum to `delta`.
    fn split(&self, delta: &BigInt) -> Result<Vec<BigInt>, Error>;

    /// The number of summands in a decomposition.
    fn square_count(&self) -> usize;

    /// An upper bound on the bit length of any returned summand.
    fn ld(&self) -> u32;
}

/// Precomputed lookup table for splitting into three squares.
///
/// The table stores a decomposition for every `v ≡ 2 (mod 4)` up to `4·limit`; the entry
/// for `v` lives at index `(v − 2) / 4`.
#[derive(Debug, Clone)]
pub struct SquaresTable {
    entries: Vec<[i64; 3]>,
}

impl SquaresTable {
    /// Generate a table covering every `δ ≡ 2 (mod 4)` with `δ ≤ 4·limit`.
    ///
    /// Enumerates all of `i² + j² + k² ≤ 4·limit`, keeping the last triple found for each
    /// value; which triple wins is irrelevant for correctness. Takes `O(limit^1.5)` time.
    pub fn generate(limit: i64) -> Self {
        let mut entries = vec![[0i64; 3]; limit.max(0) as usize];
        let bound = 4 * limit;

        let mut i = 0i64;
        while i * i <= bound {
            let mut j = 0i64;
            while i * i + j * j <= bound {
                let mut k = 0i64;
                while i * i + j * j + k * k <= bound {
                    let v = i * i + j * j + k * k;
                    if v % 4 == 2 {
                        entries[((v - 2) / 4) as usize] = [i, j, k];
                    }
                    k += 1;
                }
                j += 1;
            }
            i += 1;
        }

        Self { entries }
    }
}

impl SquareSplitter for SquaresTable {
    fn split(&self, delta: &BigInt) -> Result<Vec<BigInt>, Error> {
        let v = delta.to_i64().ok_or(Error::SplitDomain)?;
        if v < 0 || v % 4 != 2 {
            return Err(Error::SplitDomain);
        }
        let entry = self
            .entries
            .get(((v - 2) / 4) as usize)
            .ok_or(Error::SplitDomain)?;
        Ok(entry.iter().map(|&d| BigInt::from(d)).collect())
    }

    fn square_count(&self) -> usize {
        3
    }

    fn ld(&self) -> u32 {
        let mut len = self.entries.len();
        let mut ld = 0;
        while len > 0 {
            len /= 4;
            ld += 1;
        }
        // one extra bit compensates for the 4x range expansion of the three-square class
        ld + 1
    }
}

/// Four-square decomposition by probabilistic descent.
///
/// Handles every non-negative integer. The 128-bit summand bound is ample for the
/// attribute sizes that occur in the credential setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourSquares;

impl SquareSplitter for FourSquares {
    fn split(&self, delta: &BigInt) -> Result<Vec<BigInt>, Error> {
        let delta = delta.to_biguint().ok_or(Error::SplitDomain)?;
        let squares = sum_four_squares(&delta)?;
        Ok(squares.into_iter().map(BigInt::from).collect())
    }

    fn square_count(&self) -> usize {
        4
    }

    fn ld(&self) -> u32 {
        128
    }
}

/// Candidate remainders are retried with fresh randomness up to this many times before the
/// split is abandoned; in practice a few dozen attempts suffice at any size.
const MAX_SPLIT_ATTEMPTS: usize = 10_000;

/// Decompose `n` into four squares (Lagrange).
fn sum_four_squares(n: &BigUint) -> Result<[BigUint; 4], Error> {
    if n.is_zero() {
        return Ok([BigUint::zero(), BigUint::zero(), BigUint::zero(), BigUint::zero()]);
    }

    // n = 4^shift · m with m ≢ 0 (mod 4); scale a decomposition of m back up by 2^shift.
    let shift = (n.trailing_zeros().unwrap_or(0) / 2) as usize;
    let m = n >> (2 * shift);

    let (head, rest) = if mod8(&m) == 7 {
        // m itself is not a sum of three squares; peel off an odd square first, leaving
        // a remainder ≡ 6 (mod 8) which always is.
        let mut x = m.sqrt();
        if mod8(&x) % 2 == 0 {
            x -= 1u32;
        }
        let rest = &m - &x * &x;
        (x, rest)
    } else {
        (BigUint::zero(), m)
    };

    let [b, c, d] = sum_three_squares(&rest)?;
    Ok([head << shift, b << shift, c << shift, d << shift])
}

/// Decompose `r` into three squares. `r` must not be of the form `4^j·(8t + 7)`.
fn sum_three_squares(r: &BigUint) -> Result<[BigUint; 3], Error> {
    if r.is_zero() {
        return Ok([BigUint::zero(), BigUint::zero(), BigUint::zero()]);
    }

    let shift = (r.trailing_zeros().unwrap_or(0) / 2) as usize;
    let m = r >> (2 * shift);

    let [a, b, c] = three_squares_core(&m)?;
    Ok([a << shift, b << shift, c << shift])
}

/// Three-square decomposition of `m` with `m ≢ 0 (mod 4)` and `m ≢ 7 (mod 8)`.
///
/// Small inputs are solved exhaustively. Larger ones follow the classic probabilistic
/// recipe: write `m = x² + p` (or `m = x² + 2p` when `m ≡ 3 (mod 8)`) for random `x` of
/// suitable parity until `p` is 1, a perfect square, or a prime ≡ 1 (mod 4), which
/// Hermite-Serret splits into two squares.
fn three_squares_core(m: &BigUint) -> Result<[BigUint; 3], Error> {
    if mod8(m) == 7 {
        return Err(Error::SplitDomain);
    }
    if let Some(small) = m.to_u64() {
        if small < (1 << 20) {
            return three_squares_exhaustive(small);
        }
    }

    let mut rng = rand::thread_rng();
    let root_bound = m.sqrt() + 1u32;
    let m8 = mod8(m);
    // m ≡ 3 (mod 8) needs odd x so that (m − x²)/2 ≡ 1 (mod 4); otherwise the parity of
    // x is chosen so that p = m − x² ≡ 1 (mod 4).
    let want_odd = m8 == 3 || m8 % 2 == 0;

    for _ in 0..MAX_SPLIT_ATTEMPTS {
        let mut x = rng.gen_biguint_below(&root_bound);
        if (mod8(&x) % 2 == 1) != want_odd {
            if x.is_zero() {
                continue;
            }
            x -= 1u32;
        }

        if m8 == 3 {
            let p = (m - &x * &x) >> 1usize;
            if p.is_one() {
                return Ok([x, BigUint::one(), BigUint::one()]);
            }
            if let Some(c) = exact_sqrt(&p) {
                return Ok([x, c.clone(), c]);
            }
            if is_probable_prime(&p, &mut rng) {
                let (a, b) = two_squares_of_prime(&p, &mut rng);
                let sum = &a + &b;
                let diff = if a > b { &a - &b } else { &b - &a };
                // x² + (a+b)² + (a−b)² = x² + 2(a² + b²) = x² + 2p
                return Ok([x, sum, diff]);
            }
        } else {
            let p = m - &x * &x;
            if p.is_one() {
                return Ok([x, BigUint::one(), BigUint::zero()]);
            }
            if let Some(c) = exact_sqrt(&p) {
                return Ok([x, c, BigUint::zero()]);
            }
            if is_probable_prime(&p, &mut rng) {
                let (a, b) = two_squares_of_prime(&p, &mut rng);
                return Ok([x, a, b]);
            }
        }
    }

    Err(Error::SplitDomain)
}

/// Exhaustive three-square search for small inputs, complete by Legendre's theorem.
fn three_squares_exhaustive(n: u64) -> Result<[BigUint; 3], Error> {
    let mut x = isqrt_u64(n);
    loop {
        let r1 = n - x * x;
        let mut y = isqrt_u64(r1).min(x);
        loop {
            let r2 = r1 - y * y;
            let z = isqrt_u64(r2);
            if z * z == r2 {
                return Ok([BigUint::from(x), BigUint::from(y), BigUint::from(z)]);
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }
        if x == 0 {
            return Err(Error::SplitDomain);
        }
        x -= 1;
    }
}

fn isqrt_u64(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root > 0 && root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Write a prime `p ≡ 1 (mod 4)` as a sum of two squares (Hermite-Serret).
///
/// Finds a square root of −1 by exponentiation, then runs the Euclidean algorithm on
/// `(p, z)`; the first two remainders below `√p` are the two summands.
fn two_squares_of_prime(p: &BigUint, rng: &mut impl RngCore) -> (BigUint, BigUint) {
    let p_minus_one = p - 1u32;
    let exponent = &p_minus_one >> 2usize;
    let two = BigUint::from(2u32);

    let z = loop {
        let u = rng.gen_biguint_range(&two, p);
        let z = u.modpow(&exponent, p);
        if (&z * &z) % p == p_minus_one {
            break z;
        }
    };

    let mut prev = p.clone();
    let mut cur = z;
    while &cur * &cur > *p {
        let next = &prev % &cur;
        prev = cur;
        cur = next;
    }
    let next = &prev % &cur;
    (cur, next)
}

/// Miller-Rabin primality test with random bases.
fn is_probable_prime(n: &BigUint, rng: &mut impl RngCore) -> bool {
    const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if let Some(small) = n.to_u32() {
        if small < 2 {
            return false;
        }
        if SMALL_PRIMES.contains(&small) {
            return true;
        }
    }
    for &q in &SMALL_PRIMES {
        if (n % q).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> (s as usize);
    let two = BigUint::from(2u32);

    'witness: for _ in 0..30 {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn exact_sqrt(n: &BigUint) -> Option<BigUint> {
    let root = n.sqrt();
    (&root * &root == *n).then_some(root)
}

fn mod8(n: &BigUint) -> u32 {
    (n.iter_u32_digits().next().unwrap_or(0)) % 8
}
