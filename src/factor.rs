//! Prime factorization: Cunningham-table lookup, Miller–Rabin, Pollard rho
//! with Brent's cycle detection, and trial division as a guaranteed fallback.
//!
//! `Factorization<T>` is generic over the integer representation because the
//! kernel needs two of them: `u64` for small residuals (factoring `p-1`, or
//! `p^n-1` itself when it fits a machine word) and [`crate::bigint::BigInt`]
//! for the large residuals `p^n-1` and `r` become once `n` grows past a few
//! digits. Both share one algorithmic implementation via the [`FactorInt`]
//! trait below.

use crate::bigint::BigInt;
use crate::error::PrimpolyError;
use crate::modarith;
use crate::operation_count::OperationCount;
use std::fmt;

/// The arithmetic surface `Factorizer` needs from its integer type. Every
/// method here either cannot fail (`add`, `mul`, `gcd`) or fails only on a
/// genuine precondition violation (division/subtraction underflow).
pub trait FactorInt: Clone + PartialEq + PartialOrd + fmt::Display {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_u64(v: u64) -> Self;
    fn to_u64(&self) -> Option<u64>;
    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;
    fn is_even(&self) -> bool;
    fn checked_sub(&self, other: &Self) -> Result<Self, PrimpolyError>;
    fn add(&self, other: &Self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn div_rem(&self, other: &Self) -> Result<(Self, Self), PrimpolyError>;
    fn gcd(&self, other: &Self) -> Self;
    /// `(self*self) mod modulus`.
    fn square_mod(&self, modulus: &Self) -> Result<Self, PrimpolyError>;
    /// `(self + c) mod modulus` for a small machine-word constant `c`.
    fn add_const_mod(&self, c: u64, modulus: &Self) -> Result<Self, PrimpolyError>;
    /// Fourteen-witness Miller-Rabin with the crate's reseeded deterministic PRNG.
    fn is_almost_surely_prime(&self) -> Result<bool, PrimpolyError>;
}

impl FactorInt for u64 {
    fn zero() -> Self {
        0
    }
    fn one() -> Self {
        1
    }
    fn from_u64(v: u64) -> Self {
        v
    }
    fn to_u64(&self) -> Option<u64> {
        Some(*self)
    }
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn is_one(&self) -> bool {
        *self == 1
    }
    fn is_even(&self) -> bool {
        *self % 2 == 0
    }
    fn checked_sub(&self, other: &Self) -> Result<Self, PrimpolyError> {
        u64::checked_sub(*self, *other)
            .ok_or_else(|| PrimpolyError::Underflow(format!("{} - {} underflows", self, other)))
    }
    fn add(&self, other: &Self) -> Self {
        self + other
    }
    fn mul(&self, other: &Self) -> Self {
        self * other
    }
    fn div_rem(&self, other: &Self) -> Result<(Self, Self), PrimpolyError> {
        if *other == 0 {
            return Err(PrimpolyError::ZeroDivide("division by zero".to_string()));
        }
        Ok((self / other, self % other))
    }
    fn gcd(&self, other: &Self) -> Self {
        modarith::gcd(*self, *other)
    }
    fn square_mod(&self, modulus: &Self) -> Result<Self, PrimpolyError> {
        modarith::multiply_mod(*self, *self, *modulus)
    }
    fn add_const_mod(&self, c: u64, modulus: &Self) -> Result<Self, PrimpolyError> {
        modarith::add_mod(*self, c, *modulus)
    }
    fn is_almost_surely_prime(&self) -> Result<bool, PrimpolyError> {
        is_almost_surely_prime(*self)
    }
}

impl FactorInt for BigInt {
    fn zero() -> Self {
        BigInt::zero()
    }
    fn one() -> Self {
        BigInt::one()
    }
    fn from_u64(v: u64) -> Self {
        BigInt::from_u64(v)
    }
    fn to_u64(&self) -> Option<u64> {
        BigInt::to_u64(self)
    }
    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
    fn is_one(&self) -> bool {
        self == &BigInt::one()
    }
    fn is_even(&self) -> bool {
        BigInt::is_even(self)
    }
    fn checked_sub(&self, other: &Self) -> Result<Self, PrimpolyError> {
        BigInt::checked_sub(self, other)
    }
    fn add(&self, other: &Self) -> Self {
        BigInt::add(self, other)
    }
    fn mul(&self, other: &Self) -> Self {
        BigInt::mul(self, other)
    }
    fn div_rem(&self, other: &Self) -> Result<(Self, Self), PrimpolyError> {
        BigInt::div_rem(self, other)
    }
    fn gcd(&self, other: &Self) -> Self {
        BigInt::gcd(self, other)
    }
    fn square_mod(&self, modulus: &Self) -> Result<Self, PrimpolyError> {
        self.mul(self).rem(modulus)
    }
    fn add_const_mod(&self, c: u64, modulus: &Self) -> Result<Self, PrimpolyError> {
        self.add(&BigInt::from_u64(c)).rem(modulus)
    }
    fn is_almost_surely_prime(&self) -> Result<bool, PrimpolyError> {
        bigint_is_almost_surely_prime(self)
    }
}

fn abs_diff<T: FactorInt>(a: &T, b: &T) -> T {
    match a.checked_sub(b) {
        Ok(d) => d,
        Err(_) => b.checked_sub(a).expect("a < b so b - a must succeed"),
    }
}

/// A deterministic linear-congruential generator, reseeded with the same
/// constant on every `isAlmostSurelyPrime` call so that Miller–Rabin
/// witness selection — and hence every downstream primality result — is
/// identical across runs and platforms.
struct Lcg {
    state: u64,
}

const PRIMALITY_SEED: u64 = 314159;

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        // Same multiplier/increment as the PCG reference generator's LCG
        // step; only the low-quality-but-deterministic stream matters here.
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

/// Single-witness Miller–Rabin. `n` is the candidate, `x` the witness
/// (clamped into `[2, n-2]`). Hard-codes the tiny boundary cases where the
/// general decomposition has no valid witness range.
pub fn is_probably_prime(n: u64, x: u64) -> Result<bool, PrimpolyError> {
    match n {
        0 | 1 => return Ok(false),
        2 | 3 => return Ok(true),
        _ => {}
    }
    if n % 2 == 0 {
        return Ok(false);
    }
    let mut q = n - 1;
    let mut k = 0u32;
    while q % 2 == 0 {
        q /= 2;
        k += 1;
    }
    let witness = x.clamp(2, n - 2);
    let mut y = modarith::power_mod(witness, q, n)?;
    if y == 1 {
        return Ok(true);
    }
    for j in 0..k {
        if y == n - 1 {
            return Ok(true);
        }
        if j + 1 == k {
            break;
        }
        y = modarith::multiply_mod(y, y, n)?;
        if y == 1 {
            return Ok(false);
        }
    }
    Ok(y == n - 1)
}

/// Fourteen-witness Miller–Rabin with a reseeded, deterministic PRNG.
pub fn is_almost_surely_prime(n: u64) -> Result<bool, PrimpolyError> {
    let mut rng = Lcg::new(PRIMALITY_SEED);
    for _ in 0..14 {
        let witness = if n <= 4 {
            3
        } else {
            3 + rng.next_u64() % (n - 3)
        };
        if !is_probably_prime(n, witness)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// One (prime, multiplicity) pair, multiplicity at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeFactor<T> {
    pub prime: T,
    pub multiplicity: u64,
}

/// A certified factorization of a non-negative integer of type `T`.
#[derive(Debug, Clone)]
pub struct Factorization<T> {
    n: T,
    factors: Vec<PrimeFactor<T>>,
    distinct_primes: Vec<T>,
    pub counts: OperationCount,
}

impl<T: FactorInt> Factorization<T> {
    pub fn value(&self) -> &T {
        &self.n
    }

    pub fn factors(&self) -> &[PrimeFactor<T>] {
        &self.factors
    }

    pub fn distinct_primes(&self) -> &[T] {
        &self.distinct_primes
    }

    /// Sort by ascending prime, merge duplicate primes, drop primes = 1 or
    /// multiplicity 0, certify every surviving prime, and verify the
    /// product reconstructs `n`.
    fn finish(n: T, mut raw: Vec<PrimeFactor<T>>, mut counts: OperationCount) -> Result<Self, PrimpolyError> {
        raw.sort_by(|a, b| a.prime.partial_cmp(&b.prime).unwrap());
        let mut merged: Vec<PrimeFactor<T>> = Vec::new();
        for pf in raw {
            if pf.prime.is_one() || pf.multiplicity == 0 {
                continue;
            }
            if let Some(last) = merged.last_mut() {
                if last.prime == pf.prime {
                    last.multiplicity += pf.multiplicity;
                    continue;
                }
            }
            merged.push(pf);
        }

        for pf in &merged {
            let certainly_prime = pf.prime.is_almost_surely_prime()?;
            counts.primality_tests += 1;
            if !certainly_prime {
                return Err(PrimpolyError::Factor(format!(
                    "{} is not prime but was reported as a factor",
                    pf.prime
                )));
            }
        }

        let mut product = T::one();
        for pf in &merged {
            for _ in 0..pf.multiplicity {
                product = product.mul(&pf.prime);
            }
        }
        if product != n {
            return Err(PrimpolyError::Factor(format!(
                "factorization product {} does not equal {}",
                product, n
            )));
        }

        let distinct_primes = merged.iter().map(|pf| pf.prime.clone()).collect();
        Ok(Factorization {
            n,
            factors: merged,
            distinct_primes,
            counts,
        })
    }

    /// Strip powers of 2, then of 3, then walk `d = 5, 7, 11, 13, ...`
    /// (every integer coprime to 2 and 3) until `n` is fully factored or
    /// what remains is itself prime.
    pub fn by_trial_division(n: T) -> Result<Self, PrimpolyError> {
        let mut counts = OperationCount::new();
        let mut residual = n.clone();
        let mut factors = Vec::new();

        for small_prime in [2u64, 3] {
            let divisor = T::from_u64(small_prime);
            let mut mult = 0u64;
            loop {
                counts.trial_divisions += 1;
                let (q, r) = residual.div_rem(&divisor)?;
                if !r.is_zero() {
                    break;
                }
                residual = q;
                mult += 1;
            }
            if mult > 0 {
                factors.push(PrimeFactor {
                    prime: divisor,
                    multiplicity: mult,
                });
            }
        }

        let mut d: u64 = 5;
        let mut step_is_two = true;
        loop {
            if residual.is_one() {
                break;
            }
            let divisor = T::from_u64(d);
            if divisor.mul(&divisor) > residual {
                // what remains is prime
                factors.push(PrimeFactor {
                    prime: residual.clone(),
                    multiplicity: 1,
                });
                residual = T::one();
                break;
            }
            counts.trial_divisions += 1;
            let (q, r) = residual.div_rem(&divisor)?;
            if r.is_zero() {
                let mut mult = 1u64;
                residual = q;
                loop {
                    counts.trial_divisions += 1;
                    let (q2, r2) = residual.div_rem(&divisor)?;
                    if !r2.is_zero() {
                        break;
                    }
                    residual = q2;
                    mult += 1;
                }
                factors.push(PrimeFactor {
                    prime: divisor,
                    multiplicity: mult,
                });
            } else {
                d += if step_is_two { 2 } else { 4 };
                step_is_two = !step_is_two;
            }
        }

        Self::finish(n, factors, counts)
    }

    /// Brent's variant of Pollard rho with constant `c`. Returns `Ok(None)`
    /// if the run fails to make progress (caller should restart with a
    /// different `c` or fall back to trial division), `Ok(Some(factors))`
    /// on success.
    fn pollard_rho(n: &T, c: u64, counts: &mut OperationCount) -> Result<Option<Vec<PrimeFactor<T>>>, PrimpolyError> {
        if n.is_one() || n.is_zero() {
            return Ok(Some(Vec::new()));
        }
        let mut residual = n.clone();
        let mut factors: Vec<PrimeFactor<T>> = Vec::new();

        let mut x = T::from_u64(5);
        let mut x_tick = T::from_u64(2);
        let mut k: u64 = 1;
        let mut l: u64 = 1;

        while !residual.is_one() {
            if residual.is_almost_surely_prime()? {
                merge_factor(&mut factors, residual.clone());
                break;
            }

            let diff = abs_diff(&x, &x_tick);
            let g = diff.gcd(&residual);
            counts.gcds += 1;
            if g.is_one() {
                if k == 0 {
                    x_tick = x.clone();
                    l *= 2;
                    k = l;
                }
                k -= 1;
                x = x.square_mod(&residual)?.add_const_mod(c, &residual)?;
                continue;
            }
            if g == residual {
                return Ok(None); // cycle collapsed without splitting: restart
            }
            // g is a non-trivial divisor of residual.
            if !g.is_almost_surely_prime()? {
                return Ok(None); // composite factor found: restart
            }
            let mut mult = 0u64;
            let mut r = residual.clone();
            loop {
                let (q, rem) = r.div_rem(&g)?;
                if !rem.is_zero() {
                    break;
                }
                r = q;
                mult += 1;
            }
            merge_factor_with(&mut factors, g.clone(), mult);
            residual = r;
            // x and x' carry forward into the reduced residual's ring.
            x = x.div_rem(&residual)?.1;
            x_tick = x_tick.div_rem(&residual)?.1;
        }
        Ok(Some(factors))
    }

    /// Validate externally parsed `(prime, multiplicity)` pairs (from a
    /// Cunningham factor table) the same way every other construction path
    /// does: merge, certify, and verify the product.
    pub fn from_parsed(n: T, factors: Vec<PrimeFactor<T>>) -> Result<Self, PrimpolyError> {
        Self::finish(n, factors, OperationCount::new())
    }

    /// Table lookup, then Pollard rho (restarted once on failure with a
    /// fresh constant), then trial division as a guaranteed fallback.
    pub fn automatic_cascade(n: T, table: Option<Factorization<T>>) -> Result<Self, PrimpolyError> {
        if let Some(from_table) = table {
            return Ok(from_table);
        }

        let mut counts = OperationCount::new();
        for c in [2u64, 5] {
            if let Some(factors) = Self::pollard_rho(&n, c, &mut counts)? {
                return Self::finish(n, factors, counts);
            }
        }
        Self::by_trial_division(n)
    }
}

fn merge_factor<T: FactorInt>(factors: &mut Vec<PrimeFactor<T>>, prime: T) {
    merge_factor_with(factors, prime, 1)
}

fn merge_factor_with<T: FactorInt>(factors: &mut Vec<PrimeFactor<T>>, prime: T, mult: u64) {
    if let Some(existing) = factors.iter_mut().find(|pf| pf.prime == prime) {
        existing.multiplicity += mult;
    } else {
        factors.push(PrimeFactor {
            prime,
            multiplicity: mult,
        });
    }
}

fn bigint_pow_mod(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> Result<BigInt, PrimpolyError> {
    if exp.is_zero() {
        return BigInt::one().rem(modulus);
    }
    let top_bit = exp.ceil_lg()? - 1;
    let mut result = base.rem(modulus)?;
    for bit in (0..top_bit).rev() {
        result = result.mul(&result).rem(modulus)?;
        if exp.test_bit(bit as usize)? {
            result = result.mul(base).rem(modulus)?;
        }
    }
    Ok(result)
}

/// Single-witness Miller-Rabin over arbitrary-precision `n`, for residuals
/// too large to fit a machine word.
fn bigint_is_probably_prime(n: &BigInt, x: &BigInt) -> Result<bool, PrimpolyError> {
    let two = BigInt::from_u64(2);
    let three = BigInt::from_u64(3);
    if n.is_zero() || n == &BigInt::one() {
        return Ok(false);
    }
    if n == &two || n == &three {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }
    let n_minus_1 = n.checked_sub(&BigInt::one())?;
    let mut q = n_minus_1.clone();
    let mut k = 0u32;
    while q.is_even() {
        q = q.div_rem_word(2)?.0;
        k += 1;
    }
    let n_minus_2 = n.checked_sub(&two)?;
    let witness = if x < &two {
        two.clone()
    } else if x > &n_minus_2 {
        n_minus_2.clone()
    } else {
        x.clone()
    };
    let mut y = bigint_pow_mod(&witness, &q, n)?;
    if y == BigInt::one() {
        return Ok(true);
    }
    for j in 0..k {
        if y == n_minus_1 {
            return Ok(true);
        }
        if j + 1 == k {
            break;
        }
        y = y.mul(&y).rem(n)?;
        if y == BigInt::one() {
            return Ok(false);
        }
    }
    Ok(y == n_minus_1)
}

/// Fourteen-witness Miller-Rabin over arbitrary-precision `n`, falling back
/// to the word-level routine whenever `n` happens to fit a `u64`.
fn bigint_is_almost_surely_prime(n: &BigInt) -> Result<bool, PrimpolyError> {
    if let Some(word) = n.to_u64() {
        return is_almost_surely_prime(word);
    }
    let mut rng = Lcg::new(PRIMALITY_SEED);
    let range = n.checked_sub(&BigInt::from_u64(3))?;
    for _ in 0..14 {
        let raw = BigInt::from_u64(rng.next_u64());
        let witness = BigInt::from_u64(3).add(&raw.rem(&range)?);
        if !bigint_is_probably_prime(n, &witness)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The number of primitive polynomials of degree `n` over GF(p), and the
/// factorization of `r = (p^n - 1)/(p - 1)` that the oracle needs.
pub struct PrimitivityCounts {
    pub r: BigInt,
    pub r_factorization: Factorization<BigInt>,
    pub num_primitive_polynomials: BigInt,
}

/// `P = p^n`, `q = P - 1`; factor `q`; derive `r = q/(p-1)` and its
/// factorization by subtracting the (always-dividing) factorization of
/// `p-1` from that of `q`, walking both sorted factor lists in tandem.
/// `Phi(q)/n = (q * prod(qi-1)) / (n * prod(qi))` gives the count of
/// primitive polynomials.
pub fn factor_r_and_count_primitive_polynomials(
    p: u64,
    n: u64,
    q_factorization: Factorization<BigInt>,
) -> Result<PrimitivityCounts, PrimpolyError> {
    let q = q_factorization.value().clone();

    let p_minus_1 = Factorization::<u64>::automatic_cascade(p - 1, None)?;

    let mut r_factors = Vec::new();
    let mut qi = q_factorization.factors().iter().peekable();
    let mut pi = p_minus_1.factors().iter().peekable();
    while let Some(q_factor) = qi.next() {
        let mut mult = q_factor.multiplicity;
        if let Some(p_factor) = pi.peek() {
            if BigInt::from_u64(p_factor.prime) == q_factor.prime {
                mult -= p_factor.multiplicity;
                pi.next();
            }
        }
        if mult > 0 {
            r_factors.push(PrimeFactor {
                prime: q_factor.prime.clone(),
                multiplicity: mult,
            });
        }
    }
    debug_assert!(pi.next().is_none(), "p-1's factors must all divide q");

    let r = q.div(&BigInt::from_u64(p - 1))?;
    let r_factorization = Factorization::finish(r.clone(), r_factors, OperationCount::new())?;

    let mut numerator = q.clone();
    let mut denom_product = BigInt::from_u64(n);
    for qi in q_factorization.distinct_primes() {
        numerator = numerator.mul(&qi.checked_sub(&BigInt::one())?);
        denom_product = denom_product.mul(qi);
    }
    let num_primitive_polynomials = numerator.div(&denom_product)?;

    Ok(PrimitivityCounts {
        r,
        r_factorization,
        num_primitive_polynomials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miller_rabin_boundary_composites() {
        for n in [0u64, 1, 4, 6, 8, 9, 10, 49] {
            assert!(!is_almost_surely_prime(n).unwrap(), "{} should be composite", n);
        }
    }

    #[test]
    fn miller_rabin_boundary_primes() {
        for n in [2u64, 3, 5, 7, 11, 13, 97, 104729] {
            assert!(is_almost_surely_prime(n).unwrap(), "{} should be prime", n);
        }
    }

    #[test]
    fn trial_division_of_25852() {
        let f = Factorization::<u64>::by_trial_division(25852).unwrap();
        let rendered: Vec<(u64, u64)> = f.factors().iter().map(|pf| (pf.prime, pf.multiplicity)).collect();
        assert_eq!(rendered, vec![(2, 2), (23, 1), (281, 1)]);
    }

    #[test]
    fn automatic_cascade_factors_3_pow_20_minus_1() {
        let n = 3u64.pow(20) - 1;
        let f = Factorization::<u64>::automatic_cascade(n, None).unwrap();
        let rendered: Vec<(u64, u64)> = f.factors().iter().map(|pf| (pf.prime, pf.multiplicity)).collect();
        assert_eq!(rendered, vec![(2, 4), (5, 2), (11, 2), (61, 1), (1181, 1)]);
    }

    #[test]
    fn factorization_product_matches_input() {
        let f = Factorization::<u64>::automatic_cascade(360, None).unwrap();
        let mut product = 1u64;
        for pf in f.factors() {
            product *= pf.prime.pow(pf.multiplicity as u32);
        }
        assert_eq!(product, 360);
    }

    #[test]
    fn rejects_a_reported_factor_that_is_not_prime() {
        let bogus = vec![PrimeFactor { prime: 4u64, multiplicity: 1 }];
        assert!(Factorization::finish(4, bogus, OperationCount::new()).is_err());
    }
}
