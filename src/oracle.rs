//! The primitivity decision procedure: six fast filters ending in the
//! Berlekamp Q-matrix nullity test and the two cyclotomic order checks,
//! plus the slow `maximal_order` confirmation used only when asked for.

use crate::bigint::{self, BigInt};
use crate::error::PrimpolyError;
use crate::factor::{factor_r_and_count_primitive_polynomials, Factorization, PrimitivityCounts};
use crate::modarith;
use crate::operation_count::OperationCount;
use crate::polynomial::Polynomial;
use crate::polymod::PolyMod;

/// Why a candidate failed, indexed the same way as
/// [`OperationCount::passed_filter`](crate::operation_count::OperationCount).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ConstantNotPrimitiveRoot,
    HasLinearFactor,
    NullityTooHigh,
    OrderRNotInteger,
    ConstantInconsistent,
    OrderMIsInteger,
}

/// Verdict for one candidate polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Primitive,
    NotPrimitive(Rejection),
}

/// Built once per `(p, n)`: caches `r = (p^n-1)/(p-1)` and its distinct
/// prime factors so every candidate polynomial reuses the same
/// factorization instead of refactoring `r` from scratch.
pub struct PrimitivityOracle {
    p: u64,
    n: usize,
    r: BigInt,
    distinct_primes_of_r: Vec<BigInt>,
    /// Which distinct primes of `r` do *not* divide `p-1` — only those
    /// need an order_m check (Fermat's little theorem on the constant
    /// subgroup makes the rest redundant).
    order_m_primes: Vec<BigInt>,
    /// Distinct primes of `p-1`, cached so the constant-term primitive-root
    /// filter doesn't refactor `p-1` for every candidate polynomial.
    distinct_primes_of_p_minus_1: Vec<u64>,
    pub num_primitive_polynomials: BigInt,
}

impl PrimitivityOracle {
    /// One up-front call to the factorizer to determine `r` and its
    /// distinct prime factors, given the factorization of `q = p^n - 1`
    /// (from a Cunningham table or the automatic cascade).
    pub fn new(p: u64, n: usize, q_factorization: Factorization<BigInt>) -> Result<Self, PrimpolyError> {
        let PrimitivityCounts {
            r,
            r_factorization,
            num_primitive_polynomials,
        } = factor_r_and_count_primitive_polynomials(p, n as u64, q_factorization)?;

        let distinct_primes_of_r: Vec<BigInt> = r_factorization.distinct_primes().to_vec();
        let p_minus_1 = BigInt::from_u64(p - 1);
        let order_m_primes = distinct_primes_of_r
            .iter()
            .filter(|qi| !p_minus_1.rem(qi).map(|rem| rem.is_zero()).unwrap_or(false))
            .cloned()
            .collect();
        let distinct_primes_of_p_minus_1 = distinct_primes(p - 1)?;

        Ok(PrimitivityOracle {
            p,
            n,
            r,
            distinct_primes_of_r,
            order_m_primes,
            distinct_primes_of_p_minus_1,
            num_primitive_polynomials,
        })
    }

    pub fn r(&self) -> &BigInt {
        &self.r
    }

    /// Run the six fast filters in order, early-out on the first failure.
    pub fn test(&self, f: &Polynomial, counts: &mut OperationCount) -> Result<Verdict, PrimpolyError> {
        counts.polynomials_tested += 1;

        // Filter 1: constant coefficient is a primitive root of p.
        let c = self.signed_constant_term(f);
        if !modarith::is_primitive_root(c, self.p, &self.distinct_primes_of_p_minus_1)? {
            return Ok(Verdict::NotPrimitive(Rejection::ConstantNotPrimitiveRoot));
        }
        counts.record_filter_pass(0);

        // Filter 2: no linear factors.
        if f.has_linear_factor() {
            return Ok(Verdict::NotPrimitive(Rejection::HasLinearFactor));
        }
        counts.record_filter_pass(1);

        // Filter 3: Q-matrix nullity < 2.
        if self.q_matrix_nullity(f)? >= 2 {
            return Ok(Verdict::NotPrimitive(Rejection::NullityTooHigh));
        }
        counts.record_filter_pass(2);

        // Filter 4: x^r mod (f, p) is an integer a; a = 0 disqualifies.
        let mut pm = PolyMod::new(f.clone())?;
        let x_to_r = pm.power_of_x(&self.r)?;
        if !x_to_r.is_integer() {
            return Ok(Verdict::NotPrimitive(Rejection::OrderRNotInteger));
        }
        let a = x_to_r.constant_term();
        if a == 0 {
            return Ok(Verdict::NotPrimitive(Rejection::OrderRNotInteger));
        }
        counts.record_filter_pass(3);

        // Filter 5: constant-coefficient consistency, (a - (-1)^n f[0]) mod p = 0.
        if (a as i64 - c as i64).rem_euclid(self.p as i64) != 0 {
            return Ok(Verdict::NotPrimitive(Rejection::ConstantInconsistent));
        }
        counts.record_filter_pass(4);

        // Filter 6: for every qi | r with qi not dividing p-1, x^(r/qi) is
        // not an integer mod (f, p).
        for qi in &self.order_m_primes {
            let exponent = self.r.div(qi)?;
            let mut pm = PolyMod::new(f.clone())?;
            let reduced = pm.power_of_x(&exponent)?;
            counts.squarings += 1;
            if reduced.is_integer() {
                return Ok(Verdict::NotPrimitive(Rejection::OrderMIsInteger));
            }
        }
        counts.record_filter_pass(5);

        Ok(Verdict::Primitive)
    }

    /// `(-1)^n * f[0] mod p`: negate the constant term when `n` is odd.
    fn signed_constant_term(&self, f: &Polynomial) -> u64 {
        let f0 = f.coeff(0);
        if self.n % 2 == 0 {
            f0
        } else if f0 == 0 {
            0
        } else {
            self.p - f0
        }
    }

    /// Berlekamp's Q matrix: row 0 is `[1, 0, ..., 0]`; row `k` (`1 <= k <=
    /// n-1`) is the coefficient vector of `x^(pk) mod (f, p)`, built by
    /// repeatedly multiplying the previous row by `x^p mod (f, p)`.
    /// Returns the nullity of `Q - I` via column reduction over GF(p),
    /// early-exiting once nullity reaches 2 (the disqualifying threshold).
    fn q_matrix_nullity(&self, f: &Polynomial) -> Result<usize, PrimpolyError> {
        let n = self.n;
        let p = f.p();
        let mut pm = PolyMod::new(f.clone())?;
        let x_to_p = pm.power_of_x(&BigInt::from_u64(self.p))?;

        let mut rows: Vec<Vec<u64>> = Vec::with_capacity(n);
        let mut row0 = vec![0u64; n];
        row0[0] = 1;
        rows.push(row0);
        if n >= 2 {
            let mut row = (0..n).map(|j| x_to_p.coeff(j)).collect::<Vec<u64>>();
            rows.push(row.clone());
            let mut pm_row = PolyMod::new(f.clone())?;
            for _ in 2..n {
                pm_row.set_to(&Polynomial::from_coeffs(row.clone(), p)?)?;
                pm_row.multiply_assign(&x_to_p)?;
                row = (0..n).map(|j| pm_row.representative().coeff(j)).collect();
                rows.push(row.clone());
            }
        }

        // Q - I: subtract 1 from the diagonal.
        for k in 0..n {
            rows[k][k] = (rows[k][k] + p - 1) % p;
        }

        Ok(nullity_over_gf_p(rows, p))
    }

    /// Slow confirmation: iterate `k = 1, 2, ..., p^n - 1` computing `x^k
    /// mod (f, p)`; if any `k < p^n - 1` yields the constant `1`, `f` is
    /// not primitive. This is used only when the caller explicitly asks
    /// for it (`-c`/`--confirm`).
    pub fn maximal_order(&self, f: &Polynomial) -> Result<bool, PrimpolyError> {
        let order = bigint::power(self.p, self.n as u64)?.checked_sub(&BigInt::one())?;
        let mut pm = PolyMod::new(f.clone())?;
        pm.set_to_x()?;
        let mut k = BigInt::one();
        loop {
            let value = pm.representative();
            let is_one = value.is_integer() && value.constant_term() == 1;
            if k == order {
                return Ok(is_one);
            }
            if is_one {
                return Ok(false);
            }
            pm.times_x()?;
            k = k.add_word(1);
        }
    }
}

/// Distinct primes of `m` (small, always a machine word here: `p-1`).
fn distinct_primes(m: u64) -> Result<Vec<u64>, PrimpolyError> {
    let f = Factorization::<u64>::automatic_cascade(m, None)?;
    Ok(f.distinct_primes().to_vec())
}

/// Column-reduce an `n x n` matrix over `GF(p)` and return the number of
/// rows that produce no pivot (the algebraic nullity).
fn nullity_over_gf_p(mut rows: Vec<Vec<u64>>, p: u64) -> usize {
    let n = rows.len();
    let mut pivotal = vec![false; n];
    let mut nullity = 0;
    for r in 0..n {
        let pivot_col = (0..n).find(|&c| !pivotal[c] && rows[r][c] != 0);
        let Some(c) = pivot_col else {
            nullity += 1;
            if nullity >= 2 {
                return nullity;
            }
            continue;
        };
        let q = rows[r][c];
        let inv_q = modarith::inverse_mod_p(q, p).expect("nonzero entry mod prime p is invertible");
        let scale = (p - inv_q) % p; // -1/q mod p
        for row in rows.iter_mut() {
            row[c] = (row[c] * scale) % p;
        }
        for cprime in 0..n {
            if cprime == c || pivotal[cprime] {
                continue;
            }
            let factor = rows[r][cprime];
            if factor == 0 {
                continue;
            }
            for row_idx in 0..n {
                let add = (factor * rows[row_idx][c]) % p;
                rows[row_idx][cprime] = (rows[row_idx][cprime] + add) % p;
            }
        }
        pivotal[c] = true;
    }
    nullity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q_and_oracle(p: u64, n: usize) -> PrimitivityOracle {
        let q = bigint::power(p, n as u64).unwrap().checked_sub(&BigInt::one()).unwrap();
        let qf = Factorization::<BigInt>::automatic_cascade(q, None).unwrap();
        PrimitivityOracle::new(p, n, qf).unwrap()
    }

    #[test]
    fn x4_plus_x_plus_1_is_primitive_mod_2() {
        let oracle = q_and_oracle(2, 4);
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap();
        let mut counts = OperationCount::new();
        assert_eq!(oracle.test(&f, &mut counts).unwrap(), Verdict::Primitive);
    }

    #[test]
    fn x4_plus_x3_plus_1_is_primitive_mod_2() {
        let oracle = q_and_oracle(2, 4);
        let f = Polynomial::from_coeffs(vec![1, 0, 0, 1, 1], 2).unwrap();
        let mut counts = OperationCount::new();
        assert_eq!(oracle.test(&f, &mut counts).unwrap(), Verdict::Primitive);
    }

    #[test]
    fn x3_plus_3_is_not_primitive_mod_5_due_to_nullity() {
        let oracle = q_and_oracle(5, 3);
        let f = Polynomial::from_coeffs(vec![3, 0, 0, 1], 5).unwrap();
        let mut counts = OperationCount::new();
        assert_eq!(
            oracle.test(&f, &mut counts).unwrap(),
            Verdict::NotPrimitive(Rejection::NullityTooHigh)
        );
    }

    #[test]
    fn x4_plus_x2_plus_2x_plus_3_is_primitive_mod_5() {
        let oracle = q_and_oracle(5, 4);
        let f = Polynomial::from_coeffs(vec![3, 2, 1, 0, 1], 5).unwrap();
        let mut counts = OperationCount::new();
        assert_eq!(oracle.test(&f, &mut counts).unwrap(), Verdict::Primitive);
    }

    #[test]
    fn maximal_order_agrees_with_the_fast_oracle_for_small_cases() {
        for (p, n) in [(2usize, 2usize), (2, 3), (2, 4), (3, 2), (5, 2)] {
            let oracle = q_and_oracle(p as u64, n);
            let mut f = Polynomial::initial_trial_poly(n, p as u64).unwrap();
            loop {
                let mut counts = OperationCount::new();
                let verdict = oracle.test(&f, &mut counts).unwrap();
                let slow = oracle.maximal_order(&f).unwrap();
                assert_eq!(verdict == Verdict::Primitive, slow);
                if verdict == Verdict::Primitive {
                    break;
                }
                if f.next_trial_poly().is_err() {
                    break;
                }
            }
        }
    }
}
