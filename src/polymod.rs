//! `g(x)` reduced modulo `(f(x), p)`: the power-of-x reduction table and the
//! representative arithmetic (`timesX`, `square`, `*=`, `power`) built on it.

use crate::bigint::BigInt;
use crate::error::PrimpolyError;
use crate::polynomial::Polynomial;

/// A polynomial representative `g`, always of degree `< n = deg(f)`, held
/// modulo a fixed monic `f` over `GF(p)`. Owns the power-of-x reduction
/// table built once from `f` and reused for every reduction.
#[derive(Debug, Clone)]
pub struct PolyMod {
    f: Polynomial,
    p: u64,
    n: usize,
    /// `table[i]` is `x^(n+i) mod (f, p)`, for `i` in `0..=n-2`.
    table: Vec<Polynomial>,
    g: Polynomial,
}

impl PolyMod {
    /// Build the power table from `f` (monic, degree `n >= 1`) and start
    /// with the representative zero.
    pub fn new(f: Polynomial) -> Result<Self, PrimpolyError> {
        let n = f.degree();
        let p = f.p();
        let table = Self::build_power_table(&f, n, p)?;
        Ok(PolyMod {
            f,
            p,
            n,
            table,
            g: Polynomial::zero(p),
        })
    }

    pub fn modulus_poly(&self) -> &Polynomial {
        &self.f
    }

    pub fn representative(&self) -> &Polynomial {
        &self.g
    }

    fn build_power_table(f: &Polynomial, n: usize, p: u64) -> Result<Vec<Polynomial>, PrimpolyError> {
        let mut table = Vec::with_capacity(n.saturating_sub(1));
        if n < 2 {
            return Ok(table);
        }
        // t starts as x^(n-1): coefficients 0..=n (slot n reserved for the
        // carry produced by shifting t up by one power of x).
        let mut t = vec![0u64; n + 1];
        t[n - 1] = 1;
        for _ in 0..=(n - 2) {
            // t := x * t
            for j in (1..=n).rev() {
                t[j] = t[j - 1];
            }
            t[0] = 0;
            if t[n] != 0 {
                let c = t[n];
                t[n] = 0;
                for j in 0..n {
                    let fj = f.coeff(j);
                    t[j] = (t[j] + p - (c * fj) % p) % p;
                }
            }
            table.push(Polynomial::from_coeffs(t[0..n].to_vec(), p)?);
        }
        Ok(table)
    }

    /// Fold coefficients at or above degree `n` back down using the power
    /// table, leaving a representative of degree `< n`.
    fn reduce_into_g(&mut self, mut raw: Vec<u64>) -> Result<(), PrimpolyError> {
        for i in self.n..raw.len() {
            let c = raw[i];
            if c == 0 {
                continue;
            }
            raw[i] = 0;
            let row = &self.table[i - self.n];
            for j in 0..self.n {
                raw[j] = (raw[j] + c * row.coeff(j)) % self.p;
            }
        }
        raw.truncate(self.n.max(1));
        self.g = Polynomial::from_coeffs(raw, self.p)?;
        Ok(())
    }

    pub fn set_to_zero(&mut self) -> Result<(), PrimpolyError> {
        self.g = Polynomial::zero(self.p);
        Ok(())
    }

    pub fn set_to_one(&mut self) -> Result<(), PrimpolyError> {
        self.g = Polynomial::from_coeffs(vec![1], self.p)?;
        Ok(())
    }

    pub fn set_to_x(&mut self) -> Result<(), PrimpolyError> {
        let mut coeffs = vec![0u64; self.n.max(2)];
        coeffs[1] = 1;
        coeffs.truncate(self.n.max(1));
        self.g = Polynomial::from_coeffs(coeffs, self.p)?;
        Ok(())
    }

    pub fn set_to(&mut self, value: &Polynomial) -> Result<(), PrimpolyError> {
        let raw = (0..value.degree() + 1).map(|j| value.coeff(j)).collect();
        self.reduce_into_g(raw)
    }

    /// Shift `g` left by one (multiply by `x`) and fold the overflow
    /// coefficient through `table[0]` (`x^n mod f`).
    pub fn times_x(&mut self) -> Result<(), PrimpolyError> {
        let mut raw = vec![0u64; self.n + 1];
        for j in 0..self.n {
            raw[j + 1] = self.g.coeff(j);
        }
        self.reduce_into_g(raw)
    }

    /// `g := g^2 mod (f, p)` via full convolution then table reduction.
    pub fn square(&mut self) -> Result<(), PrimpolyError> {
        let len = (2 * self.n).saturating_sub(1).max(self.n);
        let mut raw = vec![0u64; len];
        for k in 0..raw.len() {
            let mut sum = 0u64;
            for i in 0..=k.min(self.n.saturating_sub(1)) {
                let j = k - i;
                if j < self.n {
                    sum = (sum + self.g.coeff(i) * self.g.coeff(j)) % self.p;
                }
            }
            raw[k] = sum;
        }
        self.reduce_into_g(raw)
    }

    /// `g := g * other mod (f, p)`, `other` already reduced (degree `< n`).
    pub fn multiply_assign(&mut self, other: &Polynomial) -> Result<(), PrimpolyError> {
        let len = (2 * self.n).saturating_sub(1).max(self.n);
        let mut raw = vec![0u64; len];
        for k in 0..raw.len() {
            let mut sum = 0u64;
            for i in 0..=k.min(self.n.saturating_sub(1)) {
                let j = k - i;
                if j < self.n {
                    sum = (sum + self.g.coeff(i) * other.coeff(j)) % self.p;
                }
            }
            raw[k] = sum;
        }
        self.reduce_into_g(raw)
    }

    /// `x^m mod (f, p)`, for the exponent `m` given as a [`BigInt`].
    /// Exponentiation by repeated squaring, scanning `m`'s bits from just
    /// below the leading one down to zero: square at every bit, and also
    /// multiply by `x` when the bit is set.
    pub fn power_of_x(&mut self, m: &BigInt) -> Result<Polynomial, PrimpolyError> {
        if m.is_zero() {
            self.set_to_one()?;
            return Ok(self.g.clone());
        }
        self.set_to_x()?;
        let top_bit = m.ceil_lg()? - 1;
        for bit in (0..top_bit).rev() {
            self.square()?;
            if m.test_bit(bit as usize)? {
                self.times_x()?;
            }
        }
        Ok(self.g.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_degree_stays_below_n() {
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap(); // x^4+x+1
        let mut pm = PolyMod::new(f).unwrap();
        for _ in 0..20 {
            pm.square().unwrap();
            pm.times_x().unwrap();
            assert!(pm.representative().degree() < 4 || pm.representative().is_zero());
        }
    }

    #[test]
    fn x_to_the_p_n_minus_1_is_one_for_a_primitive_polynomial() {
        // x^4 + x + 1 is primitive mod 2; x^15 == 1 mod (f, 2).
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap();
        let mut pm = PolyMod::new(f).unwrap();
        let result = pm.power_of_x(&BigInt::from_u64(15)).unwrap();
        assert!(result.is_integer());
        assert_eq!(result.constant_term(), 1);
    }

    #[test]
    fn x_to_a_smaller_power_is_not_one() {
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap();
        let mut pm = PolyMod::new(f).unwrap();
        let result = pm.power_of_x(&BigInt::from_u64(5)).unwrap();
        assert!(!(result.is_integer() && result.constant_term() == 1));
    }

    #[test]
    fn times_x_matches_squaring_x_twice() {
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap();
        let mut pm = PolyMod::new(f).unwrap();
        pm.set_to_x().unwrap();
        pm.times_x().unwrap();
        let via_times_x = pm.representative().clone();
        pm.set_to_x().unwrap();
        pm.square().unwrap();
        assert_eq!(via_times_x, *pm.representative());
    }
}
