//! Dense polynomials over GF(p): construction, serialization, the monic
//! trial-polynomial enumeration the driver walks, and the handful of
//! arithmetic operators the oracle needs before reduction mod f takes over.

use crate::error::PrimpolyError;

/// `f[0..=n]`, `0 <= f[i] < p`, `f[n] != 0` unless `f` is the zero
/// polynomial (`n = 0`, `f = [0]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeff: Vec<u64>,
    p: u64,
}

impl Polynomial {
    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn degree(&self) -> usize {
        self.coeff.len() - 1
    }

    pub fn coeff(&self, i: usize) -> u64 {
        *self.coeff.get(i).unwrap_or(&0)
    }

    fn trim(coeff: &mut Vec<u64>) {
        while coeff.len() > 1 && *coeff.last().unwrap() == 0 {
            coeff.pop();
        }
    }

    /// Build from a coefficient vector (`coeff[0]` is the constant term),
    /// reducing every entry mod `p`. Rejects `p <= 0`.
    pub fn from_coeffs(mut coeff: Vec<u64>, p: u64) -> Result<Self, PrimpolyError> {
        if p == 0 {
            return Err(PrimpolyError::UserInput(
                "modulus must be positive".to_string(),
            ));
        }
        if coeff.is_empty() {
            coeff.push(0);
        }
        for c in &mut coeff {
            *c %= p;
        }
        Self::trim(&mut coeff);
        Ok(Polynomial { coeff, p })
    }

    pub fn zero(p: u64) -> Self {
        Polynomial { coeff: vec![0], p }
    }

    pub fn is_zero(&self) -> bool {
        self.coeff.len() == 1 && self.coeff[0] == 0
    }

    /// `x^n - 1`: the starting point of the trial-polynomial enumeration.
    pub fn initial_trial_poly(n: usize, p: u64) -> Result<Self, PrimpolyError> {
        let mut coeff = vec![0u64; n + 1];
        coeff[n] = 1;
        coeff[0] = p - 1;
        Polynomial::from_coeffs(coeff, p)
    }

    /// Treat `[f[0]..f[n-1]]` as a base-`p` numeral, least-significant
    /// first, and add one, carrying up to but never past index `n-1` — the
    /// leading coefficient stays 1, so the polynomial remains monic. This
    /// enumerates every monic degree-`n` polynomial mod `p` exactly once.
    pub fn next_trial_poly(&mut self) -> Result<(), PrimpolyError> {
        let n = self.degree();
        let mut i = 0;
        loop {
            if i >= n {
                return Err(PrimpolyError::InternalRange(
                    "trial polynomial enumeration exhausted all p^n candidates".to_string(),
                ));
            }
            self.coeff[i] += 1;
            if self.coeff[i] < self.p {
                break;
            }
            self.coeff[i] = 0;
            i += 1;
        }
        Ok(())
    }

    /// `self += other`, extending with zeros up to the larger degree.
    pub fn add_assign(&mut self, other: &Polynomial) {
        let n = self.coeff.len().max(other.coeff.len());
        self.coeff.resize(n, 0);
        for i in 0..other.coeff.len() {
            self.coeff[i] = (self.coeff[i] + other.coeff[i]) % self.p;
        }
        Self::trim(&mut self.coeff);
    }

    /// `self *= k` (scalar), coefficient-wise mod p.
    pub fn scalar_mul_assign(&mut self, k: u64) {
        let k = k % self.p;
        for c in &mut self.coeff {
            *c = (*c * k) % self.p;
        }
        Self::trim(&mut self.coeff);
    }

    /// Evaluate at integer `x` treating the polynomial as monic: an
    /// implicit leading coefficient of 1 is prepended regardless of
    /// `f[n]`. Horner's rule from degree `n-1` down to 0. Used only for
    /// small `x` in `[0, p-1]`.
    pub fn eval_monic(&self, x: u64) -> u64 {
        let n = self.degree();
        let x = x % self.p;
        let mut result = 1u64; // the implicit leading term x^n's coefficient
        for i in (0..n).rev() {
            result = (result * x + self.coeff[i]) % self.p;
        }
        result
    }

    /// True if `f` has a root in `GF(p)`, evaluated monic (see [`eval_monic`](Self::eval_monic)).
    pub fn has_linear_factor(&self) -> bool {
        (0..self.p).any(|x| self.eval_monic(x) == 0)
    }

    /// True iff every coefficient of degree >= 1 is zero.
    pub fn is_integer(&self) -> bool {
        self.coeff[1..].iter().all(|&c| c == 0)
    }

    /// The constant term, valid when [`is_integer`](Self::is_integer) holds.
    pub fn constant_term(&self) -> u64 {
        self.coeff[0]
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.degree();
        let mut terms = Vec::new();
        for k in (0..=n).rev() {
            let c = self.coeff[k];
            if k > 0 && c == 0 {
                continue;
            }
            let term = if k == 0 {
                format!("{}", c)
            } else {
                let coeff_part = if c == 1 { String::new() } else { format!("{} ", c) };
                let power_part = if k == 1 {
                    "x".to_string()
                } else {
                    format!("x ^ {}", k)
                };
                format!("{}{}", coeff_part, power_part)
            };
            terms.push(term);
        }
        write!(f, "{}, {}", terms.join(" + "), self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_trial_poly_is_x_to_the_n_minus_one() {
        let f = Polynomial::initial_trial_poly(4, 2).unwrap();
        assert_eq!(f.to_string(), "x ^ 4 + 1, 2");
    }

    #[test]
    fn next_trial_poly_enumerates_every_monic_polynomial_exactly_once() {
        let mut f = Polynomial::initial_trial_poly(2, 3).unwrap();
        let mut seen = std::collections::HashSet::new();
        seen.insert(f.coeff.clone());
        for _ in 0..(3u64.pow(2) - 1) {
            f.next_trial_poly().unwrap();
            assert!(seen.insert(f.coeff.clone()), "duplicate candidate produced");
        }
        assert!(f.next_trial_poly().is_err());
    }

    #[test]
    fn serialization_matches_canonical_form() {
        let f = Polynomial::from_coeffs(vec![1, 1, 0, 0, 1], 2).unwrap();
        assert_eq!(f.to_string(), "x ^ 4 + x + 1, 2");
    }

    #[test]
    fn has_linear_factor_detects_a_root() {
        // x^3 + 3 = (x+2)(x^2+3x+4) mod 5 has a root at x = 3.
        let f = Polynomial::from_coeffs(vec![3, 0, 0, 1], 5).unwrap();
        assert!(f.has_linear_factor());
    }

    #[test]
    fn is_integer_detects_constant_polynomials() {
        let f = Polynomial::from_coeffs(vec![3], 5).unwrap();
        assert!(f.is_integer());
        let g = Polynomial::from_coeffs(vec![3, 1], 5).unwrap();
        assert!(!g.is_integer());
    }

    #[test]
    fn add_assign_extends_and_trims() {
        let mut f = Polynomial::from_coeffs(vec![1], 5).unwrap();
        let g = Polynomial::from_coeffs(vec![0, 0, 4], 5).unwrap();
        f.add_assign(&g);
        assert_eq!(f.to_string(), "4 x ^ 2 + 1, 5");
    }
}
