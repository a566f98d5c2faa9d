//! Arbitrary-precision non-negative integer arithmetic.
//!
//! Digits are base-`b` positional, least-significant first, where
//! `b = 2^NUM_BITS_PER_DIGIT` is chosen so that `b*b` still fits in a `u64`.
//! Canonical form is either a single digit `0`, or a sequence whose
//! most-significant digit is non-zero; every arithmetic operator restores
//! canonical form before returning.
//!
//! The long-division routine implements Knuth's Algorithm D (TAOCP Vol. 2,
//! 3rd ed., §4.3.1).

use crate::error::PrimpolyError;

/// Bits per digit: half a 64-bit word, minus one, so that `BASE * BASE`
/// fits in a `u64` with room to spare for carries.
pub const NUM_BITS_PER_DIGIT: u32 = 31;

/// `2^NUM_BITS_PER_DIGIT`. Every digit satisfies `0 <= digit < BASE`.
pub const BASE: u64 = 1 << NUM_BITS_PER_DIGIT;

/// A non-negative arbitrary-precision integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    /// Least-significant digit first. Canonical: no trailing (high) zero
    /// digits unless the value is zero, in which case `digit == [0]`.
    digit: Vec<u64>,
}

impl BigInt {
    /// The base of the digit representation. Exposed for callers (the
    /// polynomial parser and the CLI) that validate input range against it.
    pub fn base() -> u64 {
        BASE
    }

    fn trim(mut digit: Vec<u64>) -> Vec<u64> {
        while digit.len() > 1 && *digit.last().unwrap() == 0 {
            digit.pop();
        }
        if digit.is_empty() {
            digit.push(0);
        }
        digit
    }

    /// The zero value.
    pub fn zero() -> Self {
        BigInt { digit: vec![0] }
    }

    /// The value one.
    pub fn one() -> Self {
        BigInt::from_u64(1)
    }

    pub fn is_zero(&self) -> bool {
        self.digit.len() == 1 && self.digit[0] == 0
    }

    /// Parity of the value. `BASE` is even, so every digit above the
    /// least-significant one contributes an even amount; only `digit[0]`'s
    /// own parity matters.
    pub fn is_even(&self) -> bool {
        self.digit[0] % 2 == 0
    }

    /// Construct from a machine word by repeatedly extracting digits mod `BASE`.
    pub fn from_u64(mut d: u64) -> Self {
        if d == 0 {
            return BigInt::zero();
        }
        let mut digit = Vec::new();
        while d > 0 {
            digit.push(d % BASE);
            d /= BASE;
        }
        BigInt { digit }
    }

    /// Construct from a decimal numeral via Horner's rule: `w := 10*w + digit`.
    /// Rejects any non-decimal character.
    pub fn from_decimal_str(s: &str) -> Result<Self, PrimpolyError> {
        if s.is_empty() {
            return Err(PrimpolyError::UserInput(
                "empty string is not a valid decimal number".to_string(),
            ));
        }
        let mut w = BigInt::zero();
        for c in s.chars() {
            let d = c.to_digit(10).ok_or_else(|| {
                PrimpolyError::UserInput(format!(
                    "'{}' is not a decimal digit in numeral '{}'",
                    c, s
                ))
            })?;
            w = w.mul_word(10).add_word(d as u64);
        }
        Ok(w)
    }

    /// Convert to decimal via repeated extraction of `u mod 10`, then reverse.
    pub fn to_decimal_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        if self.digit.len() == 1 && self.digit[0] == 1 {
            return "1".to_string();
        }
        let mut u = self.clone();
        let mut digits_rev = Vec::new();
        while !u.is_zero() {
            let (q, r) = u.div_rem_word(10).expect("10 != 0");
            digits_rev.push(std::char::from_digit(r as u32, 10).unwrap());
            u = q;
        }
        digits_rev.iter().rev().collect()
    }

    pub fn digit_count(&self) -> usize {
        self.digit.len()
    }

    #[cfg(test)]
    pub(crate) fn digit_at(&self, i: usize) -> u64 {
        self.digit[i]
    }

    fn cmp_digits(&self, other: &BigInt) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        if self.digit.len() != other.digit.len() {
            return self.digit.len().cmp(&other.digit.len());
        }
        for i in (0..self.digit.len()).rev() {
            match self.digit[i].cmp(&other.digit[i]) {
                Ordering::Equal => continue,
                other_ord => return other_ord,
            }
        }
        Ordering::Equal
    }

    /// Positional add with carry propagation.
    pub fn add(&self, other: &BigInt) -> BigInt {
        let n = self.digit.len().max(other.digit.len());
        let mut result = Vec::with_capacity(n + 1);
        let mut carry = 0u64;
        for i in 0..n {
            let a = *self.digit.get(i).unwrap_or(&0);
            let b = *other.digit.get(i).unwrap_or(&0);
            let sum = a + b + carry;
            result.push(sum % BASE);
            carry = sum / BASE;
        }
        if carry != 0 {
            result.push(carry);
        }
        BigInt {
            digit: Self::trim(result),
        }
    }

    /// Add a single digit-range word (0 <= d < BASE).
    pub fn add_word(&self, d: u64) -> BigInt {
        self.add(&BigInt::from_u64(d))
    }

    /// Positional subtract with borrow. Fails with `Underflow` if `other > self`.
    pub fn checked_sub(&self, other: &BigInt) -> Result<BigInt, PrimpolyError> {
        if self.cmp_digits(other) == std::cmp::Ordering::Less {
            return Err(PrimpolyError::Underflow(format!(
                "{} - {} underflows (minuend smaller than subtrahend)",
                self.to_decimal_string(),
                other.to_decimal_string()
            )));
        }
        let mut result = Vec::with_capacity(self.digit.len());
        let mut borrow: i64 = 0;
        for i in 0..self.digit.len() {
            let a = self.digit[i] as i64;
            let b = *other.digit.get(i).unwrap_or(&0) as i64;
            let mut t = a - b + borrow;
            if t >= 0 {
                borrow = 0;
            } else {
                t += BASE as i64;
                borrow = -1;
            }
            result.push(t as u64);
        }
        Ok(BigInt {
            digit: Self::trim(result),
        })
    }

    /// Schoolbook O(mn) multiply: `w[i+j] += u[i]*v[j] + carry`.
    pub fn mul(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }
        let m = self.digit.len();
        let n = other.digit.len();
        let mut w = vec![0u64; m + n];
        for i in 0..m {
            if self.digit[i] == 0 {
                continue;
            }
            let mut carry = 0u64;
            for j in 0..n {
                let sum = w[i + j] + self.digit[i] * other.digit[j] + carry;
                w[i + j] = sum % BASE;
                carry = sum / BASE;
            }
            let mut k = i + n;
            while carry > 0 {
                let sum = w[k] + carry;
                w[k] = sum % BASE;
                carry = sum / BASE;
                k += 1;
            }
        }
        BigInt {
            digit: Self::trim(w),
        }
    }

    /// Multiply by a single digit-range word. Fast path when `d == BASE`
    /// (shift left by one digit, injecting a zero) else a linear pass.
    pub fn mul_word(&self, d: u64) -> BigInt {
        if d == 0 || self.is_zero() {
            return BigInt::zero();
        }
        if d == BASE {
            let mut digit = Vec::with_capacity(self.digit.len() + 1);
            digit.push(0);
            digit.extend_from_slice(&self.digit);
            return BigInt {
                digit: Self::trim(digit),
            };
        }
        let mut result = Vec::with_capacity(self.digit.len() + 1);
        let mut carry = 0u64;
        for &u in &self.digit {
            let prod = u * d + carry;
            result.push(prod % BASE);
            carry = prod / BASE;
        }
        while carry > 0 {
            result.push(carry % BASE);
            carry /= BASE;
        }
        BigInt {
            digit: Self::trim(result),
        }
    }

    /// Divide by a single digit-range word: linear-time, returns `(quotient, remainder)`.
    pub fn div_rem_word(&self, d: u64) -> Result<(BigInt, u64), PrimpolyError> {
        if d == 0 {
            return Err(PrimpolyError::ZeroDivide(
                "division by zero word".to_string(),
            ));
        }
        let mut quotient = vec![0u64; self.digit.len()];
        let mut rem = 0u64;
        for i in (0..self.digit.len()).rev() {
            let cur = rem * BASE + self.digit[i];
            quotient[i] = cur / d;
            rem = cur % d;
        }
        Ok((
            BigInt {
                digit: Self::trim(quotient),
            },
            rem,
        ))
    }

    /// Full multi-precision division via Knuth's Algorithm D. Returns
    /// `(quotient, remainder)`. Fails with `ZeroDivide` if `other` is zero.
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt), PrimpolyError> {
        if other.is_zero() {
            return Err(PrimpolyError::ZeroDivide(
                "division by zero BigInt".to_string(),
            ));
        }
        if other.digit.len() == 1 {
            let (q, r) = self.div_rem_word(other.digit[0])?;
            return Ok((q, BigInt::from_u64(r)));
        }
        if self.cmp_digits(other) == std::cmp::Ordering::Less {
            return Ok((BigInt::zero(), self.clone()));
        }

        let n = other.digit.len();
        let m = self.digit.len() - n;

        // Step 1: normalize so the divisor's top digit is >= BASE/2.
        let d = BASE / (other.digit[n - 1] + 1);
        let u = self.mul_word(d);
        let v = other.mul_word(d);
        let mut v_digit = v.digit.clone();
        v_digit.resize(n, 0); // mul_word may not have grown v past n digits; pad defensively
        let mut u_digit = u.digit.clone();
        u_digit.resize(m + n + 1, 0); // append a leading zero digit

        let mut q = vec![0u64; m + 1];

        // Step 2-7: main loop, j counts down from m to 0.
        for j in (0..=m).rev() {
            // Step 3: trial quotient from the top two digits of the window.
            let numerator = u_digit[j + n] * BASE + u_digit[j + n - 1];
            let mut qhat = numerator / v_digit[n - 1];
            let mut rhat = numerator % v_digit[n - 1];

            // Step 3 (cont'd): correct qhat down to fit in one digit and to
            // satisfy Knuth's refinement test, at most two rounds needed.
            while qhat >= BASE
                || (n >= 2 && qhat * v_digit[n - 2] > BASE * rhat + u_digit[j + n - 2])
            {
                qhat -= 1;
                rhat += v_digit[n - 1];
                if rhat >= BASE {
                    break;
                }
            }

            // Step 4: multiply and subtract qhat*v from the window.
            let mut borrow: i64 = 0;
            let mut carry = 0u64;
            for i in 0..n {
                let p = qhat * v_digit[i] + carry;
                carry = p / BASE;
                let sub = u_digit[j + i] as i64 - (p % BASE) as i64 + borrow;
                if sub < 0 {
                    u_digit[j + i] = (sub + BASE as i64) as u64;
                    borrow = -1;
                } else {
                    u_digit[j + i] = sub as u64;
                    borrow = 0;
                }
            }
            let sub = u_digit[j + n] as i64 - carry as i64 + borrow;
            let negative = sub < 0;
            u_digit[j + n] = if negative {
                (sub + BASE as i64) as u64
            } else {
                sub as u64
            };

            // Step 5/6: if the subtraction borrowed, qhat was one too big —
            // decrement it and add v back into the window (final carry discarded).
            if negative {
                qhat -= 1;
                let mut carry = 0u64;
                for i in 0..n {
                    let sum = u_digit[j + i] + v_digit[i] + carry;
                    u_digit[j + i] = sum % BASE;
                    carry = sum / BASE;
                }
                u_digit[j + n] = (u_digit[j + n] + carry) % BASE;
            }

            q[j] = qhat;
        }

        // Step 8: denormalize the remainder.
        let mut rem_digit = u_digit[0..n].to_vec();
        let mut carry = 0u64;
        for i in (0..n).rev() {
            let cur = carry * BASE + rem_digit[i];
            rem_digit[i] = cur / d;
            carry = cur % d;
        }

        Ok((
            BigInt {
                digit: Self::trim(q),
            },
            BigInt {
                digit: Self::trim(rem_digit),
            },
        ))
    }

    /// `self mod other`, via [`div_rem`].
    pub fn rem(&self, other: &BigInt) -> Result<BigInt, PrimpolyError> {
        Ok(self.div_rem(other)?.1)
    }

    /// `self / other`, via [`div_rem`].
    pub fn div(&self, other: &BigInt) -> Result<BigInt, PrimpolyError> {
        Ok(self.div_rem(other)?.0)
    }

    pub fn gcd(&self, other: &BigInt) -> BigInt {
        let mut u = self.clone();
        let mut v = other.clone();
        while !v.is_zero() {
            let r = u.div_rem(&v).expect("v checked non-zero by loop guard").1;
            u = v;
            v = r;
        }
        u
    }

    /// Bit `bitNum` (0 = least significant) decomposed as `digit*NUM_BITS_PER_DIGIT + sub`.
    pub fn test_bit(&self, bit_num: usize) -> Result<bool, PrimpolyError> {
        if bit_num > self.max_bit_number() {
            return Err(PrimpolyError::InternalRange(format!(
                "bit {} is out of range; number has {} bits",
                bit_num,
                self.max_bit_number() + 1
            )));
        }
        let digit_num = bit_num / NUM_BITS_PER_DIGIT as usize;
        let sub_bit_num = bit_num - digit_num * NUM_BITS_PER_DIGIT as usize;
        Ok((self.digit[digit_num] >> sub_bit_num) & 1 == 1)
    }

    /// Highest addressable bit number (0 is the least significant).
    pub fn max_bit_number(&self) -> usize {
        NUM_BITS_PER_DIGIT as usize * self.digit.len() - 1
    }

    /// Position of the leading one-bit, plus one. Undefined (Domain error) for zero.
    pub fn ceil_lg(&self) -> Result<u32, PrimpolyError> {
        if self.is_zero() {
            return Err(PrimpolyError::Domain(
                "ceilLg(0) is undefined".to_string(),
            ));
        }
        for bit in (0..=self.max_bit_number()).rev() {
            if self.test_bit(bit).unwrap() {
                return Ok(bit as u32 + 1);
            }
        }
        unreachable!("non-zero BigInt must have a set bit")
    }

    /// Exact conversion to `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        let mut result: u64 = 0;
        for &d in self.digit.iter().rev() {
            result = result.checked_mul(BASE)?.checked_add(d)?;
        }
        Some(result)
    }
}

impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp_digits(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp_digits(other)
    }
}

/// `p^n` for machine-word `p` and `n`, producing a `BigInt` result.
/// Exponentiation by repeated squaring, scanning `n`'s bits from just below
/// the leading one downward. `0^0` fails with `Domain`; `positive^0 = 1`;
/// `0^positive = 0`.
pub fn power(p: u64, n: u64) -> Result<BigInt, PrimpolyError> {
    if p == 0 && n == 0 {
        return Err(PrimpolyError::Domain("0^0 is undefined".to_string()));
    }
    if n == 0 {
        return Ok(BigInt::one());
    }
    if p == 0 {
        return Ok(BigInt::zero());
    }
    let top_bit = 63 - n.leading_zeros();
    let mut result = BigInt::from_u64(p);
    for bit in (0..top_bit).rev() {
        result = result.mul(&result);
        if (n >> bit) & 1 == 1 {
            result = result.mul_word(p);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_decimal_strings() {
        for s in ["0", "1", "9", "314159", "18446744073709551615", "1"] {
            let n = BigInt::from_decimal_str(s).unwrap();
            assert_eq!(n.to_decimal_string(), s);
        }
    }

    #[test]
    fn rejects_non_decimal_input() {
        assert!(BigInt::from_decimal_str("12a3").is_err());
        assert!(BigInt::from_decimal_str("-5").is_err());
        assert!(BigInt::from_decimal_str("").is_err());
    }

    #[test]
    fn add_matches_u64_for_small_values() {
        let a = BigInt::from_u64(123456789);
        let b = BigInt::from_u64(987654321);
        assert_eq!(a.add(&b).to_decimal_string(), "1111111110");
    }

    #[test]
    fn add_propagates_carry_across_digits() {
        let max_digit = BigInt::from_u64(BASE - 1);
        let one = BigInt::one();
        let sum = max_digit.add(&one);
        assert_eq!(sum.to_decimal_string(), BASE.to_string());
    }

    #[test]
    fn sub_underflow_is_an_error() {
        let a = BigInt::from_u64(3);
        let b = BigInt::from_u64(5);
        assert!(a.checked_sub(&b).is_err());
        assert_eq!(b.checked_sub(&a).unwrap().to_decimal_string(), "2");
    }

    #[test]
    fn division_known_values() {
        let u = BigInt::from_decimal_str("398765").unwrap();
        let v = BigInt::from_decimal_str("3457").unwrap();
        let (q, r) = u.div_rem(&v).unwrap();
        assert_eq!(q.to_decimal_string(), "115");
        assert_eq!(r.to_decimal_string(), "1210");
    }

    #[test]
    fn multiply_then_divide_is_identity() {
        let a = BigInt::from_decimal_str("3141592653589793238462643383279").unwrap();
        let b = BigInt::from_decimal_str("2718281828459045").unwrap();
        let product = a.mul(&b);
        let (q, r) = product.div_rem(&b).unwrap();
        assert!(r.is_zero());
        assert_eq!(q, a);
    }

    #[test]
    fn mul_div_roundtrip_for_arbitrary_pairs() {
        for (a, b) in [(17u64, 5u64), (999999937, 3), (2, 1), (BASE - 1, BASE - 1)] {
            if b == 0 {
                continue;
            }
            let prod = BigInt::from_u64(a).mul(&BigInt::from_u64(b));
            let (q, r) = prod.div_rem(&BigInt::from_u64(b)).unwrap();
            assert!(r.is_zero());
            assert_eq!(q.to_u64(), Some(a));
        }
    }

    #[test]
    fn ceil_lg_known_value() {
        assert_eq!(BigInt::from_u64(6).ceil_lg().unwrap(), 3);
    }

    #[test]
    fn ceil_lg_zero_is_domain_error() {
        assert!(BigInt::zero().ceil_lg().is_err());
    }

    #[test]
    fn power_of_two_to_100() {
        let expected = "1267650600228229401496703205376";
        assert_eq!(power(2, 100).unwrap().to_decimal_string(), expected);
    }

    #[test]
    fn power_edge_cases() {
        assert!(power(0, 0).is_err());
        assert_eq!(power(5, 0).unwrap(), BigInt::one());
        assert_eq!(power(0, 5).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_bit_decomposition() {
        let n = BigInt::from_u64(0b1011);
        assert!(n.test_bit(0).unwrap());
        assert!(n.test_bit(1).unwrap());
        assert!(!n.test_bit(2).unwrap());
        assert!(n.test_bit(3).unwrap());
    }

    #[test]
    fn test_bit_out_of_range_errors() {
        let n = BigInt::from_u64(1);
        assert!(n.test_bit(n.max_bit_number() + 1).is_err());
    }

    #[test]
    fn gcd_matches_euclid() {
        assert_eq!(
            BigInt::from_u64(48).gcd(&BigInt::from_u64(18)).to_u64(),
            Some(6)
        );
        assert_eq!(
            BigInt::from_u64(17).gcd(&BigInt::from_u64(5)).to_u64(),
            Some(1)
        );
    }

    #[test]
    fn ordering_is_by_magnitude() {
        assert!(BigInt::from_u64(100) > BigInt::from_u64(99));
        assert!(BigInt::from_u64(BASE) > BigInt::from_u64(BASE - 1));
    }

    #[test]
    fn canonical_form_has_no_trailing_zero_digit() {
        let n = BigInt::from_u64(BASE).checked_sub(&BigInt::from_u64(BASE)).unwrap();
        assert_eq!(n.digit_count(), 1);
        assert_eq!(n.digit_at(0), 0);
    }
}
