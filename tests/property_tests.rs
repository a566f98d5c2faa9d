//! Property-based tests for the kernel's mathematical primitives.
//!
//! `proptest` checks the universally-quantified invariants and round-trip
//! laws rather than specific known values: BigInt decimal round-tripping,
//! `add_mod`/`power_mod` against reference implementations via `u128`, gcd
//! symmetry, and the Factorization product invariant.

use primpoly::bigint::BigInt;
use primpoly::factor::Factorization;
use primpoly::modarith;
use proptest::prelude::*;

proptest! {
    #[test]
    fn decimal_round_trip_is_identity(n in 0u64..=u64::MAX) {
        let s = n.to_string();
        let parsed = BigInt::from_decimal_str(&s).unwrap();
        prop_assert_eq!(parsed.to_decimal_string(), s);
    }

    #[test]
    fn bigint_mul_then_div_recovers_the_original(a in 1u64..1_000_000, b in 1u64..1_000_000) {
        let x = BigInt::from_u64(a);
        let y = BigInt::from_u64(b);
        let product = x.mul(&y);
        let (quotient, remainder) = product.div_rem(&y).unwrap();
        prop_assert_eq!(quotient.to_decimal_string(), a.to_string());
        prop_assert!(remainder.is_zero());
    }

    #[test]
    fn add_mod_matches_u128_reference(a in 0u64..=u64::MAX, b in 0u64..=u64::MAX, n in 1u64..=u64::MAX) {
        let expected = (((a as u128) + (b as u128)) % (n as u128)) as u64;
        prop_assert_eq!(modarith::add_mod(a, b, n).unwrap(), expected);
    }

    #[test]
    fn power_mod_matches_u128_reference(a in 1u64..1000, e in 0u32..=20, p in 2u64..1000) {
        let expected = {
            let mut result = 1u128;
            let base = (a as u128) % (p as u128);
            for _ in 0..e {
                result = (result * base) % (p as u128);
            }
            result as u64
        };
        prop_assert_eq!(modarith::power_mod(a, e as u64, p).unwrap(), expected);
    }

    #[test]
    fn gcd_is_symmetric_and_divides_both_operands(a in 1u64..100_000, b in 1u64..100_000) {
        let g = modarith::gcd(a, b);
        prop_assert_eq!(g, modarith::gcd(b, a));
        prop_assert_eq!(a % g, 0);
        prop_assert_eq!(b % g, 0);
    }

    #[test]
    fn automatic_cascade_factorization_reconstructs_its_input(n in 2u64..200_000) {
        let f = Factorization::<u64>::automatic_cascade(n, None).unwrap();
        let mut product = 1u64;
        for pf in f.factors() {
            for _ in 0..pf.multiplicity {
                product *= pf.prime;
            }
        }
        prop_assert_eq!(product, n);
        let mut previous = 0u64;
        for pf in f.factors() {
            prop_assert!(pf.prime > previous);
            prop_assert!(pf.multiplicity >= 1);
            previous = pf.prime;
        }
    }
}
