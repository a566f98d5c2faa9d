//! Top-level orchestration: factor `r` once, then enumerate monic trial
//! polynomials in `next_trial_poly`'s fixed order until the oracle certifies
//! the one requested (single-shot) or all of them (list-all).

use crate::bigint::{self, BigInt};
use crate::error::PrimpolyError;
use crate::factor::Factorization;
use crate::factor_table::FactorTableReader;
use crate::operation_count::OperationCount;
use crate::oracle::{PrimitivityOracle, Verdict};
use crate::polynomial::Polynomial;

pub struct DriverFlags {
    pub list_all: bool,
    pub slow_confirm: bool,
}

pub struct DriverResult {
    pub found: Vec<Polynomial>,
    pub num_primitive_polynomials: BigInt,
    pub counts: OperationCount,
}

/// Run the search for primitive polynomials of degree `n` mod `p`.
/// `factor_table`, if given, is consulted once before falling back to the
/// automatic cascade (Pollard rho, then trial division) to factor `p^n-1`.
pub fn run(
    p: u64,
    n: usize,
    flags: &DriverFlags,
    factor_table: Option<&FactorTableReader>,
) -> Result<DriverResult, PrimpolyError> {
    let q = bigint::power(p, n as u64)?.checked_sub(&BigInt::one())?;
    let table = match factor_table {
        Some(reader) => reader.lookup(p, n as u64)?,
        None => None,
    };
    let q_factorization = Factorization::<BigInt>::automatic_cascade(q, table)?;
    let oracle = PrimitivityOracle::new(p, n, q_factorization)?;

    let target = if flags.list_all {
        oracle.num_primitive_polynomials.clone()
    } else {
        BigInt::one()
    };

    let mut f = Polynomial::initial_trial_poly(n, p)?;
    let mut counts = OperationCount::new();
    let mut found = Vec::new();
    let mut found_count = BigInt::zero();

    loop {
        if f.next_trial_poly().is_err() {
            return Err(PrimpolyError::InternalRange(format!(
                "exhausted every monic degree-{} polynomial mod {} after finding only {} of {} primitive polynomials",
                n, p, found_count, target
            )));
        }

        let verdict = oracle.test(&f, &mut counts)?;
        if verdict != Verdict::Primitive {
            continue;
        }

        if flags.slow_confirm && !oracle.maximal_order(&f)? {
            return Err(PrimpolyError::ConfirmationMismatch(format!(
                "fast oracle certified {} primitive but maximal_order disagreed",
                f
            )));
        }

        found.push(f.clone());
        found_count = found_count.add_word(1);
        if !flags.list_all || found_count == target {
            break;
        }
    }

    Ok(DriverResult {
        found,
        num_primitive_polynomials: oracle.num_primitive_polynomials,
        counts,
    })
}
