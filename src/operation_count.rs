//! Run-wide counters, reported on request by `-s`/`--stats`.

use std::fmt;

/// Plain record of counters accumulated over one driver run. Mutated
/// throughout, reported once at the end.
#[derive(Debug, Clone, Default)]
pub struct OperationCount {
    pub polynomials_tested: u64,
    pub gcds: u64,
    pub primality_tests: u64,
    pub squarings: u64,
    pub trial_divisions: u64,
    /// One counter per fast filter in `PrimitivityOracle`, indexed 0..=5 in
    /// the order the filters run (constant-coefficient, linear-factor,
    /// nullity, order_r, constant-coefficient-consistency, order_m).
    pub passed_filter: [u64; 6],
}

impl OperationCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_pass(&mut self, filter_index: usize) {
        self.passed_filter[filter_index] += 1;
    }
}

impl fmt::Display for OperationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "operation counts:")?;
        writeln!(f, "  polynomials tested:  {}", self.polynomials_tested)?;
        writeln!(f, "  gcd calls:           {}", self.gcds)?;
        writeln!(f, "  primality tests:     {}", self.primality_tests)?;
        writeln!(f, "  squarings:           {}", self.squarings)?;
        writeln!(f, "  trial divisions:     {}", self.trial_divisions)?;
        write!(f, "  passed each filter:  {:?}", self.passed_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero() {
        let oc = OperationCount::new();
        assert_eq!(oc.polynomials_tested, 0);
        assert_eq!(oc.passed_filter, [0; 6]);
    }

    #[test]
    fn record_filter_pass_increments_the_right_slot() {
        let mut oc = OperationCount::new();
        oc.record_filter_pass(2);
        oc.record_filter_pass(2);
        assert_eq!(oc.passed_filter[2], 2);
        assert_eq!(oc.passed_filter[0], 0);
    }
}
