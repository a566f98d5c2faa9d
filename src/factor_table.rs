//! Reader for Cunningham-style factor tables (`cXXminus.txt`): one file per
//! base `p`, each line giving the known factorization of `p^n - 1` for some
//! `n`. A lookup miss (file absent, or no entry for the requested `n`) is
//! not an error — the caller falls through to the automatic cascade.

use crate::bigint::{self, BigInt};
use crate::error::PrimpolyError;
use crate::factor::{Factorization, PrimeFactor};
use std::path::PathBuf;

pub struct FactorTableReader {
    dir: PathBuf,
}

impl FactorTableReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FactorTableReader { dir: dir.into() }
    }

    fn table_path(&self, p: u64) -> PathBuf {
        self.dir.join(format!("c{}minus.txt", p))
    }

    /// Look up the factorization of `p^n - 1`. `Ok(None)` covers every kind
    /// of miss: no table file for `p`, no header line, or no entry for `n`.
    pub fn lookup(&self, p: u64, n: u64) -> Result<Option<Factorization<BigInt>>, PrimpolyError> {
        let path = self.table_path(p);
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(_) => return Ok(None),
        };

        let mut lines = raw.lines();
        let found_header = lines.by_ref().any(|line| is_header_line(line));
        if !found_header {
            return Ok(None);
        }
        let body: String = lines.collect::<Vec<_>>().join("\n");

        for entry in logical_lines(&body) {
            if entry.contains('+') {
                continue; // incomplete entry, per the table's own convention
            }
            let tokens: Vec<&str> = entry.split_whitespace().collect();
            if tokens.len() < 3 {
                continue;
            }
            let entry_n: u64 = match tokens[0].parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            if entry_n != n {
                continue;
            }
            let factorization_str = tokens[2..].concat();
            let factors = parse_factorization(&factorization_str)?;
            let q = bigint::power(p, n)?;
            return Factorization::from_parsed(q, factors).map(Some);
        }
        Ok(None)
    }
}

fn is_header_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() >= 2 && tokens[0].eq_ignore_ascii_case("n") && tokens[1].eq_ignore_ascii_case("#Fac")
}

/// Concatenate physical lines into logical entries. A trailing backslash or
/// a trailing period marks the line as continued onto the next one; any
/// other line ends the entry it belongs to.
fn logical_lines(body: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    for raw_line in body.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_suffix('\\') {
            current.push_str(stripped);
            continue;
        }
        current.push_str(line);
        if current.ends_with('.') {
            continue;
        }
        entries.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}

fn parse_factorization(s: &str) -> Result<Vec<PrimeFactor<BigInt>>, PrimpolyError> {
    let s = s.trim_end_matches('.');
    let mut factors = Vec::new();
    for term in s.split('.') {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        factors.push(parse_term(term)?);
    }
    if factors.is_empty() {
        return Err(PrimpolyError::Factor(format!(
            "empty factorization term list: '{}'",
            s
        )));
    }
    Ok(factors)
}

fn parse_term(term: &str) -> Result<PrimeFactor<BigInt>, PrimpolyError> {
    if let Some((base, exponent)) = term.split_once('^') {
        let prime = BigInt::from_decimal_str(base)?;
        let multiplicity: u64 = exponent.parse().map_err(|_| {
            PrimpolyError::Factor(format!("bad exponent in factor table term '{}'", term))
        })?;
        Ok(PrimeFactor { prime, multiplicity })
    } else {
        Ok(PrimeFactor {
            prime: BigInt::from_decimal_str(term)?,
            multiplicity: 1,
        })
    }
}
