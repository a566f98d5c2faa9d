//! # CLI Execution
//!
//! Extracted from `main.rs` to keep the entry point slim. Validates the
//! command line, dispatches to either single-polynomial testing (`-t`) or
//! the full search (`driver::run`), and renders output to stdout exactly as
//! the external interface contract specifies.

use crate::Cli;
use anyhow::{bail, Context, Result};
use primpoly::bigint::{self, BigInt};
use primpoly::driver::{self, DriverFlags};
use primpoly::error::PrimpolyError;
use primpoly::factor::{self, Factorization};
use primpoly::factor_table::FactorTableReader;
use primpoly::operation_count::OperationCount;
use primpoly::oracle::{PrimitivityOracle, Verdict};
use primpoly::parser;
use tracing::info;

const LEGAL_NOTICE: &str = "\
primpoly -- find and test primitive polynomials over GF(p)
This program comes with ABSOLUTELY NO WARRANTY; see the accompanying
license for details.";

pub fn run(cli: &Cli) -> Result<()> {
    println!("{}", LEGAL_NOTICE);

    match &cli.test_poly {
        Some(poly_str) => run_test(cli, poly_str),
        None => run_search(cli),
    }
}

fn run_test(cli: &Cli, poly_str: &str) -> Result<()> {
    let f = parser::parse_polynomial(poly_str)?;
    let p = f.p();
    let n = f.degree();
    validate_p(p)?;
    if n < 1 {
        bail!(PrimpolyError::UserInput(
            "polynomial degree must be at least 1".to_string()
        ));
    }

    info!(p, n, poly = %f, "testing polynomial for primitivity");

    let factor_table = cli
        .factor_table_dir
        .as_ref()
        .map(|dir| FactorTableReader::new(dir.clone()));
    let q = bigint::power(p, n as u64)?.checked_sub(&BigInt::one())?;
    let table = match &factor_table {
        Some(reader) => reader.lookup(p, n as u64)?,
        None => None,
    };
    let q_factorization = Factorization::<BigInt>::automatic_cascade(q, table)?;
    let oracle = PrimitivityOracle::new(p, n, q_factorization)?;

    let mut counts = OperationCount::new();
    let verdict = oracle.test(&f, &mut counts)?;

    match verdict {
        Verdict::Primitive => {
            if cli.slow_confirm && !oracle.maximal_order(&f)? {
                bail!(PrimpolyError::ConfirmationMismatch(format!(
                    "fast oracle certified {} primitive but maximal_order disagreed",
                    f
                )));
            }
            println!("\n{} is primitive!", f);
        }
        Verdict::NotPrimitive(reason) => {
            println!("\n{} is not primitive ({:?}).", f, reason);
        }
    }

    if cli.print_counts {
        println!("\n{}", counts);
    }
    Ok(())
}

fn run_search(cli: &Cli) -> Result<()> {
    let p = cli.p.context("p is required unless -t is given")?;
    let n = cli.n.context("n is required unless -t is given")?;
    validate_p(p)?;
    if n < 2 {
        bail!(PrimpolyError::UserInput("n must be at least 2".to_string()));
    }

    info!(
        p,
        n,
        list_all = cli.list_all,
        slow_confirm = cli.slow_confirm,
        "searching for primitive polynomials"
    );

    let factor_table = cli
        .factor_table_dir
        .as_ref()
        .map(|dir| FactorTableReader::new(dir.clone()));
    let flags = DriverFlags {
        list_all: cli.list_all,
        slow_confirm: cli.slow_confirm,
    };
    let result = driver::run(p, n as usize, &flags, factor_table.as_ref())?;

    for found in &result.found {
        info!(poly = %found, "accepted primitive polynomial");
        println!("\nPrimitive polynomial of degree {} mod {}:\n{}", n, p, found);
    }

    if cli.print_counts {
        println!(
            "\n{} primitive polynomial(s) of degree {} mod {} exist in total.",
            result.num_primitive_polynomials, n, p
        );
        println!("{}", result.counts);
    }

    Ok(())
}

fn validate_p(p: u64) -> Result<()> {
    if p < 2 || p >= BigInt::base() {
        bail!(PrimpolyError::UserInput(format!(
            "p must satisfy 2 <= p < {}",
            BigInt::base()
        )));
    }
    if !factor::is_almost_surely_prime(p)? {
        bail!(PrimpolyError::UserInput(format!("{} is not prime", p)));
    }
    Ok(())
}
