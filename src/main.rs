//! # Main — CLI Entry Point
//!
//! Parses the command line, installs the `tracing` subscriber, dispatches to
//! [`cli::run`], and maps a returned error to its process exit code.

mod cli;

use clap::Parser;
use std::path::PathBuf;

/// Find or test primitive polynomials of degree n over GF(p).
#[derive(Parser, Debug)]
#[command(name = "primpoly", version, about = "Find and test primitive polynomials over GF(p)")]
pub struct Cli {
    /// List every primitive polynomial of degree n mod p, not just the first.
    #[arg(short = 'a', long = "all")]
    pub list_all: bool,

    /// Print the operation-count report after the search.
    #[arg(short = 's', long = "stats")]
    pub print_counts: bool,

    /// Also run the slow maximal_order confirmation on every polynomial found.
    #[arg(short = 'c', long = "confirm")]
    pub slow_confirm: bool,

    /// Test a single polynomial for primitivity instead of searching.
    #[arg(short = 't', long = "test", value_name = "POLY")]
    pub test_poly: Option<String>,

    /// Directory to search for Cunningham factor tables (cXXminus.txt).
    /// Defaults to the current directory when omitted.
    #[arg(long = "factor-table-dir", value_name = "DIR")]
    pub factor_table_dir: Option<PathBuf>,

    /// Prime modulus p (ignored when -t is given).
    #[arg(value_name = "P")]
    pub p: Option<u64>,

    /// Polynomial degree n (ignored when -t is given).
    #[arg(value_name = "N")]
    pub n: Option<u64>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = cli::run(&cli) {
        eprintln!("{:#}", err);
        let code = err
            .downcast_ref::<primpoly::error::PrimpolyError>()
            .map(|e| e.exit_code())
            .unwrap_or(4);
        std::process::exit(code);
    }
}
