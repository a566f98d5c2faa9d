//! # primpoly — Primitive Polynomial Finder
//!
//! Finds and tests primitive polynomials of degree `n` over `GF(p)`: the
//! monic polynomials whose root generates the multiplicative group of
//! `GF(p^n)`. Used to build maximal-period linear-feedback shift registers
//! and to construct `GF(p^n)` arithmetic.
//!
//! ## Module organization
//!
//! **Kernel modules**, in dependency order:
//! - [`bigint`] — arbitrary-precision non-negative integers (base-2^31 digits, Knuth Algorithm D division)
//! - [`modarith`] — carry-safe word-level modular arithmetic and primitive-root testing
//! - [`operation_count`] — the counters reported by `-s`/`--stats`
//! - [`factor`] — Cunningham-table lookup, Miller–Rabin, Pollard rho, trial division
//! - [`polynomial`] — dense polynomials over `GF(p)` and the monic trial-polynomial enumeration
//! - [`polymod`] — polynomial arithmetic reduced modulo `(f, p)`
//! - [`oracle`] — the fast primitivity filters plus the slow `maximal_order` confirmation
//! - [`factor_table`] — reader for on-disk Cunningham factor tables
//! - [`parser`] — the polynomial-string grammar
//! - [`driver`] — top-level search orchestration
//!
//! **Ambient modules:**
//! - [`error`] — the typed error taxonomy and its exit-code mapping
//!
//! Single-threaded and synchronous throughout: every public function either
//! returns a value or a [`error::PrimpolyError`], never blocks, and never
//! spawns work elsewhere.

pub mod bigint;
pub mod driver;
pub mod error;
pub mod factor;
pub mod factor_table;
pub mod modarith;
pub mod operation_count;
pub mod oracle;
pub mod parser;
pub mod polymod;
pub mod polynomial;
