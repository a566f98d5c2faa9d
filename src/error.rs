//! Typed error taxonomy for the primitivity kernel.
//!
//! Hand-rolled `Display` + `std::error::Error` impls, the way `GwError` is
//! done in a GWNUM FFI wrapper elsewhere in this crate's lineage, rather
//! than a derive-macro error crate. Each variant maps to one of the exit
//! codes the command-line surface returns.

use std::fmt;

/// One of the error kinds the kernel can raise. Every variant carries the
/// message that should reach stderr; `exit_code` gives the process exit
/// status for that kind.
#[derive(Debug, Clone)]
pub enum PrimpolyError {
    /// Bad command line, bad polynomial syntax, p not prime, or p/n out of range.
    UserInput(String),
    /// Index out of bounds in a data structure internal to the core.
    InternalRange(String),
    /// BigInt arithmetic overflowed its representable range.
    Overflow(String),
    /// BigInt subtraction underflowed (borrow past the top digit).
    Underflow(String),
    /// Division or modulus by zero.
    ZeroDivide(String),
    /// Operation undefined on its input domain (e.g. 0^0).
    Domain(String),
    /// Modulus <= 0, non-invertible operand, or primitive-root domain violation.
    ModularArithmetic(String),
    /// Factor table missing/malformed, or a factorization failed to verify.
    Factor(String),
    /// The fast oracle and the slow maximal_order confirmation disagreed.
    ConfirmationMismatch(String),
    /// Allocation failure.
    Memory(String),
}

impl PrimpolyError {
    /// Process exit code for this error kind, per the command-line contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            PrimpolyError::UserInput(_) => 3,
            PrimpolyError::InternalRange(_)
            | PrimpolyError::Overflow(_)
            | PrimpolyError::Underflow(_)
            | PrimpolyError::ZeroDivide(_)
            | PrimpolyError::Domain(_)
            | PrimpolyError::ModularArithmetic(_)
            | PrimpolyError::Factor(_)
            | PrimpolyError::ConfirmationMismatch(_)
            | PrimpolyError::Memory(_) => 4,
        }
    }

    fn kind_str(&self) -> &'static str {
        match self {
            PrimpolyError::UserInput(_) => "user input error",
            PrimpolyError::InternalRange(_) => "internal range error",
            PrimpolyError::Overflow(_) => "overflow",
            PrimpolyError::Underflow(_) => "underflow",
            PrimpolyError::ZeroDivide(_) => "zero divide",
            PrimpolyError::Domain(_) => "domain error",
            PrimpolyError::ModularArithmetic(_) => "modular arithmetic error",
            PrimpolyError::Factor(_) => "factor error",
            PrimpolyError::ConfirmationMismatch(_) => "confirmation mismatch",
            PrimpolyError::Memory(_) => "memory error",
        }
    }

    fn message(&self) -> &str {
        match self {
            PrimpolyError::UserInput(m)
            | PrimpolyError::InternalRange(m)
            | PrimpolyError::Overflow(m)
            | PrimpolyError::Underflow(m)
            | PrimpolyError::ZeroDivide(m)
            | PrimpolyError::Domain(m)
            | PrimpolyError::ModularArithmetic(m)
            | PrimpolyError::Factor(m)
            | PrimpolyError::ConfirmationMismatch(m)
            | PrimpolyError::Memory(m) => m,
        }
    }
}

impl fmt::Display for PrimpolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}. Please email the author with this message and your input.",
            self.kind_str(),
            self.message()
        )
    }
}

impl std::error::Error for PrimpolyError {}

pub type Result<T> = std::result::Result<T, PrimpolyError>;
