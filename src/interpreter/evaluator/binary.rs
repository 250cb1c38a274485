/// Operator dispatch on the operand types.
pub mod core;

/// Number arithmetic and comparison.
///
/// Both operands are widened to `f64`; the result is an integer again only
/// when both operands were integers.
pub mod scalar;

/// String concatenation and comparison.
pub mod string;
