/// Core evaluation logic.
///
/// Contains the statement and expression dispatch, blocks, programs and the
/// boundary that turns runtime errors into error objects.
pub mod core;

/// Prefix operator evaluation: `!` and unary `-`.
pub mod unary;

/// Infix operator evaluation.
///
/// Implements arithmetic and comparisons on numbers, string concatenation
/// and comparison, and identity equality for everything else.
pub mod binary;

/// Index expressions and hash literals.
pub mod index;

/// `while` and `for` loops, including `break`.
pub mod loops;

/// Function evaluation.
///
/// Handles calls to user-defined functions and builtins, argument binding and
/// return value unwrapping.
pub mod function;

/// The `quote` special form and `unquote` splicing.
pub mod quote;

/// Utility functions for evaluation.
///
/// Provides helpers shared by the other evaluation modules.
pub mod utils;

pub use self::core::{EvalResult, eval_program};
