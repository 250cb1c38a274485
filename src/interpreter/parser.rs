/// Parser state and the token cursor.
///
/// Holds the [`Parser`] itself, the binding-power table and the
/// program-level loop that collects errors instead of stopping at the first
/// one.
pub mod core;

/// Statement parsing.
///
/// Dispatches on the leading token (`let`, `return`, `while`, `for`, `break`)
/// and falls back to expression statements. Also owns blocks, statement
/// terminators and error recovery.
pub mod statement;

/// Expression parsing.
///
/// The Pratt loop and the per-token prefix and infix rules.
pub mod expression;

/// Shared helpers for comma-separated lists and parameter lists.
mod utils;

pub use self::core::{ParseResult, Parser, Precedence};
use crate::{ast::Program, error::ParseError, interpreter::lexer::Lexer};

/// Lexes and parses `source` in one go.
///
/// # Returns
/// The (possibly incomplete) program and every error found along the way.
///
/// # Example
/// ```
/// use marmoset::interpreter::parser::parse;
///
/// let (program, errors) = parse("let x = 1 + 2 * 3;");
/// assert!(errors.is_empty());
/// assert_eq!(program.to_string(), "let x = (1 + (2 * 3));");
/// ```
#[must_use]
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}
