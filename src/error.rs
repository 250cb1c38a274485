/// Parsing errors.
///
/// Defines the error type recorded by the parser whenever the token stream does
/// not match the grammar. Parse errors never abort parsing; they are collected
/// and handed to the caller as a batch.
pub mod parse_error;
/// Runtime errors.
///
/// Contains every failure the evaluator and the macro expander can produce,
/// such as type mismatches, unknown identifiers, unusable hash keys or wrong
/// argument counts. A runtime error is a value: it travels inside
/// `Object::Error` and carries the source line of the innermost failing node.
pub mod runtime_error;
/// Top-level errors of the library entry points.
///
/// Wraps parse errors, runtime errors and I/O failures into one type so that
/// the binary and the public helpers can report them uniformly.
pub mod interpreter_error;

pub use interpreter_error::InterpreterError;
pub use parse_error::ParseError;
pub use runtime_error::{ErrorKind, RuntimeError};
