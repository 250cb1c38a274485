//! # marmoset
//!
//! marmoset is a tree-walking interpreter for a small dynamically typed
//! language with integers, floats, strings, arrays, hashes, closures, loops,
//! and `quote`/`unquote` macros.
//!
//! A program goes through four stages: the [lexer](interpreter::lexer), the
//! [parser](interpreter::parser), [macro
//! expansion](interpreter::macro_expansion) and the
//! [evaluator](interpreter::evaluator). [`Session`] ties them together and
//! keeps state between runs.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{fs, path::Path};

use log::{debug, info};

use crate::{
    error::InterpreterError,
    interpreter::{
        evaluator::eval_program,
        macro_expansion::{define_macros, expand_macros},
        object::{Env, Environment, Object},
        parser::parse,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types that represent
/// programs as a tree, their canonical fully parenthesized rendering, and
/// the bottom-up rewrite used by macros.
///
/// # Responsibilities
/// - Defines node types for all language constructs, each with its source
///   line.
/// - Renders nodes back to source that parses to the same tree.
/// - Rebuilds trees through a caller-supplied transform.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the errors raised while parsing or evaluating code,
/// each carrying the line it refers to, plus the error returned by a whole
/// run.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, macro expansion and evaluation.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Conversions between `i64`, `usize` and `f64` used by arithmetic and
/// indexing, without silent data loss.
pub mod util;

/// State that persists between runs: the global scope and the macro scope.
///
/// The REPL keeps one session for its whole lifetime so that bindings and
/// macros from earlier lines stay visible.
#[derive(Debug)]
pub struct Session {
    env:       Env,
    macro_env: Env,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with empty scopes.
    #[must_use]
    pub fn new() -> Self {
        Self { env:       Environment::new(),
               macro_env: Environment::new(), }
    }

    /// The global scope of this session.
    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    /// Parses, expands and evaluates `source`.
    ///
    /// # Returns
    /// - `Ok(Some(value))`: The value of the last statement, or of a
    ///   top-level `return`.
    /// - `Ok(None)`: The program produced no value, e.g. it ended with a
    ///   `let`.
    ///
    /// # Errors
    /// - [`InterpreterError::Parse`] with every parse error; nothing is
    ///   evaluated.
    /// - [`InterpreterError::Runtime`] when evaluation fails. Bindings made
    ///   before the failure are kept.
    ///
    /// # Example
    /// ```
    /// use marmoset::{Session, interpreter::object::Object};
    ///
    /// let session = Session::new();
    /// session.run("let add = fn(a, b) { a + b };").unwrap();
    ///
    /// assert_eq!(session.run("add(1, 2);").unwrap(), Some(Object::Integer(3)));
    /// assert!(session.run("let = 1;").is_err());
    /// ```
    pub fn run(&self, source: &str) -> Result<Option<Object>, InterpreterError> {
        let (mut program, errors) = parse(source);
        if !errors.is_empty() {
            debug!("parsing failed with {} error(s)", errors.len());
            return Err(errors.into());
        }

        define_macros(&mut program, &self.macro_env);
        let program = expand_macros(program, &self.macro_env);
        debug!("evaluating {} statement(s)", program.statements.len());

        match eval_program(&program, &self.env) {
            Some(Object::Error(error)) => Err(error.into()),
            result => Ok(result),
        }
    }

    /// Reads the file at `path` and runs its contents.
    ///
    /// # Errors
    /// [`InterpreterError::Io`] when the file cannot be read, otherwise as
    /// [`Session::run`].
    pub fn run_file(&self, path: &Path) -> Result<Option<Object>, InterpreterError> {
        info!("running {}", path.display());
        let source = fs::read_to_string(path).map_err(|source| {
                                                 InterpreterError::Io { path: path.to_path_buf(),
                                                                        source }
                                             })?;
        self.run(&source)
    }
}

/// Returns the final evaluation result of `source`, run in a fresh session.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use marmoset::get_result;
///
/// let result = get_result("let x = 2 + 2; x * 10;").unwrap();
/// assert_eq!(result.unwrap().to_string(), "40");
///
/// // `y` is never bound.
/// let error = get_result("let x = 1;\nx + y;").unwrap_err();
/// assert_eq!(error.to_string(), "Error on line 2: identifier not found: y");
/// ```
pub fn get_result(source: &str) -> Result<Option<Object>, InterpreterError> {
    Session::new().run(source)
}
