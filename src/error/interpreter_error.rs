use std::path::PathBuf;

use thiserror::Error;

use super::{ParseError, RuntimeError};

/// Failure of a whole run: reading, parsing, or evaluating a program.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The program did not parse. Nothing was evaluated.
    #[error("{} parse error(s), first: {}", .0.len(), first_message(.0))]
    Parse(Vec<ParseError>),
    /// Evaluation ended in an error object.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A source file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

fn first_message(errors: &[ParseError]) -> String {
    errors.first()
          .map_or_else(String::new, ToString::to_string)
}

impl From<Vec<ParseError>> for InterpreterError {
    fn from(errors: Vec<ParseError>) -> Self {
        Self::Parse(errors)
    }
}
