use thiserror::Error;

/// A single problem found while parsing.
///
/// The line always comes from the offending token, never from a recomputed
/// position, so it points at the place the user has to look at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: {message}")]
pub struct ParseError {
    /// Human-readable description of the problem.
    pub message: String,
    /// The source line where the error occurred.
    pub line:    usize,
}

impl ParseError {
    /// Creates a parse error for the given line.
    ///
    /// # Example
    /// ```
    /// use marmoset::error::ParseError;
    ///
    /// let error = ParseError::new("no prefix parse function for ) found", 3);
    /// assert_eq!(error.to_string(),
    ///            "Error on line 3: no prefix parse function for ) found");
    /// ```
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(),
               line }
    }
}
