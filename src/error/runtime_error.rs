use thiserror::Error;

use crate::interpreter::object::ObjectType;

/// Every kind of failure the evaluator and the macro expander can report.
///
/// The `Display` text of a kind is the message the user sees, without any
/// line information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An infix operator was applied to operands of different, non-numeric
    /// types.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        /// Type of the left operand.
        left:     ObjectType,
        /// The operator as written in the source.
        operator: String,
        /// Type of the right operand.
        right:    ObjectType,
    },
    /// An infix operator is not defined for the given operand types.
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        /// Type of the left operand.
        left:     ObjectType,
        /// The operator as written in the source.
        operator: String,
        /// Type of the right operand.
        right:    ObjectType,
    },
    /// A prefix operator is not defined for the operand type.
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        /// The operator as written in the source.
        operator: String,
        /// Type of the operand.
        operand:  ObjectType,
    },
    /// A name is bound neither in the environment chain nor as a builtin.
    #[error("identifier not found: {name}")]
    IdentifierNotFound {
        /// The unresolved name.
        name: String,
    },
    /// `let` tried to bind a name that the current scope already binds.
    #[error("Identifier {name} already exists")]
    AlreadyExists {
        /// The name that is already bound.
        name: String,
    },
    /// An assignment targeted a name that was never declared.
    #[error("{name} is not defined")]
    NotDefined {
        /// The assignment target.
        name: String,
    },
    /// A value without a hash key was used as a hash key.
    #[error("unusable as hash key: {object_type}")]
    UnusableHashKey {
        /// Type of the rejected key.
        object_type: ObjectType,
    },
    /// The left side of an index expression cannot be indexed with the given
    /// index.
    #[error("index operator not supported: {index} for {left}")]
    IndexNotSupported {
        /// Type of the indexed value.
        left:  ObjectType,
        /// Type of the index.
        index: ObjectType,
    },
    /// The callee of a call expression is not callable.
    #[error("not a function: {object_type}")]
    NotAFunction {
        /// Type of the callee.
        object_type: ObjectType,
    },
    /// A builtin was called with the wrong number of arguments.
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount {
        /// Number of arguments supplied.
        got:  usize,
        /// Number of arguments expected.
        want: usize,
    },
    /// A builtin does not accept an argument of the given type.
    #[error("argument to `{function}` not supported, got {got}")]
    UnsupportedArgument {
        /// Name of the builtin.
        function: &'static str,
        /// Type of the rejected argument.
        got:      ObjectType,
    },
    /// A builtin expected an argument of a specific type.
    #[error("argument to `{function}` must be {expected}, got {got}")]
    UnexpectedArgument {
        /// Name of the builtin.
        function: &'static str,
        /// The required type.
        expected: ObjectType,
        /// Type of the rejected argument.
        got:      ObjectType,
    },
    /// An expression that needs a value evaluated to nothing.
    #[error("expression produced no value")]
    MissingValue,
    /// `break` escaped every enclosing loop.
    #[error("break outside of a loop")]
    BreakOutsideLoop,
    /// `unquote` produced an object that has no AST representation.
    #[error("cannot unquote a value of type {object_type}")]
    UnquoteUnsupported {
        /// Type of the unquoted value.
        object_type: ObjectType,
    },
    /// `unquote` met an array or hash that contains itself.
    #[error("cannot unquote a self-containing {object_type}")]
    UnquoteCycle {
        /// Type of the collection.
        object_type: ObjectType,
    },
    /// A macro body returned something other than a quoted AST node.
    #[error("we only support returning AST-nodes from macros")]
    MacroResultNotAst,
    /// A free-form message, carried by error literals that macro expansion
    /// left in the tree.
    #[error("{0}")]
    Custom(String),
}

/// A runtime failure together with the line of the innermost node that
/// produced it.
///
/// The line starts out unset and is filled in by the first node boundary the
/// error crosses on its way up, see [`RuntimeError::or_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// The source line, once known.
    pub line: Option<usize>,
}

impl RuntimeError {
    /// Creates an error that has not been attributed to a line yet.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind, line: None }
    }

    /// Creates an error attributed to `line`.
    #[must_use]
    pub const fn at(kind: ErrorKind, line: usize) -> Self {
        Self { kind,
               line: Some(line) }
    }

    /// Stamps the error with `line` unless it already carries one.
    ///
    /// # Example
    /// ```
    /// use marmoset::error::{ErrorKind, RuntimeError};
    ///
    /// let error = RuntimeError::new(ErrorKind::MissingValue).or_line(4)
    ///                                                       .or_line(1);
    /// assert_eq!(error.line, Some(4));
    /// ```
    #[must_use]
    pub fn or_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }

    /// The message without line information.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<ErrorKind> for RuntimeError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "Error on line {line}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for RuntimeError {}
