use std::fmt;

/// Generic bottom-up rewriting of syntax trees.
///
/// Used by `quote` to splice `unquote` results back into the tree, and by the
/// macro expander to replace macro call sites with the code the macro
/// returned.
pub mod modify;

/// A parsed program: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// A `{ ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line of the opening brace.
    pub line:       usize,
}

/// A name, either as a reference or in a binding position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The name as written.
    pub name: String,
    /// Line number in the source code.
    pub line: usize,
}

/// A statement of the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        /// The declared name.
        name:  Identifier,
        /// The initializer.
        value: Expression,
        /// Line number in the source code.
        line:  usize,
    },
    /// `return <value>;`
    Return {
        /// The returned expression.
        value: Expression,
        /// Line number in the source code.
        line:  usize,
    },
    /// An expression used as a statement.
    Expression {
        /// The wrapped expression.
        expression: Expression,
        /// Line number in the source code.
        line:       usize,
    },
    /// `while (<condition>) { ... }`
    While {
        /// Checked before every iteration.
        condition: Expression,
        /// The loop body.
        body:      BlockStatement,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (<init>; <condition>; <update>) { ... }`
    For {
        /// Runs once before the first iteration.
        init:      Option<Box<Self>>,
        /// Checked before every iteration.
        condition: Expression,
        /// Runs after every completed iteration.
        update:    Option<Expression>,
        /// The loop body.
        body:      BlockStatement,
        /// Line number in the source code.
        line:      usize,
    },
    /// `break;`
    Break {
        /// Line number in the source code.
        line: usize,
    },
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// `!`
    Bang,
    /// `-`
    Minus,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every variant records the line of the token it was parsed from, so that
/// runtime errors can point at the innermost failing node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference to a binding by name.
    Identifier(Identifier),
    /// An integer literal.
    IntegerLiteral {
        /// The value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A float literal.
    FloatLiteral {
        /// The value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    BooleanLiteral {
        /// The value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, without quotes.
    StringLiteral {
        /// The value.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// The element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `{k: v, ...}`, pairs kept in source order.
    HashLiteral {
        /// Key and value expressions.
        pairs: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `!x` or `-x`.
    Prefix {
        /// The operator.
        operator: PrefixOperator,
        /// The operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `left <op> right`.
    Infix {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: InfixOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `if (c) { ... } else { ... }`.
    If {
        /// The condition.
        condition:   Box<Self>,
        /// Evaluated when the condition is truthy.
        consequence: BlockStatement,
        /// Evaluated otherwise, when present.
        alternative: Option<BlockStatement>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `fn(a, b) { ... }`.
    Function {
        /// Parameter names.
        parameters: Vec<Identifier>,
        /// The body.
        body:       BlockStatement,
        /// Line number in the source code.
        line:       usize,
    },
    /// `callee(args...)`.
    Call {
        /// The called expression.
        function:  Box<Self>,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `left[index]`.
    Index {
        /// The indexed expression.
        left:  Box<Self>,
        /// The index expression.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name = value`, rebinding an existing variable.
    Assign {
        /// The assignment target.
        name:  Identifier,
        /// The new value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `macro(a, b) { ... }`.
    Macro {
        /// Parameter names.
        parameters: Vec<Identifier>,
        /// The body.
        body:       BlockStatement,
        /// Line number in the source code.
        line:       usize,
    },
    /// A failure left in the tree by macro expansion. Evaluating it raises the
    /// stored message.
    Error {
        /// The error message.
        message: String,
        /// The line the failure is attributed to.
        line:    usize,
    },
}

impl Expression {
    /// Gets the line number from `self`.
    ///
    /// # Example
    /// ```
    /// use marmoset::ast::Expression;
    ///
    /// let expr = Expression::IntegerLiteral { value: 1,
    ///                                         line:  5, };
    ///
    /// assert_eq!(expr.line(), 5);
    /// ```
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Identifier(identifier) => identifier.line,
            Self::IntegerLiteral { line, .. }
            | Self::FloatLiteral { line, .. }
            | Self::BooleanLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::HashLiteral { line, .. }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::If { line, .. }
            | Self::Function { line, .. }
            | Self::Call { line, .. }
            | Self::Index { line, .. }
            | Self::Assign { line, .. }
            | Self::Macro { line, .. }
            | Self::Error { line, .. } => *line,
        }
    }

    /// Returns `true` for expressions that end in a block and therefore do not
    /// need a `;` when used as a statement.
    #[must_use]
    pub const fn is_block_like(&self) -> bool {
        matches!(self, Self::If { .. } | Self::Function { .. } | Self::Macro { .. })
    }
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Let { line, .. }
            | Self::Return { line, .. }
            | Self::Expression { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Break { line } => *line,
        }
    }
}

impl From<Identifier> for Expression {
    fn from(identifier: Identifier) -> Self {
        Self::Identifier(identifier)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Bang => "!",
                        Self::Minus => "-",
                    })
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Plus => "+",
                        Self::Minus => "-",
                        Self::Asterisk => "*",
                        Self::Slash => "/",
                        Self::Lt => "<",
                        Self::Gt => ">",
                        Self::LtEq => "<=",
                        Self::GtEq => ">=",
                        Self::Eq => "==",
                        Self::NotEq => "!=",
                    })
    }
}

/// Formats a float so that it reads back as a float literal.
///
/// # Example
/// ```
/// use marmoset::ast::format_float;
///
/// assert_eq!(format_float(3.0), "3.0");
/// assert_eq!(format_float(0.25), "0.25");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Prints the statements only; callers add the braces they need.
impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Statement {
    /// Writes the statement without its trailing `;`, as needed inside a `for`
    /// header.
    fn fmt_clause(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value}"),
            Self::Expression { expression, .. } => write!(f, "{expression}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expression, .. } => write!(f, "{expression};"),
            Self::While { condition, body, .. } => write!(f, "while ({condition}) {{ {body} }}"),
            Self::For { init,
                        condition,
                        update,
                        body,
                        .. } => {
                f.write_str("for (")?;
                if let Some(init) = init {
                    init.fmt_clause(f)?;
                }
                write!(f, "; {condition}; ")?;
                if let Some(update) = update {
                    write!(f, "{update}")?;
                }
                write!(f, ") {{ {body} }}")
            },
            Self::Break { .. } => f.write_str("break;"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::FloatLiteral { value, .. } => f.write_str(&format_float(*value)),
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => write!(f, "\"{value}\""),
            Self::ArrayLiteral { elements, .. } => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            },
            Self::HashLiteral { pairs, .. } => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            },
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { left,
                          operator,
                          right,
                          .. } => write!(f, "({left} {operator} {right})"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if ({condition}) {{ {consequence} }}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {alternative} }}")?;
                }
                Ok(())
            },
            Self::Function { parameters, body, .. } => {
                f.write_str("fn(")?;
                write_joined(f, parameters)?;
                write!(f, ") {{ {body} }}")
            },
            Self::Macro { parameters, body, .. } => {
                f.write_str("macro(")?;
                write_joined(f, parameters)?;
                write!(f, ") {{ {body} }}")
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "{function}(")?;
                write_joined(f, arguments)?;
                f.write_str(")")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::Assign { name, value, .. } => write!(f, "({name} = {value})"),
            Self::Error { message, .. } => write!(f, "ERROR({message})"),
        }
    }
}
