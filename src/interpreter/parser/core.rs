use log::debug;

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::statement::Recovery,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Binding power of an operator, weakest first.
///
/// `Assign` sits between `Prefix` and `Call`: `a + b = c` parses as
/// `a + (b = c)`, and the right side of an assignment is parsed at `Lowest`, so
/// `x = x + 1` assigns the whole sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Anything binds tighter than this.
    Lowest,
    /// `==` and `!=`.
    Equals,
    /// `<`, `>`, `<=` and `>=`.
    LessGreater,
    /// `+` and `-`.
    Sum,
    /// `*` and `/`.
    Product,
    /// `-x` and `!x`.
    Prefix,
    /// `x = value`.
    Assign,
    /// `f(x)`.
    Call,
    /// `a[i]`.
    Index,
}

impl Precedence {
    /// The binding power of `kind` in infix position.
    #[must_use]
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Self::Equals,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::Assign => Self::Assign,
            TokenKind::LParen => Self::Call,
            TokenKind::LBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

/// A Pratt parser over any token source.
///
/// The parser looks at two tokens at a time: `current`, the token being
/// parsed, and `peek`, the one after it. Once the source runs dry both settle
/// on an `Eof` token.
pub struct Parser<I>
    where I: Iterator<Item = Token>
{
    tokens:                    I,
    pub(super) current:        Token,
    pub(super) peek:           Token,
    /// Set when an expression could not start at a `}`, which is left
    /// unconsumed for the enclosing block.
    pub(super) unparsed_brace: bool,
    last_line:                 usize,
    errors:                    Vec<ParseError>,
}

impl<I> Parser<I>
    where I: Iterator<Item = Token>
{
    /// Creates a parser and primes the two-token window.
    pub fn new(tokens: I) -> Self {
        let eof = Token::new(TokenKind::Eof, "", 1);
        let mut parser = Self { tokens,
                                current: eof.clone(),
                                peek: eof,
                                unparsed_brace: false,
                                last_line: 1,
                                errors: Vec::new() };
        parser.advance();
        parser.advance();
        parser
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is dropped, its error recorded, and
    /// parsing resumes after the next `;`.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            if let Recovery::Statement(statement) = self.parse_statement_or_recover() {
                program.statements.push(statement);
            }
            self.advance();
        }

        debug!("parsed {} statement(s) with {} error(s)",
               program.statements.len(),
               self.errors.len());
        program
    }

    /// The errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser and returns the collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub(super) fn record(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Moves the window one token forward.
    pub(super) fn advance(&mut self) {
        let next = match self.tokens.next() {
            Some(token) => {
                self.last_line = token.line;
                token
            },
            None => Token::new(TokenKind::Eof, "", self.last_line),
        };
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(super) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(super) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    pub(super) const fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    /// The error for a `peek` token that is not `expected`.
    pub(super) fn peek_error(&self, expected: TokenKind) -> ParseError {
        ParseError::new(format!("expected next token to be {expected}, got {} instead",
                                self.peek.kind),
                        self.peek.line)
    }

    /// Advances if `peek` is `expected`, fails otherwise.
    pub(super) fn expect_peek(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.peek_is(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.peek_error(expected))
        }
    }
}
