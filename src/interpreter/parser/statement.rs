use crate::{
    ast::{BlockStatement, Identifier, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, Precedence},
    },
};

/// Where [`Parser::parse_statement_or_recover`] left the parser.
pub(super) enum Recovery {
    /// A parsed statement; the current token is its last token.
    Statement(Statement),
    /// An empty or broken statement; the current token is its last token.
    Skipped,
    /// A broken statement that ran into a `}` it could not parse. The
    /// current token is that `}`, still unconsumed.
    StoppedAtBrace,
}

impl<I> Parser<I>
    where I: Iterator<Item = Token>
{
    /// Parses one statement, or records its error and skips past it.
    ///
    /// Stray `;` tokens are empty statements and produce nothing.
    pub(super) fn parse_statement_or_recover(&mut self) -> Recovery {
        if self.current_is(TokenKind::Semicolon) {
            return Recovery::Skipped;
        }
        match self.parse_statement() {
            Ok(statement) => Recovery::Statement(statement),
            Err(error) => {
                self.record(error);
                if std::mem::take(&mut self.unparsed_brace) {
                    return Recovery::StoppedAtBrace;
                }
                self.synchronize();
                Recovery::Skipped
            },
        }
    }

    /// Parses a single statement starting at the current token.
    ///
    /// On success the current token is the last token of the statement,
    /// including any `;` that terminated it.
    ///
    /// # Errors
    /// Returns the first problem found inside the statement.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Break => self.parse_break_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses a `{ ... }` block. The current token must be `{`; on success it
    /// is the matching `}`.
    ///
    /// # Errors
    /// Fails when the input ends before the block is closed.
    pub fn parse_block(&mut self) -> ParseResult<BlockStatement> {
        let line = self.current.line;
        let mut statements = Vec::new();
        self.advance();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                return Err(ParseError::new(format!("expected next token to be {}, got {} instead",
                                                   TokenKind::RBrace,
                                                   TokenKind::Eof),
                                           self.current.line));
            }
            match self.parse_statement_or_recover() {
                Recovery::Statement(statement) => statements.push(statement),
                Recovery::Skipped => {},
                Recovery::StoppedAtBrace => continue,
            }
            self.advance();
        }

        Ok(BlockStatement { statements, line })
    }

    /// Skips to the end of a broken statement.
    ///
    /// Stops on the last `;` of a run of semicolons, or just before a `}` or
    /// the end of input, so that the caller's `advance` lands on the next
    /// statement.
    fn synchronize(&mut self) {
        while !self.current_is(TokenKind::Semicolon)
              && !self.peek_is(TokenKind::Semicolon)
              && !self.peek_is(TokenKind::RBrace)
              && !self.peek_is(TokenKind::Eof)
        {
            self.advance();
        }
        self.skip_semicolons();
    }

    fn skip_semicolons(&mut self) {
        while self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Accepts `;` (any number of them), or an upcoming `}` or end of input.
    fn expect_terminator(&mut self) -> ParseResult<()> {
        if self.peek_is(TokenKind::Semicolon) {
            self.skip_semicolons();
            Ok(())
        } else if self.peek_is(TokenKind::RBrace) || self.peek_is(TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.peek_error(TokenKind::Semicolon))
        }
    }

    /// `let <ident> = <expr>` without the terminator.
    fn parse_let_binding(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier { name: self.current.literal.clone(),
                                line: self.current.line, };
        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Statement::Let { name, value, line })
    }

    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let statement = self.parse_let_binding()?;
        self.expect_terminator()?;
        Ok(statement)
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_terminator()?;

        Ok(Statement::Return { value, line })
    }

    fn parse_break_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.expect_terminator()?;
        Ok(Statement::Break { line })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        let expression = self.parse_expression(Precedence::Lowest)?;

        if expression.is_block_like() {
            self.skip_semicolons();
        } else {
            self.expect_terminator()?;
        }

        Ok(Statement::Expression { expression, line })
    }

    /// `while (<condition>) { ... }`
    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;
        self.skip_semicolons();

        Ok(Statement::While { condition, body, line })
    }

    /// `for (<init>; <condition>; <update>) { ... }`
    ///
    /// `init` is either a `let` binding or an expression; `init` and `update`
    /// may be left empty, the condition may not.
    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        self.advance();

        let init = if self.current_is(TokenKind::Semicolon) {
            None
        } else {
            let init = self.parse_for_init()?;
            self.expect_peek(TokenKind::Semicolon)?;
            Some(Box::new(init))
        };
        self.advance();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Semicolon)?;
        self.advance();

        let update = if self.current_is(TokenKind::RParen) {
            None
        } else {
            let update = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::RParen)?;
            Some(update)
        };

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;
        self.skip_semicolons();

        Ok(Statement::For { init,
                            condition,
                            update,
                            body,
                            line })
    }

    fn parse_for_init(&mut self) -> ParseResult<Statement> {
        if self.current_is(TokenKind::Let) {
            return self.parse_let_binding();
        }
        let line = self.current.line;
        let expression = self.parse_expression(Precedence::Lowest)?;
        Ok(Statement::Expression { expression, line })
    }
}
