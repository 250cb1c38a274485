use crate::{
    ast::{Expression, Identifier},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, Precedence},
    },
};

impl<I> Parser<I>
    where I: Iterator<Item = Token>
{
    /// Parses a comma-separated list of expressions until `closing`.
    ///
    /// Shared by array literals and call arguments. The current token is the
    /// opening delimiter; on success it is `closing`. An immediately following
    /// `closing` produces an empty list. A single malformed element fails the
    /// whole list.
    ///
    /// Grammar (simplified): `list := (expression ("," expression)*)?`
    pub(in crate::interpreter::parser) fn parse_expression_list(&mut self,
                                                                closing: TokenKind)
                                                                -> ParseResult<Vec<Expression>> {
        let mut items = Vec::new();
        if self.peek_is(closing) {
            self.advance();
            return Ok(items);
        }

        self.advance();
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(closing)?;

        Ok(items)
    }

    /// Parses `(a, b, c)` for function and macro literals. The current token is
    /// `(`; on success it is `)`.
    pub(in crate::interpreter::parser) fn parse_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current_identifier());
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current_identifier());
        }
        self.expect_peek(TokenKind::RParen)?;

        Ok(parameters)
    }

    fn current_identifier(&self) -> Identifier {
        Identifier { name: self.current.literal.clone(),
                     line: self.current.line, }
    }
}
