use crate::{
    ast::{Expression, Identifier, InfixOperator, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, Precedence},
    },
};

/// Parses the expression starting at the current token.
type PrefixParseFn<I> = fn(&mut Parser<I>) -> ParseResult<Expression>;
/// Continues an expression whose left side is already parsed. The current
/// token is the operator.
type InfixParseFn<I> = fn(&mut Parser<I>, Expression) -> ParseResult<Expression>;

impl<I> Parser<I>
    where I: Iterator<Item = Token>
{
    /// Parses an expression whose operators bind tighter than `precedence`.
    ///
    /// On success the current token is the last token of the expression.
    ///
    /// # Errors
    /// Fails when a token cannot start an expression, or when a nested
    /// construct is malformed.
    pub fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let Some(prefix) = Self::prefix_rule(self.current.kind) else {
            self.unparsed_brace = self.current_is(TokenKind::RBrace);
            return Err(ParseError::new(format!("no prefix parse function for {} found",
                                               self.current.kind),
                                       self.current.line));
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_rule(self.peek.kind) else {
                return Ok(left);
            };
            self.advance();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn prefix_rule(kind: TokenKind) -> Option<PrefixParseFn<I>> {
        let rule: PrefixParseFn<I> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::Float => Self::parse_float_literal,
            TokenKind::String => Self::parse_string_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LParen => Self::parse_grouped_expression,
            TokenKind::If => Self::parse_if_expression,
            TokenKind::Function => Self::parse_function_literal,
            TokenKind::Macro => Self::parse_macro_literal,
            TokenKind::LBracket => Self::parse_array_literal,
            TokenKind::LBrace => Self::parse_hash_literal,
            _ => return None,
        };
        Some(rule)
    }

    fn infix_rule(kind: TokenKind) -> Option<InfixParseFn<I>> {
        let rule: InfixParseFn<I> = match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq => Self::parse_infix_expression,
            TokenKind::LParen => Self::parse_call_expression,
            TokenKind::LBracket => Self::parse_index_expression,
            TokenKind::Assign => Self::parse_assign_expression,
            _ => return None,
        };
        Some(rule)
    }

    fn parse_identifier(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Identifier(Identifier { name: self.current.literal.clone(),
                                               line: self.current.line, }))
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let value = self.current.literal.parse::<i64>().map_err(|_| {
                                                           ParseError::new(format!("could not parse {} as integer",
                                                                                   self.current.literal),
                                                                           self.current.line)
                                                       })?;
        Ok(Expression::IntegerLiteral { value,
                                        line: self.current.line })
    }

    fn parse_float_literal(&mut self) -> ParseResult<Expression> {
        let value = self.current.literal.parse::<f64>().map_err(|_| {
                                                           ParseError::new(format!("could not parse {} as float",
                                                                                   self.current.literal),
                                                                           self.current.line)
                                                       })?;
        Ok(Expression::FloatLiteral { value,
                                      line: self.current.line })
    }

    fn parse_string_literal(&mut self) -> ParseResult<Expression> {
        Ok(Expression::StringLiteral { value: self.current.literal.clone(),
                                       line:  self.current.line, })
    }

    fn parse_boolean(&mut self) -> ParseResult<Expression> {
        Ok(Expression::BooleanLiteral { value: self.current_is(TokenKind::True),
                                        line:  self.current.line, })
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        let operator = if self.current_is(TokenKind::Bang) {
            PrefixOperator::Bang
        } else {
            PrefixOperator::Minus
        };
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix { operator,
                                right: Box::new(right),
                                line })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let line = self.current.line;
        let operator = match self.current.kind {
            TokenKind::Plus => InfixOperator::Plus,
            TokenKind::Minus => InfixOperator::Minus,
            TokenKind::Asterisk => InfixOperator::Asterisk,
            TokenKind::Slash => InfixOperator::Slash,
            TokenKind::Eq => InfixOperator::Eq,
            TokenKind::NotEq => InfixOperator::NotEq,
            TokenKind::Lt => InfixOperator::Lt,
            TokenKind::Gt => InfixOperator::Gt,
            TokenKind::LtEq => InfixOperator::LtEq,
            TokenKind::GtEq => InfixOperator::GtEq,
            other => {
                return Err(ParseError::new(format!("{other} is not an infix operator"), line));
            },
        };
        let precedence = Precedence::of(self.current.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix { left: Box::new(left),
                               operator,
                               right: Box::new(right),
                               line })
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    /// `if (<condition>) { ... } else { ... }`
    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Expression::If { condition: Box::new(condition),
                            consequence,
                            alternative,
                            line })
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expression::Function { parameters,
                                  body,
                                  line })
    }

    fn parse_macro_literal(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expression::Macro { parameters,
                               body,
                               line })
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Ok(Expression::ArrayLiteral { elements, line })
    }

    /// `{ <key>: <value>, ... }`, an empty hash and a trailing comma allowed.
    fn parse_hash_literal(&mut self) -> ParseResult<Expression> {
        let line = self.current.line;
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RBrace)?;

        Ok(Expression::HashLiteral { pairs, line })
    }

    fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let line = self.current.line;
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Ok(Expression::Call { function: Box::new(function),
                              arguments,
                              line })
    }

    fn parse_index_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let line = self.current.line;
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Ok(Expression::Index { left: Box::new(left),
                               index: Box::new(index),
                               line })
    }

    /// `<ident> = <value>`. The right side is parsed at the lowest precedence,
    /// so assignments chain to the right.
    fn parse_assign_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let line = self.current.line;
        let Expression::Identifier(name) = left else {
            return Err(ParseError::new(format!("expected valid identifier. got={left}"), line));
        };
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Expression::Assign { name,
                                value: Box::new(value),
                                line })
    }
}
