//! Expression parsing: the precedence-climbing loop and the prefix and
//! infix productions it dispatches to.

use tam_diagnostic::ErrorCode;
use tam_ir::{Expression, FunctionLiteral, Identifier, InfixOperator, PrefixOperator, TokenKind};
use tam_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{Parser, Precedence};

impl Parser<'_> {
    /// Parse an expression starting at the current token, folding in infix
    /// operators that bind tighter than `precedence`.
    ///
    /// Leaves the cursor on the expression's last token.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expression> {
        let kind = self.current_kind();
        let Some(prefix) = self.prefix_fns.get(&kind).copied() else {
            let span = self.current().span;
            self.error_at(
                ErrorCode::E1002,
                span,
                format!("no prefix parse function for <{kind}>"),
            );
            return None;
        };
        trace!(%kind, "prefix");

        let mut left = prefix(self)?;

        while precedence < self.peek_precedence() {
            let kind = self.cursor.peek_kind();
            let Some(infix) = self.infix_fns.get(&kind).copied() else {
                return Some(left);
            };
            trace!(%kind, "infix");

            self.advance();
            left = infix(self, left)?;
        }

        Some(left)
    }

    // --- Prefix productions ---

    pub(crate) fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(self.current().clone())))
    }

    pub(crate) fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { token, value }),
            Err(_) => {
                self.error_at(
                    ErrorCode::E0003,
                    token.span,
                    format!("could not parse <{}> as integer", token.literal),
                );
                None
            }
        }
    }

    pub(crate) fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        let value = token.literal.clone();
        Some(Expression::String { token, value })
    }

    pub(crate) fn parse_boolean_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        let value = token.kind == TokenKind::True;
        Some(Expression::Boolean { token, value })
    }

    pub(crate) fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        let operator = PrefixOperator::from_token(token.kind)?;
        self.advance();

        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    pub(crate) fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(
            TokenKind::RParen,
            "expected <)> token following grouped expression",
        )?;
        Some(expr)
    }

    pub(crate) fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current().clone();

        self.expect_peek(TokenKind::LParen, "expected <(> token following <if>")?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen, "expected <)> token following if condition")?;
        self.expect_peek(TokenKind::LBrace, "expected <{> token following <)>")?;
        let consequence = self.parse_block_statement();

        let alternative = if self.check_peek(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace, "expected <{> token following <else>")?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    pub(crate) fn parse_function_literal(&mut self) -> Option<Expression> {
        self.parse_callable_literal("fn").map(Expression::Function)
    }

    pub(crate) fn parse_macro_literal(&mut self) -> Option<Expression> {
        self.parse_callable_literal("macro").map(Expression::Macro)
    }

    /// `keyword(a, b) { body }` for both `fn` and `macro`.
    fn parse_callable_literal(&mut self, keyword: &str) -> Option<FunctionLiteral> {
        let token = self.current().clone();

        self.expect_peek(
            TokenKind::LParen,
            &format!("expected <(> token following <{keyword}>"),
        )?;
        let parameters = self.parse_parameters()?;

        self.expect_peek(TokenKind::LBrace, "expected <{> token following <)>")?;
        let body = self.parse_block_statement();

        Some(FunctionLiteral::new(token, parameters, body))
    }

    /// Parameters after the current `(`. Leaves the cursor on the `)`.
    fn parse_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();
        if self.check_peek(TokenKind::RParen) {
            self.advance();
            return Some(parameters);
        }

        self.expect_peek(TokenKind::Ident, "expected <IDENT> token in parameter list")?;
        parameters.push(Identifier::new(self.current().clone()));

        while self.check_peek(TokenKind::Comma) {
            self.advance();
            self.expect_peek(TokenKind::Ident, "expected <IDENT> token in parameter list")?;
            parameters.push(Identifier::new(self.current().clone()));
        }

        self.expect_peek(
            TokenKind::RParen,
            "expected <)> token following function parameters",
        )?;
        Some(parameters)
    }

    pub(crate) fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        let elements = self.parse_expression_list(
            TokenKind::RBracket,
            "expected <]> token following array elements",
        )?;
        Some(Expression::Array { token, elements })
    }

    pub(crate) fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current().clone();
        let mut pairs = Vec::new();

        while !self.check_peek(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon, "expected <:> token following hash key")?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.check_peek(TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.expect_peek(TokenKind::RBrace, "expected <}> token following hash pairs")?;
        Some(Expression::Hash { token, pairs })
    }

    // --- Infix productions ---

    pub(crate) fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current().clone();
        let operator = InfixOperator::from_token(token.kind)?;
        let precedence = self.current_precedence();
        self.advance();

        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub(crate) fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current().clone();
        let arguments = self.parse_expression_list(
            TokenKind::RParen,
            "expected <)> token following call arguments",
        )?;
        Some(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    pub(crate) fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current().clone();
        self.advance();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(
            TokenKind::RBracket,
            "expected <]> token following index expression",
        )?;
        Some(Expression::Index {
            token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    /// Comma-separated expressions after the current opener, up to `end`.
    /// Leaves the cursor on `end`.
    fn parse_expression_list(&mut self, end: TokenKind, message: &str) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.check_peek(end) {
            self.advance();
            return Some(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.check_peek(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end, message)?;
        Some(list)
    }
}
