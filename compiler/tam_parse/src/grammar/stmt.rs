//! Statement parsing.

use tam_ir::{BlockStatement, Identifier, Statement, TokenKind};

use crate::{Parser, Precedence};

impl Parser<'_> {
    /// Parse one statement starting at the current token.
    ///
    /// Leaves the cursor on the statement's last token (its `;` if present).
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current().clone();

        self.expect_peek(TokenKind::Ident, "expected <IDENT> token following <let>")?;
        let name = Identifier::new(self.current().clone());

        self.expect_peek(TokenKind::Assign, "expected <=> token following <IDENT>")?;
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current().clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current().clone();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Some(Statement::Expression { token, expression })
    }

    /// Parse statements after the current `{` up to the matching `}` or end
    /// of input. Leaves the cursor on the `}`.
    pub(crate) fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current().clone();
        let mut statements = Vec::new();
        self.advance();

        while !self.check_current(TokenKind::RBrace) && !self.check_current(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }

        BlockStatement::new(token, statements)
    }

    fn skip_semicolon(&mut self) {
        if self.check_peek(TokenKind::Semicolon) {
            self.advance();
        }
    }
}
