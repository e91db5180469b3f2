//! Statement nodes.

use std::fmt;

use super::{Expression, Identifier};
use crate::Token;

/// Statements.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Statement {
    /// `let name = value;`
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    /// `return value;`
    Return { token: Token, value: Expression },
    /// A bare expression; `token` is the expression's first token.
    Expression { token: Token, expression: Expression },
    Block(BlockStatement),
}

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Let { token, .. }
            | Statement::Return { token, .. }
            | Statement::Expression { token, .. } => token,
            Statement::Block(block) => &block.token,
        }
    }

    pub fn token_mut(&mut self) -> &mut Token {
        match self {
            Statement::Let { token, .. }
            | Statement::Return { token, .. }
            | Statement::Expression { token, .. } => token,
            Statement::Block(block) => &mut block.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    /// Wrap an expression as a statement, borrowing the expression's token.
    pub fn from_expression(expression: Expression) -> Self {
        Statement::Expression {
            token: expression.token().clone(),
            expression,
        }
    }

    pub fn is_let(&self) -> bool {
        matches!(self, Statement::Let { .. })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { token, name, value } => {
                write!(f, "{} {name} = {value};", token.literal)
            }
            Statement::Return { token, value } => write!(f, "{} {value};", token.literal),
            Statement::Expression { expression, .. } => fmt::Display::fmt(expression, f),
            Statement::Block(block) => fmt::Display::fmt(block, f),
        }
    }
}

/// A brace-delimited statement list. Renders without its braces.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BlockStatement {
    /// The `{` token.
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(token: Token, statements: Vec<Statement>) -> Self {
        BlockStatement { token, statements }
    }

    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}
