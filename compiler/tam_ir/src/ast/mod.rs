//! Syntax tree for Tamarin programs.
//!
//! Every node renders canonical source text through `Display` (prefix,
//! infix and index forms fully parenthesized) and exposes the lexeme of the
//! token that introduced it through `token_literal()`.

mod expr;
mod operators;
mod stmt;
mod teardown;

use std::fmt;

pub use expr::{Expression, FunctionLiteral};
pub use operators::{InfixOperator, PrefixOperator};
pub use stmt::{BlockStatement, Statement};

use crate::Token;
use teardown::teardown;

/// A name, in binding position (`let x`, parameters) or as an expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Identifier { token, value }
    }

    pub fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A whole parsed program.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }

    /// Lexeme of the first statement's token, or `""` for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements.first().map_or("", Statement::token_literal)
    }
}

/// Programs can nest deeper than the native stack allows a recursive drop
/// to go, so the tree is taken apart iteratively.
impl Drop for Program {
    fn drop(&mut self) {
        teardown(std::mem::take(&mut self.statements));
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// Any node: the generic entry point for rewriting and evaluation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl Node {
    pub fn token_literal(&self) -> &str {
        match self {
            Node::Program(program) => program.token_literal(),
            Node::Statement(stmt) => stmt.token_literal(),
            Node::Expression(expr) => expr.token_literal(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(program) => fmt::Display::fmt(program, f),
            Node::Statement(stmt) => fmt::Display::fmt(stmt, f),
            Node::Expression(expr) => fmt::Display::fmt(expr, f),
        }
    }
}

impl From<Program> for Node {
    fn from(program: Program) -> Self {
        Node::Program(program)
    }
}

impl From<Statement> for Node {
    fn from(stmt: Statement) -> Self {
        Node::Statement(stmt)
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        Node::Expression(expr)
    }
}

/// Join displayable items with `", "`.
pub(crate) fn write_comma_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
