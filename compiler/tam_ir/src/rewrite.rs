//! Post-order tree rewriting.
//!
//! Rewriting consumes a node and returns a new owned subtree. Every
//! structural child is rewritten first, then the matching `Rewriter` hook is
//! applied to the rebuilt node and its return value becomes the replacement.
//!
//! # Example
//!
//! ```text
//! struct OneToTwo;
//!
//! impl Rewriter for OneToTwo {
//!     fn rewrite_expression(&mut self, expr: Expression) -> Expression {
//!         match expr {
//!             Expression::Integer { value: 1, .. } => Expression::integer(2),
//!             other => other,
//!         }
//!     }
//! }
//!
//! let program = program.rewrite(&mut OneToTwo);
//! ```

use std::rc::Rc;

use tam_stack::ensure_sufficient_stack;

use crate::ast::{BlockStatement, Expression, FunctionLiteral, Identifier, Node, Program, Statement};

/// Node replacement hooks.
///
/// All hooks default to the identity. `rewrite_identifier` sees identifiers
/// in binding position only (let names, parameters); identifiers used as
/// expressions reach `rewrite_expression`.
pub trait Rewriter {
    fn rewrite_program(&mut self, program: Program) -> Program {
        program
    }

    fn rewrite_statement(&mut self, stmt: Statement) -> Statement {
        stmt
    }

    fn rewrite_block(&mut self, block: BlockStatement) -> BlockStatement {
        block
    }

    fn rewrite_expression(&mut self, expr: Expression) -> Expression {
        expr
    }

    fn rewrite_identifier(&mut self, ident: Identifier) -> Identifier {
        ident
    }
}

/// A node that can be rewritten.
pub trait Rewrite: Sized {
    #[must_use]
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self;
}

/// Rewrite any node.
pub fn rewrite<R: Rewriter + ?Sized>(node: Node, rewriter: &mut R) -> Node {
    node.rewrite(rewriter)
}

/// Rewrite every expression under `node` with `f`, post-order.
pub fn rewrite_expressions<N, F>(node: N, f: F) -> N
where
    N: Rewrite,
    F: FnMut(Expression) -> Expression,
{
    node.rewrite(&mut ExpressionFn(f))
}

struct ExpressionFn<F>(F);

impl<F: FnMut(Expression) -> Expression> Rewriter for ExpressionFn<F> {
    fn rewrite_expression(&mut self, expr: Expression) -> Expression {
        (self.0)(expr)
    }
}

impl Rewrite for Node {
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self {
        match self {
            Node::Program(program) => Node::Program(program.rewrite(rewriter)),
            Node::Statement(stmt) => Node::Statement(stmt.rewrite(rewriter)),
            Node::Expression(expr) => Node::Expression(expr.rewrite(rewriter)),
        }
    }
}

impl Rewrite for Program {
    fn rewrite<R: Rewriter + ?Sized>(mut self, rewriter: &mut R) -> Self {
        let statements = rewrite_all(std::mem::take(&mut self.statements), rewriter);
        rewriter.rewrite_program(Program { statements })
    }
}

impl Rewrite for Statement {
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self {
        let stmt = ensure_sufficient_stack(|| match self {
            Statement::Let { token, name, value } => Statement::Let {
                token,
                name: rewriter.rewrite_identifier(name),
                value: value.rewrite(rewriter),
            },
            Statement::Return { token, value } => Statement::Return {
                token,
                value: value.rewrite(rewriter),
            },
            Statement::Expression { expression, .. } => {
                Statement::from_expression(expression.rewrite(rewriter))
            }
            Statement::Block(block) => Statement::Block(block.rewrite(rewriter)),
        });
        rewriter.rewrite_statement(stmt)
    }
}

impl Rewrite for BlockStatement {
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self {
        let statements = rewrite_all(self.statements, rewriter);
        rewriter.rewrite_block(BlockStatement {
            token: self.token,
            statements,
        })
    }
}

impl Rewrite for Expression {
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self {
        ensure_sufficient_stack(|| {
            let expr = match self {
                leaf @ (Expression::Identifier(_)
                | Expression::Integer { .. }
                | Expression::Boolean { .. }
                | Expression::String { .. }) => leaf,
                Expression::Array { token, elements } => Expression::Array {
                    token,
                    elements: rewrite_all(elements, rewriter),
                },
                Expression::Hash { token, pairs } => Expression::Hash {
                    token,
                    pairs: pairs
                        .into_iter()
                        .map(|(key, value)| (key.rewrite(rewriter), value.rewrite(rewriter)))
                        .collect(),
                },
                Expression::Function(lit) => Expression::Function(lit.rewrite(rewriter)),
                Expression::Macro(lit) => Expression::Macro(lit.rewrite(rewriter)),
                Expression::Call {
                    token,
                    function,
                    arguments,
                } => Expression::Call {
                    token,
                    function: Box::new(function.rewrite(rewriter)),
                    arguments: rewrite_all(arguments, rewriter),
                },
                Expression::Index { token, left, index } => Expression::Index {
                    token,
                    left: Box::new(left.rewrite(rewriter)),
                    index: Box::new(index.rewrite(rewriter)),
                },
                Expression::Prefix {
                    token,
                    operator,
                    right,
                } => Expression::Prefix {
                    token,
                    operator,
                    right: Box::new(right.rewrite(rewriter)),
                },
                Expression::Infix {
                    token,
                    left,
                    operator,
                    right,
                } => Expression::Infix {
                    token,
                    left: Box::new(left.rewrite(rewriter)),
                    operator,
                    right: Box::new(right.rewrite(rewriter)),
                },
                Expression::If {
                    token,
                    condition,
                    consequence,
                    alternative,
                } => Expression::If {
                    token,
                    condition: Box::new(condition.rewrite(rewriter)),
                    consequence: consequence.rewrite(rewriter),
                    alternative: alternative.map(|alt| alt.rewrite(rewriter)),
                },
            };
            rewriter.rewrite_expression(expr)
        })
    }
}

impl Rewrite for FunctionLiteral {
    /// Parameters and body are shared with any closure built from this
    /// literal, so they are copied out before rewriting.
    fn rewrite<R: Rewriter + ?Sized>(self, rewriter: &mut R) -> Self {
        let parameters: Rc<[Identifier]> = self
            .parameters
            .iter()
            .cloned()
            .map(|param| rewriter.rewrite_identifier(param))
            .collect();
        let body = Rc::unwrap_or_clone(self.body).rewrite(rewriter);
        FunctionLiteral {
            token: self.token,
            parameters,
            body: Rc::new(body),
        }
    }
}

fn rewrite_all<T: Rewrite, R: Rewriter + ?Sized>(items: Vec<T>, rewriter: &mut R) -> Vec<T> {
    items.into_iter().map(|item| item.rewrite(rewriter)).collect()
}
