//! Iterative teardown of syntax trees.

use std::rc::Rc;

use super::{Expression, FunctionLiteral, Statement};

/// Drop `statements` and everything under them without recursing.
///
/// Each node is unpacked onto a worklist before it is released, so by the
/// time a node drops its children have already been moved out. Function
/// bodies still shared with a closure are left to their other owners.
pub(crate) fn teardown(statements: Vec<Statement>) {
    let mut worklist = Worklist {
        statements,
        expressions: Vec::new(),
    };
    loop {
        if let Some(stmt) = worklist.statements.pop() {
            worklist.unpack_statement(stmt);
        } else if let Some(expr) = worklist.expressions.pop() {
            worklist.unpack_expression(expr);
        } else {
            break;
        }
    }
}

struct Worklist {
    statements: Vec<Statement>,
    expressions: Vec<Expression>,
}

impl Worklist {
    fn unpack_statement(&mut self, stmt: Statement) {
        match stmt {
            Statement::Let { value, .. } | Statement::Return { value, .. } => {
                self.expressions.push(value);
            }
            Statement::Expression { expression, .. } => self.expressions.push(expression),
            Statement::Block(block) => self.statements.extend(block.statements),
        }
    }

    fn unpack_expression(&mut self, expr: Expression) {
        match expr {
            Expression::Identifier(_)
            | Expression::Integer { .. }
            | Expression::Boolean { .. }
            | Expression::String { .. } => {}
            Expression::Array { elements, .. } => self.expressions.extend(elements),
            Expression::Hash { pairs, .. } => {
                for (key, value) in pairs {
                    self.expressions.push(key);
                    self.expressions.push(value);
                }
            }
            Expression::Function(lit) | Expression::Macro(lit) => self.unpack_literal(lit),
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                self.expressions.push(*function);
                self.expressions.extend(arguments);
            }
            Expression::Index { left, index, .. } => {
                self.expressions.push(*left);
                self.expressions.push(*index);
            }
            Expression::Prefix { right, .. } => self.expressions.push(*right),
            Expression::Infix { left, right, .. } => {
                self.expressions.push(*left);
                self.expressions.push(*right);
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                self.expressions.push(*condition);
                self.statements.extend(consequence.statements);
                if let Some(alternative) = alternative {
                    self.statements.extend(alternative.statements);
                }
            }
        }
    }

    fn unpack_literal(&mut self, lit: FunctionLiteral) {
        if let Some(body) = Rc::into_inner(lit.body) {
            self.statements.extend(body.statements);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BlockStatement, PrefixOperator, Program};
    use crate::{Token, TokenKind};

    fn negate(expr: Expression) -> Expression {
        Expression::Prefix {
            token: Token::synthetic(TokenKind::Minus, "-"),
            operator: PrefixOperator::Minus,
            right: Box::new(expr),
        }
    }

    #[test]
    fn test_deep_program_drops_without_overflow() {
        let mut expr = Expression::integer(1);
        for _ in 0..200_000 {
            expr = negate(expr);
        }
        drop(Program::new(vec![Statement::from_expression(expr)]));
    }

    #[test]
    fn test_shared_function_body_survives_teardown() {
        let lit = FunctionLiteral::new(
            Token::synthetic(TokenKind::Function, "fn"),
            vec![],
            BlockStatement::new(
                Token::synthetic(TokenKind::LBrace, "{"),
                vec![Statement::from_expression(Expression::integer(7))],
            ),
        );
        let body = Rc::clone(&lit.body);

        drop(Program::new(vec![Statement::from_expression(
            Expression::Function(lit),
        )]));

        assert_eq!(body.to_string(), "7");
        assert_eq!(Rc::strong_count(&body), 1);
    }
}
