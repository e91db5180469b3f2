//! `quote` and `unquote`.
//!
//! `quote(expr)` yields its argument unevaluated, except that every
//! `unquote(x)` inside it is evaluated in the current environment and the
//! result converted back into syntax.

use std::rc::Rc;

use tam_ir::{Expression, Rewrite, Rewriter};

use super::Interpreter;
use crate::environment::Environment;
use crate::errors;
use crate::object::Object;

impl Interpreter {
    pub(super) fn eval_quote(&self, argument: &Expression, env: &Environment) -> Object {
        let mut unquoter = Unquoter {
            interpreter: self,
            env,
            error: None,
        };
        let node = argument.clone().rewrite(&mut unquoter);
        match unquoter.error {
            Some(err) => err,
            None => Object::Quote(Rc::new(node)),
        }
    }
}

/// Replaces `unquote(x)` calls with the syntax for the value of `x`.
///
/// The first failure is kept and later calls are left alone.
struct Unquoter<'a> {
    interpreter: &'a Interpreter,
    env: &'a Environment,
    error: Option<Object>,
}

impl Rewriter for Unquoter<'_> {
    fn rewrite_expression(&mut self, expr: Expression) -> Expression {
        if self.error.is_some() {
            return expr;
        }
        let Expression::Call {
            function,
            arguments,
            ..
        } = &expr
        else {
            return expr;
        };
        let [argument] = arguments.as_slice() else {
            return expr;
        };
        if function.as_identifier() != Some("unquote") {
            return expr;
        }

        let value = self.interpreter.eval_expression(argument, self.env);
        match object_to_expression(&value) {
            Ok(node) => node,
            Err(err) => {
                self.error = Some(err);
                expr
            }
        }
    }
}

/// Syntax that evaluates back to `value`.
fn object_to_expression(value: &Object) -> Result<Expression, Object> {
    match value {
        Object::Integer(value) => Ok(Expression::integer(*value)),
        Object::Boolean(value) => Ok(Expression::boolean(*value)),
        Object::String(value) => Ok(Expression::string(&**value)),
        Object::Quote(node) => Ok(Expression::clone(node)),
        Object::Error(_) => Err(value.clone()),
        _ => Err(errors::unquote_unsupported(value)),
    }
}
