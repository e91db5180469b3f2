//! Tree-walking interpreter.
//!
//! Evaluation is total: every node evaluates to an [`Object`]. Failures are
//! `Object::Error` values that short-circuit enclosing evaluation, and
//! `return` travels upward as `Object::ReturnValue` until a function call or
//! the program boundary unwraps it.

mod operators;
mod quote;

use std::rc::Rc;

use tam_ir::{BlockStatement, Expression, FunctionLiteral, Identifier, Node, Program, Statement};
use tracing::trace;

use crate::builtins;
use crate::environment::Environment;
use crate::errors;
use crate::object::{Function, HashObject, HashPair, Object};
use crate::print_handler::{PrintHandler, SharedPrintHandler};

/// Return early with an `Object::Error`, otherwise yield the value.
macro_rules! propagate {
    ($value:expr) => {
        match $value {
            err @ Object::Error(_) => return err,
            value => value,
        }
    };
}

/// Evaluates syntax trees against environments.
///
/// The interpreter itself holds no bindings; state lives in the
/// [`Environment`] passed to each call, so one interpreter can serve
/// several independent sessions.
pub struct Interpreter {
    print_handler: SharedPrintHandler,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter whose `puts` writes to stdout.
    pub fn new() -> Self {
        Self::with_print_handler(PrintHandler::stdout())
    }

    pub fn with_print_handler(print_handler: SharedPrintHandler) -> Self {
        Interpreter { print_handler }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Evaluate any node.
    pub fn eval(&self, node: &Node, env: &Environment) -> Object {
        match node {
            Node::Program(program) => self.eval_program(program, env),
            Node::Statement(stmt) => self.eval_statement(stmt, env),
            Node::Expression(expr) => self.eval_expression(expr, env),
        }
    }

    /// Evaluate statements in order.
    ///
    /// Stops at the first error or `return`; a returned value is unwrapped.
    /// An empty program evaluates to `null`.
    pub fn eval_program(&self, program: &Program, env: &Environment) -> Object {
        let mut result = Object::Null;
        for stmt in &program.statements {
            match self.eval_statement(stmt, env) {
                Object::ReturnValue(value) => return *value,
                err @ Object::Error(_) => return err,
                value => result = value,
            }
        }
        result
    }

    /// Like [`Self::eval_program`], but a `return` stays wrapped so it keeps
    /// unwinding through enclosing blocks.
    pub fn eval_block(&self, block: &BlockStatement, env: &Environment) -> Object {
        let mut result = Object::Null;
        for stmt in &block.statements {
            result = self.eval_statement(stmt, env);
            if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    pub fn eval_statement(&self, stmt: &Statement, env: &Environment) -> Object {
        match stmt {
            Statement::Let { name, value, .. } => {
                let value = propagate!(self.eval_expression(value, env));
                env.set(name.value.clone(), value);
                Object::Null
            }
            Statement::Return { value, .. } => {
                let value = propagate!(self.eval_expression(value, env));
                Object::ReturnValue(Box::new(value))
            }
            Statement::Expression { expression, .. } => self.eval_expression(expression, env),
            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    pub fn eval_expression(&self, expr: &Expression, env: &Environment) -> Object {
        tam_stack::ensure_sufficient_stack(|| self.eval_expression_inner(expr, env))
    }

    fn eval_expression_inner(&self, expr: &Expression, env: &Environment) -> Object {
        match expr {
            Expression::Integer { value, .. } => Object::Integer(*value),
            Expression::Boolean { value, .. } => Object::boolean(*value),
            Expression::String { value, .. } => Object::string(value),
            Expression::Identifier(ident) => Self::eval_identifier(ident, env),
            Expression::Prefix {
                operator, right, ..
            } => {
                let right = propagate!(self.eval_expression(right, env));
                operators::eval_prefix(*operator, &right)
            }
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => {
                let left = propagate!(self.eval_expression(left, env));
                let right = propagate!(self.eval_expression(right, env));
                operators::eval_infix(*operator, &left, &right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = propagate!(self.eval_expression(condition, env));
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Object::Null
                }
            }
            Expression::Function(literal) => Object::Function(Self::closure(literal, env)),
            Expression::Macro(literal) => Object::Macro(Self::closure(literal, env)),
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                if function.as_identifier() == Some("quote") {
                    return match arguments.as_slice() {
                        [argument] => self.eval_quote(argument, env),
                        _ => errors::quote_argument_count(arguments.len()),
                    };
                }
                let callee = propagate!(self.eval_expression(function, env));
                let args = match self.eval_expressions(arguments, env) {
                    Ok(args) => args,
                    Err(err) => return err,
                };
                self.apply_function(&callee, args)
            }
            Expression::Array { elements, .. } => match self.eval_expressions(elements, env) {
                Ok(elements) => Object::array(elements),
                Err(err) => err,
            },
            Expression::Hash { pairs, .. } => self.eval_hash_literal(pairs, env),
            Expression::Index { left, index, .. } => {
                let left = propagate!(self.eval_expression(left, env));
                let index = propagate!(self.eval_expression(index, env));
                Self::eval_index(&left, &index)
            }
        }
    }

    /// Environment first, then builtins.
    fn eval_identifier(ident: &Identifier, env: &Environment) -> Object {
        if let Some(value) = env.get(&ident.value) {
            return value;
        }
        match builtins::lookup(&ident.value) {
            Some(builtin) => Object::Builtin(builtin),
            None => errors::undefined_reference(&ident.value),
        }
    }

    fn closure(literal: &FunctionLiteral, env: &Environment) -> Rc<Function> {
        Rc::new(Function {
            parameters: Rc::clone(&literal.parameters),
            body: Rc::clone(&literal.body),
            env: env.clone(),
        })
    }

    /// Evaluate left to right, stopping at the first error.
    fn eval_expressions(
        &self,
        exprs: &[Expression],
        env: &Environment,
    ) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match self.eval_expression(expr, env) {
                err @ Object::Error(_) => return Err(err),
                value => values.push(value),
            }
        }
        Ok(values)
    }

    /// Each key is evaluated and checked for hashability before its value.
    fn eval_hash_literal(&self, pairs: &[(Expression, Expression)], env: &Environment) -> Object {
        let mut hash = HashObject::new();
        for (key_expr, value_expr) in pairs {
            let key = propagate!(self.eval_expression(key_expr, env));
            let Some(hash_key) = key.hash_key() else {
                return errors::not_hashable(&key);
            };
            let value = propagate!(self.eval_expression(value_expr, env));
            hash.insert(hash_key, HashPair { key, value });
        }
        Object::hash(hash)
    }

    /// Out-of-range array indices and missing hash keys yield `null`.
    fn eval_index(left: &Object, index: &Object) -> Object {
        match (left, index) {
            (Object::Array(elements), Object::Integer(i)) => usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .unwrap_or(Object::Null),
            (Object::Hash(hash), _) => match index.hash_key() {
                Some(key) => hash
                    .get(&key)
                    .map_or(Object::Null, |pair| pair.value.clone()),
                None => errors::unknown_index_operation(left, index),
            },
            _ => errors::unknown_index_operation(left, index),
        }
    }

    /// Call a function or builtin with already-evaluated arguments.
    #[tracing::instrument(level = "trace", skip_all, fields(callee = %callee.object_type(), argc = args.len()))]
    pub fn apply_function(&self, callee: &Object, args: Vec<Object>) -> Object {
        match callee {
            Object::Function(function) => {
                let env = bind_parameters(function, args);
                match self.eval_block(&function.body, &env) {
                    Object::ReturnValue(value) => *value,
                    value => value,
                }
            }
            Object::Builtin(builtin) => {
                trace!(name = builtin.name, "calling builtin");
                (builtin.func)(&args, &self.print_handler)
            }
            _ => errors::not_callable(callee),
        }
    }
}

/// A scope enclosed by the closure's environment, binding each parameter
/// positionally. Missing arguments bind to `null`; extra ones are dropped.
pub(crate) fn bind_parameters(function: &Function, args: Vec<Object>) -> Environment {
    let env = Environment::new_enclosed(&function.env);
    let mut args = args.into_iter();
    for param in function.parameters.iter() {
        env.set(param.value.clone(), args.next().unwrap_or(Object::Null));
    }
    env
}
