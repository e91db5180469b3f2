//! Macro definition and expansion.
//!
//! Expansion runs between parsing and evaluation:
//!
//! 1. [`define_macros`] removes every top-level `let name = macro(...)`
//!    statement and binds `name` to an `Object::Macro` in the macro
//!    environment.
//! 2. [`expand_macros`] rewrites the remaining program post-order. Each call
//!    whose callee names a macro is evaluated with its arguments passed as
//!    unevaluated quotes, and the quote the macro returns replaces the call.
//!
//! Expansion is not repeated on its own output, and it is unhygienic:
//! identifiers in the returned syntax resolve wherever the call site puts
//! them.

use std::rc::Rc;

use tam_ir::{Expression, Program, Rewrite, Rewriter, Statement};
use thiserror::Error;
use tracing::debug;

use crate::environment::Environment;
use crate::interpreter::{bind_parameters, Interpreter};
use crate::object::{Function, Object, ObjectType};

/// A macro call that could not be expanded.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MacroError {
    #[error("macro `{name}` must return a quote, found {found}")]
    NotQuote { name: String, found: ObjectType },

    #[error("macro `{name}` failed: {message}")]
    Failed { name: String, message: String },
}

/// Move top-level macro definitions out of `program` and into `env`.
pub fn define_macros(program: &mut Program, env: &Environment) {
    let mut definitions = Vec::new();
    for (index, stmt) in program.statements.iter().enumerate() {
        if let Statement::Let {
            name,
            value: Expression::Macro(literal),
            ..
        } = stmt
        {
            let definition = Function {
                parameters: Rc::clone(&literal.parameters),
                body: Rc::clone(&literal.body),
                env: env.clone(),
            };
            env.set(name.value.clone(), Object::Macro(Rc::new(definition)));
            debug!(name = %name.value, "macro defined");
            definitions.push(index);
        }
    }

    // Highest index first, so the remaining indices stay valid.
    for index in definitions.into_iter().rev() {
        program.statements.remove(index);
    }
}

/// Expand macro calls in `program`, printing through stdout.
pub fn expand_macros(program: Program, env: &Environment) -> Result<Program, MacroError> {
    Interpreter::new().expand_macros(program, env)
}

impl Interpreter {
    /// Expand macro calls in `program` using the macros bound in `env`.
    ///
    /// Stops at the first call that fails to expand.
    pub fn expand_macros(&self, program: Program, env: &Environment) -> Result<Program, MacroError> {
        let mut expander = MacroExpander {
            interpreter: self,
            env,
            error: None,
        };
        let program = program.rewrite(&mut expander);
        match expander.error {
            Some(err) => Err(err),
            None => Ok(program),
        }
    }
}

struct MacroExpander<'a> {
    interpreter: &'a Interpreter,
    env: &'a Environment,
    error: Option<MacroError>,
}

impl MacroExpander<'_> {
    fn lookup_macro(&self, callee: &Expression) -> Option<(String, Rc<Function>)> {
        let name = callee.as_identifier()?;
        match self.env.get(name)? {
            Object::Macro(definition) => Some((name.to_string(), definition)),
            _ => None,
        }
    }

    fn expand_call(
        &self,
        name: String,
        definition: &Function,
        arguments: &[Expression],
    ) -> Result<Expression, MacroError> {
        let args = arguments
            .iter()
            .map(|arg| Object::Quote(Rc::new(arg.clone())))
            .collect();
        let env = bind_parameters(definition, args);

        let result = match self.interpreter.eval_block(&definition.body, &env) {
            Object::ReturnValue(value) => *value,
            value => value,
        };
        match result {
            Object::Quote(node) => {
                debug!(%name, "macro expanded");
                Ok(Rc::unwrap_or_clone(node))
            }
            Object::Error(message) => Err(MacroError::Failed {
                name,
                message: message.to_string(),
            }),
            other => Err(MacroError::NotQuote {
                name,
                found: other.object_type(),
            }),
        }
    }
}

impl Rewriter for MacroExpander<'_> {
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
        let Some((name, definition)) = self.lookup_macro(function) else {
            return expr;
        };

        match self.expand_call(name, &definition, arguments) {
            Ok(expanded) => expanded,
            Err(err) => {
                self.error = Some(err);
                expr
            }
        }
    }
}
