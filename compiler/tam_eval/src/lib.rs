//! Tamarin evaluator.
//!
//! Runtime side of the interpreter: the object model, lexically scoped
//! environments, the tree-walking [`Interpreter`], the builtin functions and
//! quote/unquote based macro expansion.
//!
//! ```text
//! let env = Environment::new();
//! let macro_env = Environment::new();
//! define_macros(&mut program, &macro_env);
//! let program = expand_macros(program, &macro_env)?;
//! let result = Interpreter::new().eval_program(&program, &env);
//! ```

pub mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod macros;
mod object;
mod print_handler;

pub use environment::{Environment, LocalScope};
pub use errors::EvalErrorKind;
pub use interpreter::Interpreter;
pub use macros::{define_macros, expand_macros, MacroError};
pub use object::{Builtin, BuiltinFn, Function, HashKey, HashObject, HashPair, Object, ObjectType};
pub use print_handler::{PrintHandler, SharedPrintHandler};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
