//! Centralized error constructors for the evaluator.
//!
//! Guest-level failures are ordinary values (`Object::Error`). Their
//! messages are defined once here as [`EvalErrorKind`] variants; the
//! `#[cold]` constructors below turn a kind into the value the evaluator
//! returns.

use thiserror::Error;

use crate::object::{Object, ObjectType};
use tam_ir::{InfixOperator, PrefixOperator};

/// Every error message the evaluator can produce.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("undefined reference: {name}")]
    UndefinedReference { name: String },

    #[error("unknown operation: {operator}{operand}")]
    UnknownPrefixOperation {
        operator: PrefixOperator,
        operand: ObjectType,
    },

    #[error("unknown operation: {left} {operator} {right}")]
    UnknownInfixOperation {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("unknown operation: {callee}()")]
    NotCallable { callee: ObjectType },

    #[error("unknown operation: {receiver}[{index}]")]
    UnknownIndexOperation {
        receiver: ObjectType,
        index: ObjectType,
    },

    #[error("invalid type: {found} is not hashable")]
    NotHashable { found: ObjectType },

    #[error("division by zero: {dividend} / 0")]
    DivisionByZero { dividend: i64 },

    #[error("invalid argument count in call to `{name}`: found ({found}) want {want}")]
    InvalidArgumentCount {
        name: &'static str,
        found: String,
        want: &'static str,
    },

    #[error("invalid argument types in call to `{name}`: found ({found}) want {want}")]
    InvalidArgumentTypes {
        name: &'static str,
        found: String,
        want: &'static str,
    },

    #[error("invalid argument count in call to `quote`: found {found} want 1")]
    QuoteArgumentCount { found: usize },

    #[error("unquote: cannot convert {found} to a syntax node")]
    UnquoteUnsupported { found: ObjectType },
}

impl From<EvalErrorKind> for Object {
    fn from(kind: EvalErrorKind) -> Self {
        Object::error(kind.to_string())
    }
}

/// `(T1, T2, ...)` contents for argument errors.
fn type_list(args: &[Object]) -> String {
    args.iter()
        .map(|arg| arg.object_type().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cold]
pub fn undefined_reference(name: &str) -> Object {
    EvalErrorKind::UndefinedReference {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn unknown_prefix_operation(operator: PrefixOperator, operand: &Object) -> Object {
    EvalErrorKind::UnknownPrefixOperation {
        operator,
        operand: operand.object_type(),
    }
    .into()
}

#[cold]
pub fn unknown_infix_operation(left: &Object, operator: InfixOperator, right: &Object) -> Object {
    EvalErrorKind::UnknownInfixOperation {
        left: left.object_type(),
        operator,
        right: right.object_type(),
    }
    .into()
}

#[cold]
pub fn not_callable(callee: &Object) -> Object {
    EvalErrorKind::NotCallable {
        callee: callee.object_type(),
    }
    .into()
}

#[cold]
pub fn unknown_index_operation(receiver: &Object, index: &Object) -> Object {
    EvalErrorKind::UnknownIndexOperation {
        receiver: receiver.object_type(),
        index: index.object_type(),
    }
    .into()
}

#[cold]
pub fn not_hashable(found: &Object) -> Object {
    EvalErrorKind::NotHashable {
        found: found.object_type(),
    }
    .into()
}

#[cold]
pub fn division_by_zero(dividend: i64) -> Object {
    EvalErrorKind::DivisionByZero { dividend }.into()
}

/// Arity mismatch in a builtin call. Lists the type of every argument.
#[cold]
pub fn invalid_argument_count(name: &'static str, args: &[Object], want: &'static str) -> Object {
    EvalErrorKind::InvalidArgumentCount {
        name,
        found: type_list(args),
        want,
    }
    .into()
}

/// Type mismatch in a builtin call. `found` lists only the offending arguments.
#[cold]
pub fn invalid_argument_types(name: &'static str, found: &[Object], want: &'static str) -> Object {
    EvalErrorKind::InvalidArgumentTypes {
        name,
        found: type_list(found),
        want,
    }
    .into()
}

#[cold]
pub fn quote_argument_count(found: usize) -> Object {
    EvalErrorKind::QuoteArgumentCount { found }.into()
}

#[cold]
pub fn unquote_unsupported(found: &Object) -> Object {
    EvalErrorKind::UnquoteUnsupported {
        found: found.object_type(),
    }
    .into()
}
