//! Prefix and infix operator semantics.
//!
//! Infix dispatch is on the pair of operand types. Integer arithmetic wraps
//! on overflow.

use tam_ir::{InfixOperator, PrefixOperator};

use crate::errors;
use crate::object::Object;

pub(super) fn eval_prefix(operator: PrefixOperator, right: &Object) -> Object {
    match operator {
        PrefixOperator::Bang => eval_bang(right),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            _ => errors::unknown_prefix_operation(operator, right),
        },
    }
}

/// `!` is defined on the types that have a falsy value, and negates it.
fn eval_bang(right: &Object) -> Object {
    match right {
        Object::Integer(_)
        | Object::Boolean(_)
        | Object::Null
        | Object::String(_)
        | Object::Array(_)
        | Object::Hash(_) => Object::boolean(!right.is_truthy()),
        _ => errors::unknown_prefix_operation(PrefixOperator::Bang, right),
    }
}

pub(super) fn eval_infix(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => match operator {
            InfixOperator::Plus => {
                let mut joined = String::with_capacity(l.len() + r.len());
                joined.push_str(l);
                joined.push_str(r);
                Object::string(&joined)
            }
            InfixOperator::Eq => Object::boolean(l == r),
            InfixOperator::NotEq => Object::boolean(l != r),
            _ => errors::unknown_infix_operation(left, operator, right),
        },
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            InfixOperator::Eq => Object::boolean(l == r),
            InfixOperator::NotEq => Object::boolean(l != r),
            _ => errors::unknown_infix_operation(left, operator, right),
        },
        (Object::Null, Object::Null) => match operator {
            InfixOperator::Eq => Object::TRUE,
            InfixOperator::NotEq => Object::FALSE,
            _ => errors::unknown_infix_operation(left, operator, right),
        },
        (Object::Array(_), Object::Array(_))
        | (Object::Hash(_), Object::Hash(_))
        | (Object::Function(_), Object::Function(_)) => match operator {
            InfixOperator::Eq => Object::boolean(left.same_instance(right)),
            InfixOperator::NotEq => Object::boolean(!left.same_instance(right)),
            _ => errors::unknown_infix_operation(left, operator, right),
        },
        _ => errors::unknown_infix_operation(left, operator, right),
    }
}

fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> Object {
    match operator {
        InfixOperator::Plus => Object::Integer(l.wrapping_add(r)),
        InfixOperator::Minus => Object::Integer(l.wrapping_sub(r)),
        InfixOperator::Asterisk => Object::Integer(l.wrapping_mul(r)),
        InfixOperator::Slash if r == 0 => errors::division_by_zero(l),
        InfixOperator::Slash => Object::Integer(l.wrapping_div(r)),
        InfixOperator::Lt => Object::boolean(l < r),
        InfixOperator::Gt => Object::boolean(l > r),
        InfixOperator::Eq => Object::boolean(l == r),
        InfixOperator::NotEq => Object::boolean(l != r),
    }
}
