//! Native functions available in every program.
//!
//! Builtins are resolved after the environment chain, so a guest binding
//! with the same name shadows them.

use crate::errors;
use crate::object::{Builtin, Object};
use crate::print_handler::PrintHandler;

pub static BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
    Builtin { name: "puts", func: puts },
];

/// Find a builtin by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

const WANT_SEQUENCE: &str = "(STRING) or (ARRAY)";
const WANT_ARRAY: &str = "(ARRAY)";
const WANT_PUSH: &str = "(ARRAY, ANY)";

/// Length of a string in bytes, or of an array in elements.
fn len(args: &[Object], _: &PrintHandler) -> Object {
    let [arg] = args else {
        return errors::invalid_argument_count("len", args, WANT_SEQUENCE);
    };
    let length = match arg {
        Object::String(value) => value.len(),
        Object::Array(elements) => elements.len(),
        _ => return errors::invalid_argument_types("len", args, WANT_SEQUENCE),
    };
    Object::Integer(i64::try_from(length).unwrap_or(i64::MAX))
}

/// Unpack the single array argument of `first`, `last` and `rest`.
fn single_array<'a>(name: &'static str, args: &'a [Object]) -> Result<&'a [Object], Object> {
    match args {
        [Object::Array(elements)] => Ok(elements.as_slice()),
        [_] => Err(errors::invalid_argument_types(name, args, WANT_ARRAY)),
        _ => Err(errors::invalid_argument_count(name, args, WANT_ARRAY)),
    }
}

fn first(args: &[Object], _: &PrintHandler) -> Object {
    match single_array("first", args) {
        Ok(elements) => elements.first().cloned().unwrap_or(Object::Null),
        Err(err) => err,
    }
}

fn last(args: &[Object], _: &PrintHandler) -> Object {
    match single_array("last", args) {
        Ok(elements) => elements.last().cloned().unwrap_or(Object::Null),
        Err(err) => err,
    }
}

/// Every element but the first, as a new array. `null` for an empty array.
fn rest(args: &[Object], _: &PrintHandler) -> Object {
    match single_array("rest", args) {
        Ok([]) => Object::Null,
        Ok([_, tail @ ..]) => Object::array(tail.to_vec()),
        Err(err) => err,
    }
}

/// A new array with the second argument appended. The input is unchanged.
fn push(args: &[Object], _: &PrintHandler) -> Object {
    match args {
        [Object::Array(elements), value] => {
            let mut pushed = Vec::with_capacity(elements.len() + 1);
            pushed.extend(elements.iter().cloned());
            pushed.push(value.clone());
            Object::array(pushed)
        }
        [_, _] => errors::invalid_argument_types("push", args, WANT_PUSH),
        _ => errors::invalid_argument_count("push", args, WANT_PUSH),
    }
}

fn puts(args: &[Object], out: &PrintHandler) -> Object {
    for arg in args {
        out.println(&arg.inspect());
    }
    Object::Null
}
