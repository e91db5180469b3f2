use pretty_assertions::assert_eq;

use super::{assert_error, assert_inspect, assert_integer, assert_null, run};
use crate::builtins::{lookup, BUILTINS};
use crate::{Object, PrintHandler};

#[test]
fn test_len() {
    assert_integer("len(\"\")", 0);
    assert_integer("len(\"four\")", 4);
    assert_integer("len(\"hello world\")", 11);
    assert_integer("len([1, 2, 3])", 3);
    assert_integer("len([])", 0);
    assert_error(
        "len(1)",
        "invalid argument types in call to `len`: found (INTEGER) want (STRING) or (ARRAY)",
    );
    assert_error(
        "len(\"one\", \"two\")",
        "invalid argument count in call to `len`: found (STRING, STRING) want (STRING) or (ARRAY)",
    );
    assert_error(
        "len()",
        "invalid argument count in call to `len`: found () want (STRING) or (ARRAY)",
    );
}

#[test]
fn test_len_counts_bytes() {
    assert_integer("len(\"héllo\")", 6);
}

#[test]
fn test_first_and_last() {
    assert_integer("first([1, 2, 3])", 1);
    assert_null("first([])");
    assert_integer("last([1, 2, 3])", 3);
    assert_null("last([])");
    assert_error(
        "first(1)",
        "invalid argument types in call to `first`: found (INTEGER) want (ARRAY)",
    );
    assert_error(
        "last(\"abc\")",
        "invalid argument types in call to `last`: found (STRING) want (ARRAY)",
    );
    assert_error(
        "first([], [])",
        "invalid argument count in call to `first`: found (ARRAY, ARRAY) want (ARRAY)",
    );
}

#[test]
fn test_rest() {
    assert_inspect("rest([1, 2, 3])", "[2, 3]");
    assert_inspect("rest(rest([1, 2, 3]))", "[3]");
    assert_inspect("rest([1])", "[]");
    assert_null("rest([])");
    assert_inspect("let a = [1, 2]; rest(a); a", "[1, 2]");
    assert_error(
        "rest({})",
        "invalid argument types in call to `rest`: found (HASH) want (ARRAY)",
    );
}

#[test]
fn test_push() {
    assert_inspect("push([], 1)", "[1]");
    assert_inspect("push([1, 2], [3])", "[1, 2, [3]]");
    assert_inspect("let a = [1]; let b = push(a, 2); a", "[1]");
    assert_error(
        "push(1, 1)",
        "invalid argument types in call to `push`: found (INTEGER, INTEGER) want (ARRAY, ANY)",
    );
    assert_error(
        "push([1])",
        "invalid argument count in call to `push`: found (ARRAY) want (ARRAY, ANY)",
    );
}

#[test]
fn test_puts_prints_each_argument() {
    let (result, output) = run("puts(\"hello\", 1, [1, 2], {\"a\": true})");
    assert_eq!(result, Object::Null);
    assert_eq!(output, "hello\n1\n[1, 2]\n{a:true}\n");

    let (_, output) = run("puts()");
    assert_eq!(output, "");
}

#[test]
fn test_builtin_inspect() {
    assert_inspect("len", "builtin function");
}

#[test]
fn test_builtins_compose() {
    assert_inspect(
        "let map = fn(arr, f) {
           let iter = fn(arr, acc) {
             if (len(arr) == 0) {
               acc
             } else {
               iter(rest(arr), push(acc, f(first(arr))))
             }
           };
           iter(arr, [])
         };
         map([1, 2, 3], fn(x) { x * 2 })",
        "[2, 4, 6]",
    );
    assert_integer(
        "let reduce = fn(arr, initial, f) {
           let iter = fn(arr, result) {
             if (len(arr) == 0) { result } else { iter(rest(arr), f(result, first(arr))) }
           };
           iter(arr, initial)
         };
         reduce([1, 2, 3, 4, 5], 0, fn(acc, el) { acc + el })",
        15,
    );
}

#[test]
fn test_lookup() {
    assert!(lookup("len").is_some());
    assert!(lookup("nope").is_none());

    let names: Vec<_> = BUILTINS.iter().map(|builtin| builtin.name).collect();
    assert_eq!(names, ["len", "first", "last", "rest", "push", "puts"]);
}

#[test]
fn test_builtin_called_directly() {
    let puts = lookup("puts").unwrap();
    let handler = PrintHandler::buffer();
    let result = (puts.func)(&[Object::string("direct")], &handler);
    assert_eq!(result, Object::Null);
    assert_eq!(handler.output(), "direct\n");
}
