//! Evaluator tests.
//!
//! - `eval`: expressions, statements, functions and error values
//! - `builtins`: the native function table
//! - `quote`: quote/unquote
//! - `macros`: macro definition and expansion

mod builtins;

use pretty_assertions::assert_eq;
use tam_ir::Program;

use crate::{Environment, Interpreter, Object, PrintHandler};

/// Parse `source`, failing the test on any diagnostic.
fn parse_ok(source: &str) -> Program {
    let output = tam_parse::parse(source);
    assert!(
        !output.has_errors(),
        "unexpected parse errors for {source:?}: {:?}",
        output.error_messages()
    );
    output.program
}

/// Evaluate `source` in a fresh environment, capturing `puts` output.
fn run(source: &str) -> (Object, String) {
    let program = parse_ok(source);
    let handler = PrintHandler::buffer();
    let interpreter = Interpreter::with_print_handler(handler.clone());
    let result = interpreter.eval_program(&program, &Environment::new());
    (result, handler.output())
}

fn eval_source(source: &str) -> Object {
    run(source).0
}

#[track_caller]
fn assert_integer(source: &str, expected: i64) {
    assert_eq!(eval_source(source), Object::Integer(expected), "source: {source}");
}

#[track_caller]
fn assert_boolean(source: &str, expected: bool) {
    assert_eq!(eval_source(source), Object::Boolean(expected), "source: {source}");
}

#[track_caller]
fn assert_null(source: &str) {
    assert_eq!(eval_source(source), Object::Null, "source: {source}");
}

#[track_caller]
fn assert_error(source: &str, message: &str) {
    assert_eq!(eval_source(source), Object::error(message), "source: {source}");
}

#[track_caller]
fn assert_inspect(source: &str, expected: &str) {
    assert_eq!(eval_source(source).inspect(), expected, "source: {source}");
}
