//! Parser tests.
//!
//! - `expressions`: precedence, literals and compound expressions
//! - `statements`: let/return/expression statements and blocks
//! - `errors`: diagnostics and recovery

mod expressions;
mod statements;

use crate::parse;
use tam_ir::Program;

/// Parse `source`, failing the test on any diagnostic.
fn parse_ok(source: &str) -> Program {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "unexpected parse errors for {source:?}: {:?}",
        output.error_messages()
    );
    output.program
}

/// Parse `source` and return its single expression statement.
fn parse_expression(source: &str) -> tam_ir::Expression {
    let mut program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "source: {source:?}");
    match program.statements.remove(0) {
        tam_ir::Statement::Expression { expression, .. } => expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}
