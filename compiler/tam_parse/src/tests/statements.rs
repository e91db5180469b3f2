use pretty_assertions::assert_eq;
use tam_ir::{Expression, Span, Statement};

use super::parse_ok;

#[test]
fn test_let_statements() {
    let cases = [
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y", "foobar", "y"),
    ];

    for (source, name, value) in cases {
        let program = parse_ok(source);
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Let {
                token,
                name: ident,
                value: expr,
            } => {
                assert_eq!(token.literal, "let");
                assert_eq!(ident.value, name);
                assert_eq!(ident.token_literal(), name);
                assert_eq!(expr.to_string(), value);
            }
            other => panic!("expected let statement, got {other:?}"),
        }
    }
}

#[test]
fn test_return_statements() {
    let program = parse_ok("return 5; return 10\nreturn add(15);");
    assert_eq!(program.statements.len(), 3);
    for stmt in &program.statements {
        assert!(matches!(stmt, Statement::Return { .. }));
        assert_eq!(stmt.token_literal(), "return");
    }
    assert_eq!(program.to_string(), "return 5;return 10;return add(15);");
}

#[test]
fn test_expression_statement_token_is_first_token() {
    let program = parse_ok("-x + 1;");
    assert_eq!(program.statements[0].token_literal(), "-");
    assert_eq!(program.token_literal(), "-");
}

#[test]
fn test_semicolons_are_optional() {
    let with = parse_ok("let a = 1; a; a + 1;");
    let without = parse_ok("let a = 1 a a + 1");
    assert_eq!(with.to_string(), without.to_string());
    assert_eq!(with.statements.len(), 3);
}

#[test]
fn test_block_runs_to_end_of_input() {
    let program = parse_ok("if (x) { y");
    assert_eq!(program.to_string(), "if x y");
}

#[test]
fn test_nested_blocks() {
    let program = parse_ok("fn(a) { let b = fn(c) { a + c }; return b; }");
    match &program.statements[0] {
        Statement::Expression {
            expression: Expression::Function(lit),
            ..
        } => {
            assert_eq!(lit.body.statements.len(), 2);
            assert_eq!(lit.body.to_string(), "let b = fn(c) (a + c);return b;");
        }
        other => panic!("expected function literal, got {other:?}"),
    }
}

#[test]
fn test_spans_point_at_source() {
    let program = parse_ok("let answer =\n  42;");
    match &program.statements[0] {
        Statement::Let { name, value, .. } => {
            assert_eq!(name.token.span, Span::new(4, 10));
            assert_eq!(value.token().span, Span::new(15, 17));
        }
        other => panic!("expected let statement, got {other:?}"),
    }
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("").statements.is_empty());
    assert!(parse_ok("  \n ").statements.is_empty());
}
