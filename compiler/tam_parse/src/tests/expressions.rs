use pretty_assertions::assert_eq;
use tam_ir::{Expression, InfixOperator, PrefixOperator, Statement};

use super::{parse_expression, parse_ok};

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        (
            "add(a + b + c * d / f + g)",
            "add((((a + b) + ((c * d) / f)) + g))",
        ),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {source:?}");
    }
}

#[test]
fn test_literals() {
    assert!(matches!(
        parse_expression("5;"),
        Expression::Integer { value: 5, .. }
    ));
    assert!(matches!(
        parse_expression("false"),
        Expression::Boolean { value: false, .. }
    ));
    match parse_expression(r#""hello world";"#) {
        Expression::String { value, token } => {
            assert_eq!(value, "hello world");
            assert_eq!(token.literal, "hello world");
        }
        other => panic!("expected string literal, got {other:?}"),
    }
    assert_eq!(parse_expression("foobar").as_identifier(), Some("foobar"));
}

#[test]
fn test_prefix_expressions() {
    for (source, op, operand) in [("!5", PrefixOperator::Bang, "5"), ("-15", PrefixOperator::Minus, "15")] {
        match parse_expression(source) {
            Expression::Prefix {
                operator, right, ..
            } => {
                assert_eq!(operator, op);
                assert_eq!(right.to_string(), operand);
            }
            other => panic!("expected prefix expression, got {other:?}"),
        }
    }
}

#[test]
fn test_infix_expressions() {
    let cases = [
        ("5 + 5", InfixOperator::Plus),
        ("5 - 5", InfixOperator::Minus),
        ("5 * 5", InfixOperator::Asterisk),
        ("5 / 5", InfixOperator::Slash),
        ("5 > 5", InfixOperator::Gt),
        ("5 < 5", InfixOperator::Lt),
        ("5 == 5", InfixOperator::Eq),
        ("5 != 5", InfixOperator::NotEq),
    ];

    for (source, expected) in cases {
        match parse_expression(source) {
            Expression::Infix {
                left,
                operator,
                right,
                token,
            } => {
                assert_eq!(operator, expected);
                assert_eq!(token.literal, expected.symbol());
                assert!(matches!(*left, Expression::Integer { value: 5, .. }));
                assert!(matches!(*right, Expression::Integer { value: 5, .. }));
            }
            other => panic!("expected infix expression, got {other:?}"),
        }
    }
}

#[test]
fn test_if_expression() {
    match parse_expression("if (x < y) { x }") {
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            assert_eq!(condition.to_string(), "(x < y)");
            assert_eq!(consequence.statements.len(), 1);
            assert_eq!(consequence.to_string(), "x");
            assert!(alternative.is_none());
        }
        other => panic!("expected if expression, got {other:?}"),
    }
}

#[test]
fn test_if_else_expression() {
    let expr = parse_expression("if (x < y) { x } else { y; z }");
    assert_eq!(expr.to_string(), "if (x < y) x else yz");
    match expr {
        Expression::If {
            alternative: Some(alternative),
            ..
        } => assert_eq!(alternative.statements.len(), 2),
        other => panic!("expected if/else expression, got {other:?}"),
    }
}

#[test]
fn test_function_literal() {
    match parse_expression("fn(x, y) { x + y; }") {
        Expression::Function(lit) => {
            let params: Vec<&str> = lit.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(params, ["x", "y"]);
            assert_eq!(lit.body.to_string(), "(x + y)");
            assert_eq!(lit.token.literal, "fn");
        }
        other => panic!("expected function literal, got {other:?}"),
    }
}

#[test]
fn test_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        match parse_expression(source) {
            Expression::Function(lit) => {
                let params: Vec<&str> =
                    lit.parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(params, expected);
            }
            other => panic!("expected function literal, got {other:?}"),
        }
    }
}

#[test]
fn test_macro_literal() {
    let expr = parse_expression("macro(x, y) { x + y; }");
    assert_eq!(expr.to_string(), "macro(x, y) (x + y)");
    assert!(matches!(expr, Expression::Macro(ref lit) if lit.parameters.len() == 2));
}

#[test]
fn test_call_expression() {
    match parse_expression("add(1, 2 * 3, 4 + 5);") {
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            assert_eq!(function.as_identifier(), Some("add"));
            let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
            assert_eq!(args, ["1", "(2 * 3)", "(4 + 5)"]);
        }
        other => panic!("expected call expression, got {other:?}"),
    }
    assert_eq!(parse_ok("f()").to_string(), "f()");
    assert_eq!(parse_ok("fn(x) { x }(5)").to_string(), "fn(x) x(5)");
}

#[test]
fn test_array_and_index() {
    match parse_expression("[1, 2 * 2, 3 + 3]") {
        Expression::Array { elements, .. } => assert_eq!(elements.len(), 3),
        other => panic!("expected array literal, got {other:?}"),
    }
    assert_eq!(parse_ok("[]").to_string(), "[]");
    assert_eq!(parse_ok("myArray[1 + 1]").to_string(), "(myArray[(1 + 1)])");
}

#[test]
fn test_hash_literals() {
    match parse_expression(r#"{"one": 1, "two": 2, "three": 3}"#) {
        Expression::Hash { pairs, .. } => {
            let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
            assert_eq!(rendered, ["one=1", "two=2", "three=3"]);
        }
        other => panic!("expected hash literal, got {other:?}"),
    }

    assert!(matches!(
        parse_expression("{}"),
        Expression::Hash { ref pairs, .. } if pairs.is_empty()
    ));
    assert_eq!(
        parse_ok(r#"{"one": 0 + 1, true: 15 / 5}"#).to_string(),
        "{one: (0 + 1), true: (15 / 5)}"
    );
}

#[test]
fn test_quote_and_unquote_parse_as_calls() {
    let program = parse_ok("quote(unquote(4 + 4) + 8)");
    assert_eq!(program.to_string(), "quote((unquote((4 + 4)) + 8))");
    assert!(matches!(
        &program.statements[0],
        Statement::Expression {
            expression: Expression::Call { .. },
            ..
        }
    ));
}
