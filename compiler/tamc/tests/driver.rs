//! End-to-end tests: whole programs through the driver pipeline.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::io::Cursor;

use pretty_assertions::assert_eq;
use tam_eval::PrintHandler;
use tamc::{repl, run_source, Command, Outcome, Session};

/// Run `source` and return the rendered result and captured `puts` output.
fn run(source: &str) -> (Option<String>, String) {
    let handler = PrintHandler::buffer();
    let outcome = run_source(source, handler.clone());
    (outcome.render(), handler.output())
}

#[test]
fn test_value_is_rendered() {
    assert_eq!(run("let x = 5; x * 2").0.as_deref(), Some("10"));
    assert_eq!(run("\"tam\" + \"arin\"").0.as_deref(), Some("tamarin"));
    assert_eq!(run("[1, 2][5]").0.as_deref(), Some("null"));
}

#[test]
fn test_trailing_let_and_empty_program_render_nothing() {
    assert_eq!(run("let x = 5;").0, None);
    assert_eq!(run("").0, None);
    assert_eq!(run("let m = macro() { quote(1) };").0, None);
}

#[test]
fn test_errors_render_even_after_let() {
    assert_eq!(
        run("let x = 1 + true;").0.as_deref(),
        Some("ERROR: unknown operation: INTEGER + BOOLEAN")
    );
}

#[test]
fn test_parse_errors_skip_evaluation() {
    let (rendered, output) = run("puts(1); let = 5;");
    assert_eq!(
        rendered.as_deref(),
        Some(
            "parser errors:\n\
             \t1:14: expected <IDENT> token following <let>\n\
             \t1:14: no prefix parse function for <=>"
        )
    );
    assert_eq!(output, "");
}

#[test]
fn test_macro_failures_are_reported() {
    let (rendered, _) = run("let m = macro() { 1 }; m()");
    assert_eq!(
        rendered.as_deref(),
        Some("macro error: macro `m` must return a quote, found INTEGER")
    );
}

#[test]
fn test_unless_macro_program() {
    let (rendered, output) = run(
        r#"let unless = macro(condition, consequence, alternative) {
             quote(if (!(unquote(condition))) {
               unquote(consequence);
             } else {
               unquote(alternative);
             });
           };
           unless(10 > 5, puts("not greater"), puts("greater"));"#,
    );
    assert_eq!(rendered.as_deref(), Some("null"));
    assert_eq!(output, "greater\n");
}

#[test]
fn test_closures_and_builtins() {
    let (rendered, output) = run(
        "let newAdder = fn(x) { fn(y) { x + y } };
         let addTwo = newAdder(2);
         puts(addTwo(2));
         let people = [{\"name\": \"Alice\", \"age\": 24}, {\"name\": \"Anna\", \"age\": 28}];
         people[1][\"name\"]",
    );
    assert_eq!(rendered.as_deref(), Some("Anna"));
    assert_eq!(output, "4\n");
}

#[test]
fn test_session_keeps_bindings_and_macros() {
    let session = Session::with_print_handler(PrintHandler::silent());
    assert!(matches!(session.run("let x = 40;"), Outcome::Unit));
    assert!(matches!(
        session.run("let plusTwo = macro(e) { quote(unquote(e) + 2) };"),
        Outcome::Unit
    ));
    assert_eq!(session.run("plusTwo(x)").render().as_deref(), Some("42"));
}

#[test]
fn test_repl_prints_prompt_and_results() {
    let session = Session::with_print_handler(PrintHandler::buffer());
    let input = Cursor::new("let a = 2;\na * 21\nlet\n");
    let mut output = Vec::new();
    repl(input, &mut output, &session).unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        ">> >> 42\n>> parser errors:\n\
         \t1:4: expected <IDENT> token following <let>\n\
         >> "
    );
}

#[test]
fn test_repl_routes_puts_through_the_session_handler() {
    let session = Session::with_print_handler(PrintHandler::buffer());
    let mut output = Vec::new();
    repl(Cursor::new("puts(\"hi\")\n"), &mut output, &session).unwrap();

    assert_eq!(session.print_handler().output(), "hi\n");
    assert_eq!(String::from_utf8(output).unwrap(), ">> null\n>> ");
}

#[test]
fn test_command_line() {
    assert_eq!(Command::from_args::<&str>(&[]), Command::Repl);
    assert_eq!(
        Command::from_args(&["script.tam"]),
        Command::Run("script.tam".into())
    );
    assert_eq!(Command::from_args(&["a", "b"]), Command::Usage);
}

#[test]
fn test_missing_script_is_a_driver_error() {
    let err = tamc::run_script(std::path::Path::new("/definitely/not/here.tam")).unwrap_err();
    assert!(err.to_string().starts_with("could not read /definitely/not/here.tam: "));
}

#[test]
fn test_deeply_nested_programs_run() {
    let negations = format!("{}1", "-".repeat(10_000));
    assert_eq!(run(&negations).0.as_deref(), Some("1"));

    let sum = vec!["1"; 10_000].join(" + ");
    assert_eq!(run(&sum).0.as_deref(), Some("10000"));

    let quoted = format!("quote({}true)", "!".repeat(3_000));
    let rendered = run(&quoted).0.unwrap();
    assert!(rendered.starts_with("quote((!(!"));
    assert!(rendered.ends_with("true)))"));
}

#[test]
fn test_repl_skips_lines_that_are_not_utf8() {
    let session = Session::with_print_handler(PrintHandler::buffer());
    let input = Cursor::new(b"\xff\xfe\n1 + 1\n".to_vec());
    let mut output = Vec::new();
    repl(input, &mut output, &session).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with(">> error: invalid UTF-8 input: "));
    assert!(output.ends_with("\n>> 2\n>> "));
}
