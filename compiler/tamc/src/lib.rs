//! Tamarin driver.
//!
//! Runs source text through the whole pipeline: parse, report diagnostics,
//! define and expand macros, evaluate. The `tam` binary is a thin wrapper
//! around [`run_script`] and [`repl`].

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use tam_eval::{
    define_macros, Environment, Interpreter, MacroError, Object, PrintHandler, SharedPrintHandler,
};
use thiserror::Error;
use tracing::{debug, trace};

pub const PROMPT: &str = ">> ";
pub const USAGE: &str = "Usage: tam [script]";

/// Exit status for bad command-line usage (`EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call multiple times.
/// Enable with e.g. `RUST_LOG=tam_eval=debug` or `RUST_LOG=tam_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
                .with(filter)
                .init();
        }
    });
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Repl,
    Run(PathBuf),
    Usage,
}

impl Command {
    /// Interpret the arguments following the program name.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        match args {
            [] => Command::Repl,
            [script] => Command::Run(PathBuf::from(script.as_ref())),
            _ => Command::Usage,
        }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read {}: {source}", path.display())]
    ReadScript { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result of running one piece of source text.
#[derive(Debug)]
pub enum Outcome {
    /// Parsing failed; nothing was evaluated.
    ParseErrors(Vec<String>),
    /// Macro expansion failed; nothing was evaluated.
    MacroFailed(MacroError),
    /// The program ran and produced a value worth showing.
    Value(Object),
    /// The program ran but ended in a `let`, or had nothing to run.
    Unit,
}

impl Outcome {
    /// The text to show the user, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            Outcome::ParseErrors(messages) => {
                let mut text = String::from("parser errors:");
                for message in messages {
                    text.push_str("\n\t");
                    text.push_str(message);
                }
                Some(text)
            }
            Outcome::MacroFailed(err) => Some(format!("macro error: {err}")),
            Outcome::Value(value) => Some(value.inspect()),
            Outcome::Unit => None,
        }
    }
}

/// An evaluation environment and a macro environment that persist across
/// inputs.
pub struct Session {
    interpreter: Interpreter,
    env: Environment,
    macro_env: Environment,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session whose `puts` writes to stdout.
    pub fn new() -> Self {
        Self::with_print_handler(PrintHandler::stdout())
    }

    pub fn with_print_handler(print_handler: SharedPrintHandler) -> Self {
        Session {
            interpreter: Interpreter::with_print_handler(print_handler),
            env: Environment::new(),
            macro_env: Environment::new(),
        }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.interpreter.print_handler()
    }

    /// Parse, expand and evaluate `source`.
    pub fn run(&self, source: &str) -> Outcome {
        let output = tam_parse::parse(source);
        if output.has_errors() {
            debug!(count = output.errors.len(), "parse failed");
            return Outcome::ParseErrors(output.error_messages());
        }

        let mut program = output.program;
        define_macros(&mut program, &self.macro_env);
        let program = match self.interpreter.expand_macros(program, &self.macro_env) {
            Ok(program) => program,
            Err(err) => return Outcome::MacroFailed(err),
        };

        let ends_in_let = match program.statements.last() {
            Some(stmt) => stmt.is_let(),
            None => true,
        };
        let result = self.interpreter.eval_program(&program, &self.env);
        if ends_in_let && matches!(result, Object::Null) {
            Outcome::Unit
        } else {
            Outcome::Value(result)
        }
    }
}

/// Run `source` in a fresh session.
pub fn run_source(source: &str, print_handler: SharedPrintHandler) -> Outcome {
    Session::with_print_handler(print_handler).run(source)
}

/// Run the script at `path`, writing results to stdout.
pub fn run_script(path: &Path) -> Result<(), DriverError> {
    debug!(path = %path.display(), "running script");
    let source = std::fs::read_to_string(path).map_err(|source| DriverError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = Session::new().run(&source);
    if let Some(text) = outcome.render() {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
    }
    Ok(())
}

/// Read-eval-print loop: one line per input, until end of input.
///
/// A line that is not valid UTF-8 is reported and skipped.
pub fn repl<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    session: &Session,
) -> Result<(), DriverError> {
    let mut line = Vec::new();
    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        let source = match std::str::from_utf8(&line) {
            Ok(text) => text.trim_end_matches(['\n', '\r']),
            Err(err) => {
                debug!(%err, "rejected repl input");
                writeln!(output, "error: invalid UTF-8 input: {err}")?;
                continue;
            }
        };
        trace!(source, "repl input");

        if let Some(text) = session.run(source).render() {
            writeln!(output, "{text}")?;
        }
    }
}
