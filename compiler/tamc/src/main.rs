//! `tam`: run a Tamarin script, or start a REPL with no arguments.

use std::io;
use std::process::ExitCode;

use tamc::{Command, DriverError, Session, EXIT_USAGE, USAGE};

fn main() -> ExitCode {
    tamc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match Command::from_args(&args) {
        Command::Usage => {
            println!("{USAGE}");
            return ExitCode::from(EXIT_USAGE);
        }
        Command::Repl => tamc::repl(io::stdin().lock(), io::stdout(), &Session::new()),
        Command::Run(path) => tamc::run_script(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &DriverError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}
