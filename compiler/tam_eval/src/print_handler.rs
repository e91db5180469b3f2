//! Output sink for `puts`.
//!
//! The interpreter never writes to stdout directly. Output goes through a
//! `PrintHandler`, which either forwards to stdout, captures into a buffer
//! for tests, or discards.

use std::cell::RefCell;
use std::rc::Rc;

/// Where printed output goes. Enum dispatch; no trait objects.
#[derive(Debug)]
pub enum PrintHandler {
    Stdout,
    Buffer(RefCell<String>),
    Silent,
}

/// Shared handle, so callers can inspect output the interpreter produced.
pub type SharedPrintHandler = Rc<PrintHandler>;

impl PrintHandler {
    pub fn stdout() -> SharedPrintHandler {
        Rc::new(PrintHandler::Stdout)
    }

    pub fn buffer() -> SharedPrintHandler {
        Rc::new(PrintHandler::Buffer(RefCell::new(String::new())))
    }

    pub fn silent() -> SharedPrintHandler {
        Rc::new(PrintHandler::Silent)
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(msg);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Captured output. Empty unless this is a buffer.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.borrow().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_lines() {
        let handler = PrintHandler::buffer();
        handler.println("hello");
        handler.println("");
        assert_eq!(handler.output(), "hello\n\n");
    }

    #[test]
    fn test_stdout_captures_nothing() {
        assert_eq!(PrintHandler::stdout().output(), "");
    }

    #[test]
    fn test_silent_discards() {
        let handler = PrintHandler::silent();
        handler.println("ignored");
        assert_eq!(handler.output(), "");
    }
}
