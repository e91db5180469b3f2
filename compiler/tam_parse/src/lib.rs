//! Pratt parser for Tamarin.
//!
//! Expressions are parsed by precedence climbing over two dispatch tables
//! keyed by token kind: prefix parse functions (literals, identifiers,
//! prefix operators, grouping, `if`, `fn`, `macro`, arrays, hashes) and
//! infix parse functions (binary operators, calls, indexing).
//!
//! Errors never abort the parse. Each one is recorded as a [`Diagnostic`]
//! and the statement that produced it is dropped, so one pass can report
//! several problems.

mod cursor;
mod grammar;
mod precedence;

use rustc_hash::FxHashMap;
use tam_diagnostic::{Diagnostic, ErrorCode};
use tam_ir::{Program, Span, Token, TokenKind};
use tracing::trace;

use cursor::Cursor;
use grammar::{InfixParseFn, PrefixParseFn};
pub use precedence::Precedence;

/// Result of parsing a whole program.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Diagnostics rendered as `"<line>:<column>: <message>"`.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(Diagnostic::render).collect()
    }
}

/// Lex and parse a source string.
pub fn parse(source: &str) -> ParseOutput {
    let tokens = tam_lexer::tokenize(source);
    Parser::new(source, tokens).parse_program()
}

/// Parser state.
pub struct Parser<'src> {
    source: &'src str,
    cursor: Cursor,
    prefix_fns: FxHashMap<TokenKind, PrefixParseFn<'src>>,
    infix_fns: FxHashMap<TokenKind, InfixParseFn<'src>>,
    errors: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    /// Create a parser over `tokens`, which were lexed from `source`.
    ///
    /// `source` is only used to resolve line and column numbers.
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Parser {
            source,
            cursor: Cursor::new(tokens),
            prefix_fns: grammar::prefix_table(),
            infix_fns: grammar::infix_table(),
            errors: Vec::new(),
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();
        self.skip_illegal();

        while !self.check_current(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }

        ParseOutput {
            program: Program::new(statements),
            errors: self.errors,
        }
    }

    // --- Token navigation ---

    fn current(&self) -> &Token {
        self.cursor.current()
    }

    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    fn check_current(&self, kind: TokenKind) -> bool {
        self.cursor.current_kind() == kind
    }

    fn check_peek(&self, kind: TokenKind) -> bool {
        self.cursor.peek_kind() == kind
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.cursor.peek_kind())
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.cursor.current_kind())
    }

    /// Move to the next token, reporting and skipping illegal ones.
    fn advance(&mut self) {
        self.cursor.bump();
        self.skip_illegal();
        trace!(kind = %self.current_kind(), literal = %self.current().literal, "advance");
    }

    fn skip_illegal(&mut self) {
        while self.check_current(TokenKind::Illegal) {
            let token = self.current().clone();
            let code = if token.literal.starts_with('"') {
                ErrorCode::E0001
            } else {
                ErrorCode::E0002
            };
            self.error_at(code, token.span, format!("illegal token <{}>", token.literal));
            self.cursor.bump();
        }
    }

    /// Advance onto the next token if it has `kind`, otherwise report `message`
    /// at that token.
    fn expect_peek(&mut self, kind: TokenKind, message: &str) -> Option<()> {
        if self.check_peek(kind) {
            self.advance();
            Some(())
        } else {
            let span = self.cursor.peek().span;
            self.error_at(ErrorCode::E1001, span, message);
            None
        }
    }

    fn error_at(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(code, message, span, self.source);
        trace!(error = %diagnostic, "parse error");
        self.errors.push(diagnostic);
    }
}

#[cfg(test)]
mod tests;
