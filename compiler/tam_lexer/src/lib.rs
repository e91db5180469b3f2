//! Lexer for Tamarin using logos.
//!
//! Produces one [`Token`] per call to [`Lexer::next_token`], then `Eof`
//! forever. Whitespace is skipped. Anything that starts no token, and a
//! string literal that reaches end of input without its closing quote,
//! become `Illegal` tokens carrying the offending text.

use logos::Logos;
use tam_ir::{Span, Token, TokenKind};

/// Raw token from logos, before keyword lookup and literal extraction.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // Keywords are resolved from identifiers by `TokenKind::lookup_ident`
    #[regex(r"[A-Za-z_]+")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""[^"]*""#)]
    String,

    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    // Two-character operators win over their one-character prefixes
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,

    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

/// Streaming lexer over a source string.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, RawToken>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            inner: RawToken::lexer(source),
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            let end = Span::point(u32::try_from(self.source.len()).unwrap_or(u32::MAX));
            return Token::new(TokenKind::Eof, "", end);
        };

        let span = Span::from_range(self.inner.span());
        let slice = self.inner.slice();

        match result {
            Ok(raw) => convert_token(raw, slice, span),
            Err(()) => Token::new(TokenKind::Illegal, slice, span),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `Eof`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Lex a whole source string. The result always ends with one `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Token {
    let kind = match raw {
        RawToken::Ident => TokenKind::lookup_ident(slice),
        RawToken::Int => TokenKind::Int,
        RawToken::String => {
            let contents = slice
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(slice);
            return Token::new(TokenKind::String, contents, span);
        }
        RawToken::UnterminatedString => TokenKind::Illegal,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
    };
    Token::new(kind, slice, span)
}
