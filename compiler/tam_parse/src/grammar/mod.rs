//! Grammar productions and the prefix/infix dispatch tables.

mod expr;
mod stmt;

use rustc_hash::FxHashMap;
use tam_ir::{Expression, TokenKind};

use crate::Parser;

/// Parses an expression that starts at the current token.
pub(crate) type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> Option<Expression>;

/// Parses the rest of an expression whose operator is the current token,
/// given the already-parsed left operand.
pub(crate) type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression) -> Option<Expression>;

pub(crate) fn prefix_table<'src>() -> FxHashMap<TokenKind, PrefixParseFn<'src>> {
    let entries: [(TokenKind, PrefixParseFn<'src>); 13] = [
        (TokenKind::Ident, Parser::parse_identifier),
        (TokenKind::Int, Parser::parse_integer_literal),
        (TokenKind::String, Parser::parse_string_literal),
        (TokenKind::True, Parser::parse_boolean_literal),
        (TokenKind::False, Parser::parse_boolean_literal),
        (TokenKind::Bang, Parser::parse_prefix_expression),
        (TokenKind::Minus, Parser::parse_prefix_expression),
        (TokenKind::LParen, Parser::parse_grouped_expression),
        (TokenKind::If, Parser::parse_if_expression),
        (TokenKind::Function, Parser::parse_function_literal),
        (TokenKind::Macro, Parser::parse_macro_literal),
        (TokenKind::LBracket, Parser::parse_array_literal),
        (TokenKind::LBrace, Parser::parse_hash_literal),
    ];
    entries.into_iter().collect()
}

pub(crate) fn infix_table<'src>() -> FxHashMap<TokenKind, InfixParseFn<'src>> {
    let entries: [(TokenKind, InfixParseFn<'src>); 10] = [
        (TokenKind::Plus, Parser::parse_infix_expression),
        (TokenKind::Minus, Parser::parse_infix_expression),
        (TokenKind::Asterisk, Parser::parse_infix_expression),
        (TokenKind::Slash, Parser::parse_infix_expression),
        (TokenKind::Lt, Parser::parse_infix_expression),
        (TokenKind::Gt, Parser::parse_infix_expression),
        (TokenKind::Eq, Parser::parse_infix_expression),
        (TokenKind::NotEq, Parser::parse_infix_expression),
        (TokenKind::LParen, Parser::parse_call_expression),
        (TokenKind::LBracket, Parser::parse_index_expression),
    ];
    entries.into_iter().collect()
}
