//! Tamarin IR - shared syntax types for the Tamarin interpreter.
//!
//! This crate contains the data structures every other stage agrees on:
//! - Spans for source locations
//! - Tokens produced by the lexer
//! - The syntax tree produced by the parser
//! - The post-order tree rewrite used by the macro system
//!
//! Nodes own their children. The only sharing is in function and macro
//! literals, whose parameters and bodies sit behind `Rc` so that closures
//! created at runtime reference the same subtree as the program.

mod span;
mod token;
pub mod ast;
pub mod rewrite;

pub use span::Span;
pub use token::{Token, TokenKind};
pub use ast::{
    BlockStatement, Expression, FunctionLiteral, Identifier, InfixOperator, Node,
    PrefixOperator, Program, Statement,
};
pub use rewrite::{rewrite, rewrite_expressions, Rewrite, Rewriter};
