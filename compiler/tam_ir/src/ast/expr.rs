//! Expression nodes.

use std::fmt;
use std::rc::Rc;

use tam_stack::ensure_sufficient_stack;

use super::{write_comma_separated, BlockStatement, Identifier, InfixOperator, PrefixOperator};
use crate::{Token, TokenKind};

/// Expressions.
///
/// Children are boxed; function and macro literals share their parameters
/// and body through `Rc` so closures can hold them without copying.
#[derive(Eq, PartialEq, Debug)]
pub enum Expression {
    Identifier(Identifier),
    Integer {
        token: Token,
        value: i64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    String {
        token: Token,
        value: String,
    },
    /// `[a, b, c]`
    Array {
        token: Token,
        elements: Vec<Expression>,
    },
    /// `{k: v, ...}`. Pair order is source order but carries no meaning.
    Hash {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },
    /// `fn(params) { body }`
    Function(FunctionLiteral),
    /// `macro(params) { body }`
    Macro(FunctionLiteral),
    /// `function(arguments)`; `token` is the `(`.
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// `left[index]`; `token` is the `[`.
    Index {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
    Prefix {
        token: Token,
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    /// `if (condition) { consequence } else { alternative }`
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::Function(lit) | Expression::Macro(lit) => &lit.token,
            Expression::Integer { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::String { token, .. }
            | Expression::Array { token, .. }
            | Expression::Hash { token, .. }
            | Expression::Call { token, .. }
            | Expression::Index { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. } => token,
        }
    }

    pub fn token_mut(&mut self) -> &mut Token {
        match self {
            Expression::Identifier(ident) => &mut ident.token,
            Expression::Function(lit) | Expression::Macro(lit) => &mut lit.token,
            Expression::Integer { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::String { token, .. }
            | Expression::Array { token, .. }
            | Expression::Hash { token, .. }
            | Expression::Call { token, .. }
            | Expression::Index { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. } => token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }

    /// Synthesize an integer literal, e.g. when splicing a runtime value.
    pub fn integer(value: i64) -> Self {
        Expression::Integer {
            token: Token::synthetic(TokenKind::Int, value.to_string()),
            value,
        }
    }

    pub fn boolean(value: bool) -> Self {
        let kind = if value { TokenKind::True } else { TokenKind::False };
        Expression::Boolean {
            token: Token::synthetic(kind, value.to_string()),
            value,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        Expression::String {
            token: Token::synthetic(TokenKind::String, value.clone()),
            value,
        }
    }

    /// The identifier name when this is a plain identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(ident) => Some(&ident.value),
            _ => None,
        }
    }
}

/// Cloning recurses once per nesting level, on a grown stack when needed.
impl Clone for Expression {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Expression::Identifier(ident) => Expression::Identifier(ident.clone()),
            Expression::Integer { token, value } => Expression::Integer {
                token: token.clone(),
                value: *value,
            },
            Expression::Boolean { token, value } => Expression::Boolean {
                token: token.clone(),
                value: *value,
            },
            Expression::String { token, value } => Expression::String {
                token: token.clone(),
                value: value.clone(),
            },
            Expression::Array { token, elements } => Expression::Array {
                token: token.clone(),
                elements: elements.clone(),
            },
            Expression::Hash { token, pairs } => Expression::Hash {
                token: token.clone(),
                pairs: pairs.clone(),
            },
            Expression::Function(lit) => Expression::Function(lit.clone()),
            Expression::Macro(lit) => Expression::Macro(lit.clone()),
            Expression::Call {
                token,
                function,
                arguments,
            } => Expression::Call {
                token: token.clone(),
                function: function.clone(),
                arguments: arguments.clone(),
            },
            Expression::Index { token, left, index } => Expression::Index {
                token: token.clone(),
                left: left.clone(),
                index: index.clone(),
            },
            Expression::Prefix {
                token,
                operator,
                right,
            } => Expression::Prefix {
                token: token.clone(),
                operator: *operator,
                right: right.clone(),
            },
            Expression::Infix {
                token,
                left,
                operator,
                right,
            } => Expression::Infix {
                token: token.clone(),
                left: left.clone(),
                operator: *operator,
                right: right.clone(),
            },
            Expression::If {
                token,
                condition,
                consequence,
                alternative,
            } => Expression::If {
                token: token.clone(),
                condition: condition.clone(),
                consequence: consequence.clone(),
                alternative: alternative.clone(),
            },
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_to(f))
    }
}

impl Expression {
    fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => fmt::Display::fmt(ident, f),
            Expression::Integer { value, .. } => write!(f, "{value}"),
            Expression::Boolean { value, .. } => write!(f, "{value}"),
            Expression::String { value, .. } => f.write_str(value),
            Expression::Array { elements, .. } => {
                f.write_str("[")?;
                write_comma_separated(f, elements)?;
                f.write_str("]")
            }
            Expression::Hash { pairs, .. } => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Expression::Function(lit) | Expression::Macro(lit) => fmt::Display::fmt(lit, f),
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{function}(")?;
                write_comma_separated(f, arguments)?;
                f.write_str(")")
            }
            Expression::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({operator}{right})"),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parameters and body shared by function and macro literals.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionLiteral {
    /// The `fn` or `macro` keyword token.
    pub token: Token,
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
}

impl FunctionLiteral {
    pub fn new(token: Token, parameters: Vec<Identifier>, body: BlockStatement) -> Self {
        FunctionLiteral {
            token,
            parameters: parameters.into(),
            body: Rc::new(body),
        }
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.token.literal)?;
        write_comma_separated(f, &self.parameters)?;
        write!(f, ") {}", self.body)
    }
}
