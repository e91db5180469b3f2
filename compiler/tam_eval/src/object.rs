//! Runtime values.
//!
//! `Object` is a cheap-to-clone handle: compound values sit behind `Rc`, so
//! cloning an array, hash or closure shares it rather than copying it.
//!
//! # Identity and interning
//!
//! `==` on arrays, hashes and functions compares identity (`Rc::ptr_eq`).
//! Empty arrays and empty hashes are interned: [`Object::array`] and
//! [`Object::hash`] hand out one canonical instance per thread for the empty
//! case, so every empty array is identical to every other. Integers,
//! booleans, null and strings compare by value, which coincides with
//! identity for their canonical zero, `true`/`false`, `null` and `""`.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tam_stack::ensure_sufficient_stack;
use tam_ir::{BlockStatement, Expression, Identifier};

use crate::environment::Environment;
use crate::print_handler::PrintHandler;

/// Signature of a native builtin.
pub type BuiltinFn = fn(&[Object], &PrintHandler) -> Object;

/// A runtime value.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(Rc<str>),
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashObject>),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Wraps the value of a `return` while it unwinds to the call boundary.
    ReturnValue(Box<Object>),
    Error(Rc<str>),
    /// An unevaluated expression produced by `quote`.
    Quote(Rc<Expression>),
    Macro(Rc<Function>),
}

thread_local! {
    static EMPTY_ARRAY: Rc<Vec<Object>> = Rc::new(Vec::new());
    static EMPTY_HASH: Rc<HashObject> = Rc::new(HashObject::default());
}

impl Object {
    pub const TRUE: Object = Object::Boolean(true);
    pub const FALSE: Object = Object::Boolean(false);

    /// Build an array, handing out the interned instance when empty.
    pub fn array(elements: Vec<Object>) -> Object {
        if elements.is_empty() {
            Object::Array(EMPTY_ARRAY.with(Rc::clone))
        } else {
            Object::Array(Rc::new(elements))
        }
    }

    /// Build a hash, handing out the interned instance when empty.
    pub fn hash(hash: HashObject) -> Object {
        if hash.is_empty() {
            Object::Hash(EMPTY_HASH.with(Rc::clone))
        } else {
            Object::Hash(Rc::new(hash))
        }
    }

    pub fn string(value: &str) -> Object {
        Object::String(Rc::from(value))
    }

    pub fn error(message: impl Into<String>) -> Object {
        Object::Error(Rc::from(message.into()))
    }

    #[inline]
    pub fn boolean(value: bool) -> Object {
        Object::Boolean(value)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Quote(_) => ObjectType::Quote,
            Object::Macro(_) => ObjectType::Macro,
        }
    }

    /// Everything except the interned falsy values is truthy.
    ///
    /// Falsy: `0`, `false`, `null`, `""`, `[]` and `{}`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Integer(value) => *value != 0,
            Object::Boolean(value) => *value,
            Object::Null => false,
            Object::String(value) => !value.is_empty(),
            Object::Array(elements) => !elements.is_empty(),
            Object::Hash(hash) => !hash.is_empty(),
            _ => true,
        }
    }

    /// The key this value hashes to, if it is hashable.
    ///
    /// Only integers, booleans and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => u64::from_ne_bytes(value.to_ne_bytes()),
            Object::Boolean(value) => u64::from(*value),
            Object::String(value) => fnv1a_64(value.as_bytes()),
            _ => return None,
        };
        Some(HashKey {
            kind: self.object_type(),
            value,
        })
    }

    /// Identity comparison used by `==` on compound values.
    pub fn same_instance(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) | (Object::Macro(a), Object::Macro(b)) => {
                Rc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    /// The human-readable rendering printed by the driver and `puts`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Object::Integer(value) => write!(f, "{value}"),
            Object::Boolean(value) => write!(f, "{value}"),
            Object::Null => f.write_str("null"),
            Object::String(value) => f.write_str(value),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Object::Hash(hash) => {
                f.write_str("{")?;
                for (i, pair) in hash.pairs().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}:{}", pair.key, pair.value)?;
                }
                f.write_str("}")
            }
            Object::Function(function) => function.fmt_with_keyword(f, "fn"),
            Object::Macro(function) => function.fmt_with_keyword(f, "macro"),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::ReturnValue(value) => fmt::Display::fmt(value, f),
            Object::Error(message) => write!(f, "ERROR: {message}"),
            Object::Quote(node) => write!(f, "quote({node})"),
        })
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::String(value) => write!(f, "String({value:?})"),
            Object::Error(message) => write!(f, "Error({message:?})"),
            Object::ReturnValue(value) => write!(f, "ReturnValue({value:?})"),
            other => write!(f, "{}({other})", other.object_type()),
        }
    }
}

/// Structural equality for assertions.
///
/// Compound values compare by identity here as well, matching `==` in the
/// guest language. Quotes compare their syntax trees.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::String(a), Object::String(b)) | (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Quote(a), Object::Quote(b)) => a == b,
            _ => self.same_instance(other),
        }
    }
}

/// Type tags, named as they appear in error messages.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
    Quote,
    Macro,
}

impl ObjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::String => "STRING",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Quote => "QUOTE",
            ObjectType::Macro => "MACRO",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash-map key derived from a hashable value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct HashKey {
    pub kind: ObjectType,
    pub value: u64,
}

/// FNV-1a, 64-bit.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
    const PRIME: u64 = 1_099_511_628_211;

    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// An entry of a hash object, keeping the original key for display.
#[derive(Clone, Debug, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Hash contents. Iteration follows first insertion of each key.
#[derive(Clone, Debug, Default)]
pub struct HashObject {
    entries: Vec<HashPair>,
    index: FxHashMap<HashKey, usize>,
}

impl HashObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot] = pair;
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push(pair);
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &HashPair> {
        self.entries.iter()
    }
}

/// A closure: parameters and body shared with the syntax tree, plus the
/// environment active where the literal was evaluated.
pub struct Function {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
    pub env: Environment,
}

impl Function {
    fn fmt_with_keyword(&self, f: &mut fmt::Formatter<'_>, keyword: &str) -> fmt::Result {
        write!(f, "{keyword}(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") {{\n{}\n}}", self.body)
    }
}

/// A native function, looked up by name after the environment chain.
#[derive(Copy, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}
