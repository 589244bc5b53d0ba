use std::{collections::HashMap, fmt, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::Block,
    interpreter::{builtins::Builtin, environment::EnvRef},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// bindings, function returns, and conditional evaluations. Collection and
/// function values are reference-counted, so cloning a `Value` is cheap and
/// sharing follows the reference semantics of the language.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value. Falsy.
    Nil,
    /// A boolean value, `true` or `false`. Only `false` is falsy.
    Boolean(bool),
    /// A numeric value (double precision floating-point). There is no
    /// separate integer kind.
    Number(f64),
    /// An immutable string of characters.
    Str(Rc<str>),
    /// An array of `Value` elements.
    Array(Rc<Vec<Value>>),
    /// A hash mapping hashable keys to values. The stored [`HashPair`] keeps
    /// the original key value so it can be displayed again.
    Hash(Rc<HashMap<HashKey, HashPair>>),
    /// A user-defined function together with its captured environment.
    Function(Rc<FunctionValue>),
    /// A built-in function.
    Builtin(Builtin),
    /// Internal sentinel carrying a `return`ed value out of nested blocks.
    /// Unwrapped exactly once at the enclosing function-call boundary and
    /// never visible to user code.
    Return(Box<Value>),
}

/// A user-defined function value.
///
/// Closures capture the environment they were created in by reference; the
/// captured environment stays alive for as long as any function value refers
/// to it.
#[derive(Clone)]
pub struct FunctionValue {
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
    /// The function body.
    pub body:   Block,
    /// The environment captured at creation time.
    pub env:    EnvRef,
}

/// A key/value pair stored in a hash.
///
/// The original key value is kept alongside the mapped value because the
/// [`HashKey`] fingerprint alone cannot be turned back into a displayable
/// value.
#[derive(Debug, Clone)]
pub struct HashPair {
    /// The key as the user wrote it.
    pub key:   Value,
    /// The mapped value.
    pub value: Value,
}

/// A structural fingerprint of a hashable value, usable as a map key.
///
/// Only booleans, numbers and strings are hashable. Fingerprints of the same
/// variant compare equal exactly when the underlying values compare equal,
/// and different variants never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    /// Fingerprint of a [`Value::Boolean`].
    Boolean(bool),
    /// Fingerprint of a [`Value::Number`]. Wrapped in [`OrderedFloat`] to
    /// obtain a total ordering over floats.
    Number(OrderedFloat<f64>),
    /// Fingerprint of a [`Value::Str`].
    Str(Rc<str>),
}

impl Value {
    /// Returns the user-visible name of this value's type, as it appears in
    /// runtime error messages.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "NUMBER");
    /// assert_eq!(Value::Nil.type_name(), "NIL");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "NIL",
            Self::Boolean(_) => "BOOLEAN",
            Self::Number(_) => "NUMBER",
            Self::Str(_) => "STRING",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Return(_) => "RETURN_VALUE",
        }
    }

    /// Returns whether this value counts as true in a condition.
    ///
    /// `nil` and `false` are falsy; everything else, including `0`, the empty
    /// string and the empty array, is truthy.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::value::Value;
    ///
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Boolean(false).is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Boolean(b) => *b,
            _ => true,
        }
    }

    /// Derives the hash-key fingerprint of this value, or `None` if the
    /// variant is not hashable.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::value::{HashKey, Value};
    ///
    /// assert_eq!(Value::Boolean(true).hash_key(), Some(HashKey::Boolean(true)));
    /// assert_eq!(Value::Nil.hash_key(), None);
    /// ```
    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Self::Boolean(b) => Some(HashKey::Boolean(*b)),
            Self::Number(n) => Some(HashKey::Number(OrderedFloat(*n))),
            Self::Str(s) => Some(HashKey::Str(Rc::clone(s))),
            _ => None,
        }
    }

    /// Compares two values by identity, the fallback used by `==` and `!=`
    /// when the operands are not both numbers or both strings.
    ///
    /// `nil` equals `nil` and booleans compare by value; arrays, hashes and
    /// functions compare equal only when they are the same object.
    #[must_use]
    pub fn identity_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => Rc::ptr_eq(left, right),
            (Self::Hash(left), Self::Hash(right)) => Rc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => Rc::ptr_eq(left, right),
            (Self::Builtin(left), Self::Builtin(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the user-visible representation of the value, as produced by
    /// the `print` built-in and the interactive prompt.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(elements) => {
                write!(f, "[")?;

                for (index, value) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Hash(pairs) => {
                write!(f, "{{")?;

                for (index, pair) in pairs.values().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{}: {}", pair.key, pair.value)?;
                }

                write!(f, "}}")
            },
            Self::Function(function) => write!(f, "fn({})", function.params.join(", ")),
            Self::Builtin(_) => write!(f, "builtin"),
            Self::Return(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Debug for FunctionValue {
    /// The captured environment is elided: it may refer back to this very
    /// function, and printing it would recurse forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}
