use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::Value;

/// Shared handle to an [`Environment`].
///
/// Scopes are aliased: a closure and the block that created it refer to the
/// same environment, and an environment stays alive for as long as any
/// captured reference to it exists.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A lexical scope: a mapping from names to values plus an optional link to
/// the enclosing scope.
///
/// Lookup walks outward through the enclosing chain until the name is found
/// or the chain is exhausted. Binding always writes into this scope, so
/// shadowing an outer name is the only observable form of update.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<EnvRef>,
}

impl Environment {
    /// Creates an empty root environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment enclosed by `outer`.
    ///
    /// Used for function calls: the new scope holds the parameter bindings
    /// and resolves everything else through the function's captured
    /// environment.
    #[must_use]
    pub fn enclosed(outer: EnvRef) -> Self {
        Self { store: HashMap::new(),
               outer: Some(outer) }
    }

    /// Wraps this environment in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Looks `name` up in this scope, then outward through the enclosing
    /// scopes.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::{environment::Environment, value::Value};
    ///
    /// let outer = Environment::new().into_ref();
    /// outer.borrow_mut().set("x", Value::Number(1.0));
    ///
    /// let inner = Environment::enclosed(outer);
    /// assert!(inner.get("x").is_some());
    /// assert!(inner.get("y").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }

        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Binds `name` to `value` in this scope, shadowing any binding of the
    /// same name in an enclosing scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}
