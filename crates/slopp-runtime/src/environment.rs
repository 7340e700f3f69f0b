//! Lexical scopes
//!
//! Each scope maps names to values, remembers which of its own names are
//! constant, and links to its parent. Parent links are strong so that a
//! closure keeps alive every scope it may resolve through.

use crate::value::{RuntimeError, Value};
use crate::span::Span;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Shared handle to a scope
pub type Env = Rc<Environment>;

/// One scope in the chain
pub struct Environment {
    parent: Option<Env>,
    values: RefCell<HashMap<String, Value>>,
    constants: RefCell<HashSet<String>>,
}

impl Environment {
    /// Root scope with no parent
    pub fn global() -> Env {
        Rc::new(Self {
            parent: None,
            values: RefCell::new(HashMap::new()),
            constants: RefCell::new(HashSet::new()),
        })
    }

    /// Root scope whose only bindings are the given constants
    pub fn global_with_constants<I>(bindings: I) -> Env
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let values: HashMap<String, Value> = bindings.into_iter().collect();
        let constants = values.keys().cloned().collect();
        Rc::new(Self {
            parent: None,
            values: RefCell::new(values),
            constants: RefCell::new(constants),
        })
    }

    /// New empty scope whose parent is `parent`
    pub fn child(parent: &Env) -> Env {
        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            values: RefCell::new(HashMap::new()),
            constants: RefCell::new(HashSet::new()),
        })
    }

    /// Bind `name` in this scope.
    ///
    /// Fails if this scope already binds `name`; ancestors are not checked,
    /// so shadowing an outer binding is allowed.
    pub fn declare(
        &self,
        name: &str,
        value: Value,
        constant: bool,
    ) -> Result<Value, RuntimeError> {
        let mut values = self.values.borrow_mut();
        if values.contains_key(name) {
            return Err(RuntimeError::AlreadyDeclared {
                name: name.to_string(),
                span: Span::dummy(),
            });
        }

        log::trace!(target: "slopp::env", "declare {} (constant: {})", name, constant);
        values.insert(name.to_string(), value.clone());
        if constant {
            self.constants.borrow_mut().insert(name.to_string());
        }
        Ok(value)
    }

    /// Rebind `name` in the nearest scope that owns it
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, RuntimeError> {
        let owner = self
            .resolve(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                span: Span::dummy(),
            })?;

        if owner.constants.borrow().contains(name) {
            return Err(RuntimeError::ConstantAssignment {
                name: name.to_string(),
                span: Span::dummy(),
            });
        }

        log::trace!(target: "slopp::env", "assign {}", name);
        owner
            .values
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(value)
    }

    /// Value bound to `name` in the nearest scope that owns it
    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.resolve(name)
            .and_then(|owner| owner.values.borrow().get(name).cloned())
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                span: Span::dummy(),
            })
    }

    /// Innermost scope, starting at `self`, that binds `name`
    pub fn resolve(&self, name: &str) -> Option<&Environment> {
        let mut env = self;
        loop {
            if env.values.borrow().contains_key(name) {
                return Some(env);
            }
            env = env.parent.as_deref()?;
        }
    }

    /// Whether this scope itself binds `name`
    pub fn binds_locally(&self, name: &str) -> bool {
        self.values.borrow().contains_key(name)
    }

    /// Whether `name` is bound as a constant in this scope
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.borrow().contains(name)
    }

    /// Names bound directly in this scope, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
