//! Runtime value representation
//!
//! Primitives are stored inline. Objects, functions and natives are shared
//! through `Rc`, so cloning a `Value` never copies an object: two bindings of
//! the same object observe each other's mutations.

use crate::ast::Stmt;
use crate::environment::Env;
use crate::span::Span;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Host callback behind a native function.
///
/// Receives the evaluated arguments, the calling environment and the span of
/// the call expression (for error reporting).
pub type NativeFn = Rc<dyn Fn(&[Value], &Env, Span) -> Result<Value, RuntimeError>>;

/// Nesting depth after which display output is elided
const MAX_DISPLAY_DEPTH: usize = 16;

type ObjectCell = RefCell<BTreeMap<String, Value>>;

/// Runtime value
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Object(ObjectRef),
    Function(Rc<FunctionValue>),
    NativeFunction(Rc<NativeFunction>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Fresh empty object
    pub fn object() -> Self {
        Value::Object(ObjectRef::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::NativeFunction(_) => "native function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Language-level `==`.
    ///
    /// Primitives compare by value, everything else by identity. Values of
    /// different variants are never equal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `path` holds the objects currently being printed, outermost first
    fn fmt_nested(
        &self,
        f: &mut fmt::Formatter<'_>,
        path: &mut Vec<*const ObjectCell>,
    ) -> fmt::Result {
        match self {
            Value::String(s) if !path.is_empty() => write!(f, "{:?}", s),
            Value::Object(obj) => obj.fmt_nested(f, path),
            other => write!(f, "{}", other),
        }
    }

    fn structural_eq(
        &self,
        other: &Value,
        assumed: &mut Vec<(*const ObjectCell, *const ObjectCell)>,
    ) -> bool {
        let (a, b) = match (self, other) {
            (Value::Object(a), Value::Object(b)) => (a, b),
            _ => return self.loose_eq(other),
        };
        if a.ptr_eq(b) {
            return true;
        }
        // A pair already under comparison is taken as equal; any real
        // difference still fails the enclosing comparison.
        let pair = (Rc::as_ptr(&a.0), Rc::as_ptr(&b.0));
        if assumed.contains(&pair) {
            return true;
        }
        assumed.push(pair);

        let (left, right) = (a.0.borrow(), b.0.borrow());
        let equal = left.len() == right.len()
            && left
                .iter()
                .zip(right.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.structural_eq(vb, assumed));
        equal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Object(obj) => obj.fmt_nested(f, &mut Vec::new()),
            Value::Function(func) => write!(f, "<funkcija {}>", func.name),
            Value::NativeFunction(native) => write!(f, "<native funkcija {}>", native.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Object(obj) => write!(f, "Object({})", Value::Object(obj.clone())),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::NativeFunction(native) => write!(f, "{:?}", native),
        }
    }
}

/// Structural equality, used by tests and host code.
///
/// Objects compare by contents here, cycles included; the language's own
/// `==` is [`Value::loose_eq`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other, &mut Vec::new())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Shared, mutable object storage.
///
/// Keys are kept sorted so display output is stable.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<ObjectCell>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Objects already on `path` print as `{ ... }`
    fn fmt_nested(
        &self,
        f: &mut fmt::Formatter<'_>,
        path: &mut Vec<*const ObjectCell>,
    ) -> fmt::Result {
        let props = self.0.borrow();
        if props.is_empty() {
            return write!(f, "{{}}");
        }
        let ptr = Rc::as_ptr(&self.0);
        if path.len() >= MAX_DISPLAY_DEPTH || path.contains(&ptr) {
            return write!(f, "{{ ... }}");
        }

        path.push(ptr);
        write!(f, "{{ ")?;
        for (i, (key, value)) in props.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: ", key)?;
            value.fmt_nested(f, path)?;
        }
        path.pop();
        write!(f, " }}")
    }
}

impl FromIterator<(String, Value)> for ObjectRef {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        ObjectRef(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

/// User-defined function closing over its declaration environment
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub closure: Env,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Host-provided function
pub struct NativeFunction {
    pub name: String,
    /// Exact argument count, or `None` for variadic natives
    pub arity: Option<usize>,
    pub func: NativeFn,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value], &Env, Span) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity: Some(arity),
            func: Rc::new(func),
        }
    }

    pub fn variadic(
        name: impl Into<String>,
        func: impl Fn(&[Value], &Env, Span) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity: None,
            func: Rc::new(func),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Runtime error type with source span information
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("Variable '{name}' is already declared in this scope")]
    AlreadyDeclared { name: String, span: Span },

    #[error("Cannot assign to constant '{name}'")]
    ConstantAssignment { name: String, span: Span },

    #[error("Invalid assignment target")]
    InvalidAssignmentTarget { span: Span },

    #[error("Division by zero")]
    DivisionByZero { span: Span },

    #[error("Modulo by zero")]
    ModuloByZero { span: Span },

    #[error("Operator '{op}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
        span: Span,
    },

    #[error("Value of type {type_name} is not callable")]
    NotCallable { type_name: &'static str, span: Span },

    #[error("Function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("Cannot access property '{key}' of {type_name}")]
    NotAnObject {
        key: String,
        type_name: &'static str,
        span: Span,
    },

    #[error("Object keys must be strings or numbers, got {type_name}")]
    InvalidKey { type_name: &'static str, span: Span },

    #[error("Maximum call depth of {limit} exceeded")]
    StackOverflow { limit: usize, span: Span },

    #[error("{name}: {msg}")]
    NativeArgument {
        name: String,
        msg: String,
        span: Span,
    },

    #[error("Failed to write output: {msg}")]
    Output { msg: String, span: Span },
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::AlreadyDeclared { span, .. }
            | RuntimeError::ConstantAssignment { span, .. }
            | RuntimeError::InvalidAssignmentTarget { span }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::ModuloByZero { span }
            | RuntimeError::InvalidOperands { span, .. }
            | RuntimeError::NotCallable { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::NotAnObject { span, .. }
            | RuntimeError::InvalidKey { span, .. }
            | RuntimeError::StackOverflow { span, .. }
            | RuntimeError::NativeArgument { span, .. }
            | RuntimeError::Output { span, .. } => *span,
        }
    }

    fn span_mut(&mut self) -> &mut Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::AlreadyDeclared { span, .. }
            | RuntimeError::ConstantAssignment { span, .. }
            | RuntimeError::InvalidAssignmentTarget { span }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::ModuloByZero { span }
            | RuntimeError::InvalidOperands { span, .. }
            | RuntimeError::NotCallable { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::NotAnObject { span, .. }
            | RuntimeError::InvalidKey { span, .. }
            | RuntimeError::StackOverflow { span, .. }
            | RuntimeError::NativeArgument { span, .. }
            | RuntimeError::Output { span, .. } => span,
        }
    }

    /// Attach a location to an error raised without one (such as by the
    /// environment). Errors that already carry a span keep it.
    pub fn at(mut self, span: Span) -> Self {
        let current = self.span_mut();
        if current.is_dummy() {
            *current = span;
        }
        self
    }
}
