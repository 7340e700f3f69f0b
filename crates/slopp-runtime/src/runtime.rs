//! SLO++ runtime API for embedding

use crate::environment::Env;
use crate::error::Error;
use crate::interpreter::{Interpreter, RuntimeOptions};
use crate::parser;
use crate::span::Span;
use crate::stdlib::{self, Output};
use crate::value::{NativeFunction, RuntimeError, Value};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// SLO++ runtime instance
///
/// Owns a global scope with the prelude installed and an interpreter.
/// Bindings persist across `eval` calls.
///
/// # Examples
///
/// ```
/// use slopp_runtime::{Slopp, Value};
///
/// let runtime = Slopp::new();
/// runtime.eval("rezerviraj x = 4;").unwrap();
/// assert_eq!(runtime.eval("Kvadrat(x)").unwrap(), Value::Number(16.0));
/// ```
pub struct Slopp {
    interpreter: RefCell<Interpreter>,
    globals: Env,
}

impl Slopp {
    /// Runtime that prints to stdout
    pub fn new() -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::new()),
            globals: stdlib::global_scope(Output::Stdout),
        }
    }

    /// Send `izpisi` output to `output`.
    ///
    /// This rebuilds the global scope, so call it before declaring anything.
    ///
    /// ```
    /// use slopp_runtime::{Output, Slopp};
    ///
    /// let output = Output::capture();
    /// let runtime = Slopp::new().with_output(output.clone());
    /// runtime.eval("izpisi(\"Zdravo\")").unwrap();
    /// assert_eq!(output.take(), "Zdravo\n");
    /// ```
    pub fn with_output(mut self, output: Output) -> Self {
        self.globals = stdlib::global_scope(output);
        self
    }

    pub fn with_options(self, options: RuntimeOptions) -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::with_options(options)),
            globals: self.globals,
        }
    }

    /// The global scope
    pub fn globals(&self) -> &Env {
        &self.globals
    }

    /// Parse and evaluate `source` in the global scope
    pub fn eval(&self, source: &str) -> Result<Value, Error> {
        let program = parser::parse(source)?;
        let mut interpreter = self.interpreter.borrow_mut();
        Ok(interpreter.eval(&program, &self.globals)?)
    }

    /// Read and evaluate a source file
    pub fn eval_file(&self, path: impl AsRef<Path>) -> Result<Value, Error> {
        let path = path.as_ref();
        log::debug!(target: "slopp::runtime", "loading {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.eval(&source)
    }

    /// Declare a host function as a global constant.
    ///
    /// `arity` of `None` accepts any number of arguments.
    ///
    /// ```
    /// use slopp_runtime::{Slopp, Value};
    ///
    /// let runtime = Slopp::new();
    /// runtime
    ///     .define_native("Podvoji", Some(1), |args| match args.first() {
    ///         Some(Value::Number(n)) => Ok(Value::Number(n * 2.0)),
    ///         _ => Ok(Value::Null),
    ///     })
    ///     .unwrap();
    /// assert_eq!(runtime.eval("Podvoji(21)").unwrap(), Value::Number(42.0));
    /// ```
    pub fn define_native<F>(&self, name: &str, arity: Option<usize>, f: F) -> Result<(), Error>
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
    {
        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func: Rc::new(move |args, _env, _span| f(args)),
        };
        self.globals
            .declare(name, Value::NativeFunction(Rc::new(native)), true)?;
        Ok(())
    }

    /// Call a global function by name
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, Error> {
        let callee = self.globals.lookup(name)?;
        let mut interpreter = self.interpreter.borrow_mut();
        Ok(interpreter.call_value(&callee, args, &self.globals, Span::dummy())?)
    }
}

impl Default for Slopp {
    fn default() -> Self {
        Self::new()
    }
}
