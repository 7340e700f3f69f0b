//! AST interpreter (tree-walking)
//!
//! Evaluates a [`Program`] against a scope chain. Every statement and
//! expression produces a value; a body evaluates to the value of its last
//! statement, or null when empty.
//!
//! - Statements live in `stmt.rs` (declarations, functions, branches)
//! - Expressions live in `expr.rs` (operators, members, calls, objects)

mod expr;
mod stmt;

use crate::ast::{Program, Stmt};
use crate::environment::Env;
use crate::value::{RuntimeError, Value};

/// Default limit on nested user function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Tunable evaluation limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Nested function calls allowed before `StackOverflow` is raised
    pub max_call_depth: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Interpreter state
pub struct Interpreter {
    pub(super) options: RuntimeOptions,
    /// Current depth of user function calls
    pub(super) call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(RuntimeOptions::default())
    }

    pub fn with_options(options: RuntimeOptions) -> Self {
        Self {
            options,
            call_depth: 0,
        }
    }

    /// Evaluate a program directly in `env` (no new scope is created)
    pub fn eval(&mut self, program: &Program, env: &Env) -> Result<Value, RuntimeError> {
        log::debug!(
            target: "slopp::interpreter",
            "evaluating {} statements",
            program.body.len()
        );
        self.call_depth = 0;
        self.eval_body(&program.body, env)
    }

    /// Run statements in order and yield the last value
    pub(super) fn eval_body(&mut self, body: &[Stmt], env: &Env) -> Result<Value, RuntimeError> {
        let mut last = Value::Null;
        for stmt in body {
            last = self.eval_statement(stmt, env)?;
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `program` in `env` with default options
pub fn evaluate(program: &Program, env: &Env) -> Result<Value, RuntimeError> {
    Interpreter::new().eval(program, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Result<Value, RuntimeError> {
        let env = Environment::global();
        env.declare("true", Value::Bool(true), true).unwrap();
        env.declare("false", Value::Bool(false), true).unwrap();
        env.declare("null", Value::Null, true).unwrap();
        evaluate(&parse(source).unwrap(), &env)
    }

    #[test]
    fn test_empty_program_is_null() {
        assert_eq!(run("").unwrap(), Value::Null);
    }

    #[test]
    fn test_program_yields_last_statement() {
        assert_eq!(run("1; 2; 3").unwrap(), Value::Number(3.0));
    }

    #[test]
    fn test_error_stops_evaluation() {
        let env = Environment::global();
        let program = parse("rezerviraj a = 1; nedefinirano; rezerviraj b = 2;").unwrap();
        assert!(evaluate(&program, &env).is_err());
        assert!(env.binds_locally("a"));
        assert!(!env.binds_locally("b"));
    }

    #[test]
    fn test_call_depth_limit() {
        let env = Environment::global();
        let program = parse("funkcija f() { f() } f()").unwrap();
        let mut interpreter = Interpreter::with_options(RuntimeOptions { max_call_depth: 16 });
        let err = interpreter.eval(&program, &env).unwrap_err();
        assert!(matches!(err, RuntimeError::StackOverflow { limit: 16, .. }));
    }

    #[test]
    fn test_call_depth_resets_between_units() {
        let env = Environment::global();
        let mut interpreter = Interpreter::with_options(RuntimeOptions { max_call_depth: 8 });
        let recurse = parse("funkcija f() { f() } f()").unwrap();
        assert!(interpreter.eval(&recurse, &env).is_err());

        let ok = parse("funkcija g(n) { n } g(1)").unwrap();
        assert_eq!(interpreter.eval(&ok, &env).unwrap(), Value::Number(1.0));
    }
}
