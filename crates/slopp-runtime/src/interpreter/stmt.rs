//! Statement evaluation

use crate::ast::{FunctionDecl, IfStmt, Stmt, VarDecl};
use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::value::{FunctionValue, RuntimeError, Value};
use std::rc::Rc;

impl Interpreter {
    pub(super) fn eval_statement(&mut self, stmt: &Stmt, env: &Env) -> Result<Value, RuntimeError> {
        match stmt {
            Stmt::VarDecl(decl) => self.eval_var_decl(decl, env),
            Stmt::FunctionDecl(func) => self.eval_function_decl(func, env),
            Stmt::If(if_stmt) => self.eval_if(if_stmt, env),
            Stmt::Expr(expr) => self.eval_expr(expr, env),
        }
    }

    fn eval_var_decl(&mut self, decl: &VarDecl, env: &Env) -> Result<Value, RuntimeError> {
        let value = match &decl.init {
            Some(init) => self.eval_expr(init, env)?,
            None => Value::Null,
        };

        env.declare(&decl.name.name, value, decl.constant)
            .map_err(|e| e.at(decl.name.span))
    }

    /// Functions are constant bindings that close over the current scope
    fn eval_function_decl(&mut self, func: &FunctionDecl, env: &Env) -> Result<Value, RuntimeError> {
        let value = Value::Function(Rc::new(FunctionValue {
            name: func.name.name.clone(),
            params: func.params.iter().map(|p| p.name.clone()).collect(),
            body: Rc::clone(&func.body),
            closure: Rc::clone(env),
        }));

        env.declare(&func.name.name, value, true)
            .map_err(|e| e.at(func.name.span))
    }

    /// A non-boolean test is not coerced; the statement yields null
    fn eval_if(&mut self, stmt: &IfStmt, env: &Env) -> Result<Value, RuntimeError> {
        let branch = match self.eval_expr(&stmt.test, env)? {
            Value::Bool(true) => &stmt.consequent,
            Value::Bool(false) => &stmt.alternate,
            _ => return Ok(Value::Null),
        };

        let scope = Environment::child(env);
        self.eval_body(branch, &scope)
    }
}
