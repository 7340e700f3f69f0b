//! Expression evaluation

use crate::ast::*;
use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::span::Span;
use crate::value::{FunctionValue, ObjectRef, RuntimeError, Value};
use std::cmp::Ordering;

impl Interpreter {
    pub(super) fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(Literal::Number(n), _) => Ok(Value::Number(*n)),
            Expr::Literal(Literal::String(s), _) => Ok(Value::string(s.as_str())),
            Expr::Identifier(id) => env.lookup(&id.name).map_err(|e| e.at(id.span)),
            Expr::Assign(assign) => self.eval_assign(assign, env),
            Expr::Binary(binary) => {
                let left = self.eval_expr(&binary.left, env)?;
                let right = self.eval_expr(&binary.right, env)?;
                binary_op(binary.op, &left, &right, binary.span)
            }
            Expr::Member(member) => {
                let (object, key) = self.resolve_member(member, env)?;
                // A missing final key reads as null
                Ok(object.get(&key).unwrap_or(Value::Null))
            }
            Expr::Call(call) => self.eval_call(call, env),
            Expr::Object(literal) => self.eval_object(literal, env),
        }
    }

    fn eval_assign(&mut self, assign: &AssignExpr, env: &Env) -> Result<Value, RuntimeError> {
        match assign.target.as_ref() {
            Expr::Identifier(id) => {
                let value = self.eval_expr(&assign.value, env)?;
                env.assign(&id.name, value).map_err(|e| e.at(id.span))
            }
            Expr::Member(member) => {
                let (object, key) = self.resolve_member(member, env)?;
                let value = self.eval_expr(&assign.value, env)?;
                log::trace!(target: "slopp::interpreter", "set property {}", key);
                object.insert(key, value.clone());
                Ok(value)
            }
            other => Err(RuntimeError::InvalidAssignmentTarget { span: other.span() }),
        }
    }

    /// Resolve a member expression to the object that holds the property
    /// and the property key. Shared by reads and writes.
    fn resolve_member(
        &mut self,
        member: &MemberExpr,
        env: &Env,
    ) -> Result<(ObjectRef, String), RuntimeError> {
        let object = self.eval_expr(&member.object, env)?;
        let key = self.member_key(&member.property, env)?;

        match object {
            Value::Object(object) => Ok((object, key)),
            other => Err(RuntimeError::NotAnObject {
                key,
                type_name: other.type_name(),
                span: member.span,
            }),
        }
    }

    fn member_key(&mut self, property: &MemberProperty, env: &Env) -> Result<String, RuntimeError> {
        match property {
            MemberProperty::Named(id) => Ok(id.name.clone()),
            MemberProperty::Computed(expr) => match self.eval_expr(expr, env)? {
                Value::String(s) => Ok(s.to_string()),
                key @ Value::Number(_) => Ok(key.to_string()),
                other => Err(RuntimeError::InvalidKey {
                    type_name: other.type_name(),
                    span: expr.span(),
                }),
            },
        }
    }

    /// Arguments are evaluated left to right before the callee
    fn eval_call(&mut self, call: &CallExpr, env: &Env) -> Result<Value, RuntimeError> {
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, env)?);
        }

        let callee = self.eval_expr(&call.callee, env)?;
        self.call_value(&callee, args, env, call.span)
    }

    /// Invoke a function or native value with already-evaluated arguments
    pub fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        env: &Env,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(func) => self.call_function(func, args, span),
            Value::NativeFunction(native) => {
                if let Some(expected) = native.arity {
                    if expected != args.len() {
                        return Err(RuntimeError::ArityMismatch {
                            name: native.name.clone(),
                            expected,
                            found: args.len(),
                            span,
                        });
                    }
                }
                log::trace!(target: "slopp::interpreter", "call native {}", native.name);
                (native.func)(&args, env, span).map_err(|e| e.at(span))
            }
            other => Err(RuntimeError::NotCallable {
                type_name: other.type_name(),
                span,
            }),
        }
    }

    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Vec<Value>,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        if func.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: func.name.clone(),
                expected: func.params.len(),
                found: args.len(),
                span,
            });
        }

        if self.call_depth >= self.options.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                limit: self.options.max_call_depth,
                span,
            });
        }

        log::trace!(
            target: "slopp::interpreter",
            "call {} (depth {})",
            func.name,
            self.call_depth + 1
        );

        let scope = Environment::child(&func.closure);
        for (param, arg) in func.params.iter().zip(args) {
            scope.declare(param, arg, false).map_err(|e| e.at(span))?;
        }

        self.call_depth += 1;
        let result = self.eval_body(&func.body, &scope);
        self.call_depth -= 1;
        result
    }

    fn eval_object(&mut self, literal: &ObjectLiteral, env: &Env) -> Result<Value, RuntimeError> {
        let object = ObjectRef::new();

        for prop in &literal.properties {
            let value = match &prop.value {
                Some(expr) => self.eval_expr(expr, env)?,
                // Shorthand `{ x }` reads the variable `x`
                None => env
                    .lookup(&prop.key.name)
                    .map_err(|e| e.at(prop.key.span))?,
            };
            object.insert(prop.key.name.clone(), value);
        }

        Ok(Value::Object(object))
    }
}

/// Apply a binary operator to two evaluated operands
pub(crate) fn binary_op(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    span: Span,
) -> Result<Value, RuntimeError> {
    let invalid = || RuntimeError::InvalidOperands {
        op: op.as_str(),
        left: left.type_name(),
        right: right.type_name(),
        span,
    };

    match op {
        BinaryOp::Eq => Ok(Value::Bool(left.loose_eq(right))),
        BinaryOp::Ne => Ok(Value::Bool(!left.loose_eq(right))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                (Value::Null, Value::Null) => Some(Ordering::Equal),
                _ => return Err(invalid()),
            };
            // NaN is unordered: every comparison is false
            let result = ordering.is_some_and(|ord| match op {
                BinaryOp::Lt => ord.is_lt(),
                BinaryOp::Le => ord.is_le(),
                BinaryOp::Gt => ord.is_gt(),
                _ => ord.is_ge(),
            });
            Ok(Value::Bool(result))
        }
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => {
                Ok(Value::string(format!("{}{}", a, b)))
            }
            _ => Err(invalid()),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (Value::Number(a), Value::Number(b)) = (left, right) else {
                return Err(invalid());
            };
            let (a, b) = (*a, *b);
            match op {
                BinaryOp::Sub => Ok(Value::Number(a - b)),
                BinaryOp::Mul => Ok(Value::Number(a * b)),
                BinaryOp::Div if b == 0.0 => Err(RuntimeError::DivisionByZero { span }),
                BinaryOp::Div => Ok(Value::Number(a / b)),
                BinaryOp::Mod if b == 0.0 => Err(RuntimeError::ModuloByZero { span }),
                _ => Ok(Value::Number(a % b)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::binary_op;
    use crate::ast::BinaryOp;
    use crate::environment::{Env, Environment};
    use crate::interpreter::evaluate;
    use crate::parser::parse;
    use crate::span::Span;
    use crate::value::{NativeFunction, RuntimeError, Value};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::rc::Rc;

    fn run_in(source: &str, env: &Env) -> Result<Value, RuntimeError> {
        evaluate(&parse(source).unwrap(), env)
    }

    fn run(source: &str) -> Result<Value, RuntimeError> {
        let env = Environment::global();
        env.declare("true", Value::Bool(true), true).unwrap();
        env.declare("false", Value::Bool(false), true).unwrap();
        env.declare("null", Value::Null, true).unwrap();
        run_in(source, &env)
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[rstest]
    #[case("1 + 2", num(3.0))]
    #[case("10 - 4", num(6.0))]
    #[case("3 * 4", num(12.0))]
    #[case("7 / 2", num(3.5))]
    #[case("7 % 3", num(1.0))]
    #[case("(0 - 7) % 3", num(-1.0))]
    #[case("1 + 2 * 3", num(7.0))]
    #[case("(1 + 2) * 3", num(9.0))]
    #[case("10 - 2 - 3", num(5.0))]
    #[case("1.5 + 1.25", num(2.75))]
    fn test_arithmetic(#[case] source: &str, #[case] expected: Value) {
        assert_eq!(run(source).unwrap(), expected);
    }

    #[rstest]
    #[case("1 < 2", true)]
    #[case("2 < 1", false)]
    #[case("2 > 1", true)]
    #[case("1 <= 1", true)]
    #[case("2 <= 1", false)]
    #[case("1 >= 1", true)]
    #[case("0 >= 1", false)]
    #[case("1 == 1", true)]
    #[case("1 != 1", false)]
    #[case("\"a\" == \"a\"", true)]
    #[case("\"a\" != \"b\"", true)]
    #[case("\"abc\" < \"abd\"", true)]
    #[case("true == true", true)]
    #[case("false < true", true)]
    #[case("true <= false", false)]
    #[case("null == null", true)]
    #[case("null <= null", true)]
    #[case("null < null", false)]
    #[case("1 == \"1\"", false)]
    #[case("1 != true", true)]
    #[case("null == false", false)]
    fn test_comparison(#[case] source: &str, #[case] expected: bool) {
        assert_eq!(run(source).unwrap(), Value::Bool(expected));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            run("\"zdravo \" + \"svet\"").unwrap(),
            Value::string("zdravo svet")
        );
    }

    #[rstest]
    #[case("1 / 0")]
    #[case("0 / 0")]
    fn test_division_by_zero(#[case] source: &str) {
        assert!(matches!(
            run(source),
            Err(RuntimeError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_modulo_by_zero() {
        assert!(matches!(
            run("5 % 0"),
            Err(RuntimeError::ModuloByZero { .. })
        ));
    }

    #[rstest]
    #[case("1 + \"a\"", "+")]
    #[case("\"a\" - \"b\"", "-")]
    #[case("true * 2", "*")]
    #[case("null / 1", "/")]
    #[case("1 < \"a\"", "<")]
    #[case("true >= 1", ">=")]
    fn test_invalid_operands(#[case] source: &str, #[case] op: &str) {
        match run(source) {
            Err(RuntimeError::InvalidOperands { op: found, .. }) => assert_eq!(found, op),
            other => panic!("{source}: expected InvalidOperands, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_op_nan_comparisons_are_false() {
        let nan = Value::Number(f64::NAN);
        for op in [BinaryOp::Lt, BinaryOp::Le, BinaryOp::Gt, BinaryOp::Ge] {
            assert_eq!(
                binary_op(op, &nan, &num(1.0), Span::dummy()).unwrap(),
                Value::Bool(false)
            );
        }
    }

    #[test]
    fn test_identifier_lookup_error_has_span() {
        let err = run("1 + manjka").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "manjka"));
        assert_eq!(err.span().column, 5);
    }

    #[test]
    fn test_assignment_yields_value() {
        assert_eq!(run("rezerviraj x = 1; x = 5").unwrap(), num(5.0));
    }

    #[test]
    fn test_chained_assignment() {
        let env = Environment::global();
        run_in("rezerviraj a = 0; rezerviraj b = 0; a = b = 7;", &env).unwrap();
        assert_eq!(env.lookup("a").unwrap(), num(7.0));
        assert_eq!(env.lookup("b").unwrap(), num(7.0));
    }

    #[rstest]
    #[case("1 = 2")]
    #[case("\"x\" = 2")]
    #[case("f() = 2")]
    #[case("(1 + 1) = 2")]
    fn test_invalid_assignment_target(#[case] source: &str) {
        let env = Environment::global();
        run_in("funkcija f() { 1 }", &env).unwrap();
        assert!(matches!(
            run_in(source, &env),
            Err(RuntimeError::InvalidAssignmentTarget { .. })
        ));
    }

    #[test]
    fn test_assignment_to_undeclared_fails() {
        assert!(matches!(
            run("x = 1"),
            Err(RuntimeError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_member_read_and_write() {
        let value = run("rezerviraj obj = { x: 1 }; obj.x = 9; obj.x").unwrap();
        assert_eq!(value, num(9.0));
    }

    #[test]
    fn test_member_missing_key_is_null() {
        assert_eq!(run("rezerviraj o = {}; o.nic").unwrap(), Value::Null);
    }

    #[test]
    fn test_member_write_creates_key() {
        let value = run("rezerviraj o = {}; o.novo = 3; o").unwrap();
        assert_eq!(value.to_string(), "{ novo: 3 }");
    }

    #[test]
    fn test_deep_member_write() {
        let source = "rezerviraj o = { a: { b: { c: 1 } } }; o.a.b.c = 2; o.a.b.c";
        assert_eq!(run(source).unwrap(), num(2.0));
    }

    #[test]
    fn test_missing_intermediate_key_fails() {
        let err = run("rezerviraj o = {}; o.a.b = 1").unwrap_err();
        match err {
            RuntimeError::NotAnObject { key, type_name, .. } => {
                assert_eq!(key, "b");
                assert_eq!(type_name, "null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_member_on_non_object_fails() {
        assert!(matches!(
            run("rezerviraj n = 5; n.x"),
            Err(RuntimeError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_computed_member_access() {
        let source = r#"
            rezerviraj o = { ime: "Ana" };
            rezerviraj k = "ime";
            o[k]
        "#;
        assert_eq!(run(source).unwrap(), Value::string("Ana"));
    }

    #[test]
    fn test_computed_member_with_number_key() {
        let source = "rezerviraj o = {}; o[1] = \"ena\"; o[0 + 1]";
        assert_eq!(run(source).unwrap(), Value::string("ena"));
    }

    #[test]
    fn test_computed_member_invalid_key() {
        assert!(matches!(
            run("rezerviraj o = {}; o[o]"),
            Err(RuntimeError::InvalidKey {
                type_name: "object",
                ..
            })
        ));
    }

    #[test]
    fn test_constant_object_properties_are_mutable() {
        let value = run("konstanta o = { x: 1 }; o.x = 2; o.x").unwrap();
        assert_eq!(value, num(2.0));
        assert!(matches!(
            run("konstanta o = { x: 1 }; o = {}"),
            Err(RuntimeError::ConstantAssignment { .. })
        ));
    }

    #[test]
    fn test_objects_alias() {
        let source = "rezerviraj a = { v: 1 }; rezerviraj b = a; b.v = 42; a.v";
        assert_eq!(run(source).unwrap(), num(42.0));
    }

    #[test]
    fn test_object_identity_equality() {
        assert_eq!(
            run("rezerviraj a = {}; rezerviraj b = a; a == b").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run("rezerviraj a = {}; rezerviraj b = {}; a == b").unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_object_shorthand() {
        let value = run("rezerviraj x = 3; { x }").unwrap();
        let obj = value.as_object().expect("object");
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("x"), Some(num(3.0)));
    }

    #[test]
    fn test_object_shorthand_undefined() {
        assert!(matches!(
            run("{ nikjer }"),
            Err(RuntimeError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            run("funkcija dodaj(a, b) { a + b } dodaj(2, 3)").unwrap(),
            num(5.0)
        );
    }

    #[test]
    fn test_empty_function_returns_null() {
        assert_eq!(run("funkcija nic() {} nic()").unwrap(), Value::Null);
    }

    #[rstest]
    #[case("funkcija f(a, b) { a } f(1)", 2, 1)]
    #[case("funkcija f(a) { a } f(1, 2)", 1, 2)]
    #[case("funkcija f() { 1 } f(1)", 0, 1)]
    fn test_arity_mismatch(#[case] source: &str, #[case] expected: usize, #[case] found: usize) {
        match run(source) {
            Err(RuntimeError::ArityMismatch {
                expected: e,
                found: f,
                ..
            }) => assert_eq!((e, f), (expected, found)),
            other => panic!("expected arity mismatch, got {other:?}"),
        }
    }

    #[rstest]
    #[case("5()", "number")]
    #[case("\"f\"()", "string")]
    #[case("rezerviraj o = {}; o()", "object")]
    #[case("null()", "null")]
    fn test_not_callable(#[case] source: &str, #[case] type_name: &str) {
        match run(source) {
            Err(RuntimeError::NotCallable { type_name: t, .. }) => assert_eq!(t, type_name),
            other => panic!("expected not callable, got {other:?}"),
        }
    }

    #[test]
    fn test_function_locals_are_isolated() {
        let env = Environment::global();
        run_in("funkcija f() { rezerviraj notri = 1; notri } f()", &env).unwrap();
        assert!(!env.binds_locally("notri"));
    }

    #[test]
    fn test_closure_uses_declaration_scope() {
        let source = r#"
            rezerviraj x = 1;
            funkcija beri() { x }
            funkcija klici() { rezerviraj x = 99; beri() }
            klici()
        "#;
        assert_eq!(run(source).unwrap(), num(1.0));
    }

    #[test]
    fn test_returned_closure_keeps_scope_alive() {
        let source = r#"
            funkcija stevec() {
                rezerviraj n = 0;
                funkcija naslednji() { n = n + 1 }
                naslednji
            }
            rezerviraj s = stevec();
            s();
            s();
            s()
        "#;
        assert_eq!(run(source).unwrap(), num(3.0));
    }

    #[test]
    fn test_nested_closure_through_intermediate_scope() {
        let source = r#"
            funkcija zunanji(a) {
                funkcija srednji(b) {
                    funkcija notranji(c) { a + b + c }
                    notranji
                }
                srednji
            }
            zunanji(1)(2)(3)
        "#;
        assert_eq!(run(source).unwrap(), num(6.0));
    }

    #[test]
    fn test_recursion() {
        let source = r#"
            funkcija fib(n) {
                ce (n < 2) { n } sicer { fib(n - 1) + fib(n - 2) }
            }
            fib(15)
        "#;
        assert_eq!(run(source).unwrap(), num(610.0));
    }

    #[test]
    fn test_arguments_evaluated_before_callee() {
        let env = Environment::global();
        let source = r#"
            rezerviraj log = { zap: "" };
            funkcija zapisi(t) { log.zap = log.zap + t }
            funkcija izberi() { zapisi("c"); funkcija g(a, b) { 0 } g }
            izberi()(zapisi("a"), zapisi("b"));
            log.zap
        "#;
        assert_eq!(run_in(source, &env).unwrap(), Value::string("abc"));
    }

    #[test]
    fn test_native_function_call() {
        let env = Environment::global();
        let native = NativeFunction::new("dvojno", 1, |args, _env, _span| {
            Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
        });
        env.declare("dvojno", Value::NativeFunction(Rc::new(native)), true)
            .unwrap();
        assert_eq!(run_in("dvojno(21)", &env).unwrap(), num(42.0));
        assert!(matches!(
            run_in("dvojno()", &env),
            Err(RuntimeError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_native_receives_calling_env() {
        let env = Environment::global();
        let native = NativeFunction::variadic("poglej", |_args, env, _span| env.lookup("skrito"));
        env.declare("poglej", Value::NativeFunction(Rc::new(native)), true)
            .unwrap();
        let source = "funkcija f() { rezerviraj skrito = 7; poglej() } f()";
        assert_eq!(run_in(source, &env).unwrap(), num(7.0));
    }
}
