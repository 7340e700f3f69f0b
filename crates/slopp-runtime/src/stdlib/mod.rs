//! Prelude: bindings every global scope starts with
//!
//! `true`, `false` and `null` are ordinary constants here; the language has
//! no literal syntax for them. Everything else is a native function or a
//! numeric constant, all declared as constants.

pub mod io;
pub mod math;

use crate::environment::{Env, Environment};
use crate::span::Span;
use crate::value::{NativeFunction, RuntimeError, Value};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Destination for `izpisi`
#[derive(Clone, Default)]
pub enum Output {
    /// Process stdout
    #[default]
    Stdout,
    /// In-memory capture, shared with whoever created it
    Buffer(Rc<RefCell<String>>),
}

impl Output {
    /// New in-memory capture
    pub fn capture() -> Self {
        Output::Buffer(Rc::new(RefCell::new(String::new())))
    }

    /// Drain captured text. Always empty for stdout.
    pub fn take(&self) -> String {
        match self {
            Output::Stdout => String::new(),
            Output::Buffer(buf) => std::mem::take(&mut *buf.borrow_mut()),
        }
    }

    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", line)?;
                out.flush()
            }
            Output::Buffer(buf) => {
                let mut buf = buf.borrow_mut();
                buf.push_str(line);
                buf.push('\n');
                Ok(())
            }
        }
    }
}

/// Declare the full prelude in `env`.
///
/// Fails without declaring anything if `env` already binds a prelude name.
pub fn install(env: &Env, output: Output) -> Result<(), RuntimeError> {
    let bindings = bindings(output);
    if let Some((name, _)) = bindings.iter().find(|(name, _)| env.binds_locally(name)) {
        return Err(RuntimeError::AlreadyDeclared {
            name: name.clone(),
            span: Span::dummy(),
        });
    }
    for (name, value) in bindings {
        env.declare(&name, value, true)?;
    }

    log::debug!(target: "slopp::stdlib", "prelude installed");
    Ok(())
}

/// Fresh global scope holding only the prelude
pub fn global_scope(output: Output) -> Env {
    let env = Environment::global_with_constants(bindings(output));
    log::debug!(target: "slopp::stdlib", "prelude scope created");
    env
}

/// Every prelude name with its value, in declaration order
fn bindings(output: Output) -> Vec<(String, Value)> {
    let mut bindings = vec![
        ("true".to_string(), Value::Bool(true)),
        ("false".to_string(), Value::Bool(false)),
        ("null".to_string(), Value::Null),
        native(NativeFunction::variadic("izpisi", move |args, _env, span| {
            io::izpisi(&output, args, span)
        })),
        native(NativeFunction::new("cas", 0, |_args, _env, _span| Ok(io::cas()))),
        ("Pi".to_string(), Value::Number(math::PI)),
    ];

    let unary: [(&str, fn(&[Value], Span) -> Result<Value, RuntimeError>); 8] = [
        ("Kvadrat", math::kvadrat),
        ("Kub", math::kub),
        ("Faktorial", math::faktorial),
        ("Koren", math::koren),
        ("Zaokrozi", math::zaokrozi),
        ("Sin", math::sin),
        ("Cos", math::cos),
        ("Tan", math::tan),
    ];
    for (name, func) in unary {
        bindings.push(native(NativeFunction::new(name, 1, move |args, _env, span| {
            func(args, span)
        })));
    }

    bindings.push(native(NativeFunction::new(
        "NakljucnoStevilo",
        2,
        |args, _env, span| math::nakljucno_stevilo(args, span),
    )));
    bindings
}

fn native(native: NativeFunction) -> (String, Value) {
    (native.name.clone(), Value::NativeFunction(Rc::new(native)))
}

/// Read argument `index` as a number, naming the native in the error
pub(crate) fn number_arg(
    name: &str,
    args: &[Value],
    index: usize,
    span: Span,
) -> Result<f64, RuntimeError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(RuntimeError::NativeArgument {
            name: name.to_string(),
            msg: format!("argument {} must be a number, got {}", index + 1, other.type_name()),
            span,
        }),
        None => Err(RuntimeError::NativeArgument {
            name: name.to_string(),
            msg: format!("missing argument {}", index + 1),
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;

    #[test]
    fn test_install_declares_constants() {
        let env = Environment::global();
        install(&env, Output::capture()).unwrap();

        for name in [
            "true",
            "false",
            "null",
            "izpisi",
            "cas",
            "Pi",
            "Kvadrat",
            "Kub",
            "Faktorial",
            "Koren",
            "NakljucnoStevilo",
            "Zaokrozi",
            "Sin",
            "Cos",
            "Tan",
        ] {
            assert!(env.is_constant(name), "{name} should be a constant");
        }
        assert_eq!(env.lookup("true").unwrap(), Value::Bool(true));
        assert_eq!(env.lookup("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_install_twice_fails() {
        let env = Environment::global();
        install(&env, Output::capture()).unwrap();
        assert!(matches!(
            install(&env, Output::capture()),
            Err(RuntimeError::AlreadyDeclared { .. })
        ));
    }

    #[test]
    fn test_install_conflict_declares_nothing() {
        let env = Environment::global();
        env.declare("Pi", Value::Number(3.0), false).unwrap();

        let err = install(&env, Output::capture()).unwrap_err();
        assert!(matches!(err, RuntimeError::AlreadyDeclared { ref name, .. } if name == "Pi"));
        assert_eq!(env.names(), vec!["Pi"]);
    }

    #[test]
    fn test_global_scope_matches_install() {
        let installed = Environment::global();
        install(&installed, Output::capture()).unwrap();
        let seeded = global_scope(Output::capture());

        assert_eq!(seeded.names(), installed.names());
        for name in seeded.names() {
            assert!(seeded.is_constant(&name), "{name} should be a constant");
        }
    }

    #[test]
    fn test_capture_take_drains() {
        let out = Output::capture();
        out.write_line("ena").unwrap();
        out.write_line("dva").unwrap();
        assert_eq!(out.take(), "ena\ndva\n");
        assert_eq!(out.take(), "");
    }

    #[test]
    fn test_number_arg_errors() {
        let args = [Value::string("x")];
        let err = number_arg("Kub", &args, 0, Span::dummy()).unwrap_err();
        assert_eq!(err.to_string(), "Kub: argument 1 must be a number, got string");
        let err = number_arg("Kub", &args, 1, Span::dummy()).unwrap_err();
        assert_eq!(err.to_string(), "Kub: missing argument 2");
    }
}
