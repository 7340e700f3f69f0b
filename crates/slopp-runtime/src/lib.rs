//! SLO++ Runtime - Core language implementation
//!
//! SLO++ is a small dynamically typed scripting language with Slovenian
//! keywords. This library provides:
//! - Lexical analysis and parsing into an AST
//! - Lexically scoped environments with constants and closures
//! - Tree-walking evaluation
//! - The prelude of host functions (`izpisi`, `cas`, math)
//! - Diagnostics, an embedding API and a UI-agnostic REPL core

/// SLO++ runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod token;
pub mod value;

/// Host-provided bindings every global scope starts with
pub use self::stdlib as prelude;

pub use ast::Program;
pub use diagnostic::{error_codes, Diagnostic, DIAG_VERSION};
pub use environment::{Env, Environment};
pub use error::Error;
pub use interpreter::{evaluate, Interpreter, RuntimeOptions, DEFAULT_MAX_CALL_DEPTH};
pub use lexer::{tokenize, LexError, Lexer};
pub use parser::{parse, ParseError, Parser};
pub use repl::{ReplBinding, ReplCore, ReplResult};
pub use runtime::Slopp;
pub use span::Span;
pub use stdlib::Output;
pub use token::{Token, TokenKind};
pub use value::{FunctionValue, NativeFunction, ObjectRef, RuntimeError, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_pipeline_stages() {
        let tokens = tokenize("1 + 2").unwrap();
        assert_eq!(tokens.len(), 4);

        let program = parse("1 + 2").unwrap();
        let env = Environment::global();
        assert_eq!(evaluate(&program, &env).unwrap(), Value::Number(3.0));
    }
}
