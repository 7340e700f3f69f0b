//! Shared test utilities
//!
//! Every helper runs its source in a fresh runtime whose `izpisi` output is
//! captured, so tests never write to stdout.

#![allow(dead_code)]

use slopp_runtime::{Error, Output, Slopp, Value};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Fresh runtime with captured output
pub fn runtime() -> (Slopp, Output) {
    let output = Output::capture();
    (Slopp::new().with_output(output.clone()), output)
}

/// Evaluate `source`, panicking with the error on failure
pub fn eval(source: &str) -> Value {
    let (runtime, _) = runtime();
    match runtime.eval(source) {
        Ok(value) => value,
        Err(e) => panic!("Expected success for {:?}, got error: {}", source, e),
    }
}

/// Evaluate `source` and return what it printed
pub fn eval_output(source: &str) -> String {
    let (runtime, output) = runtime();
    if let Err(e) = runtime.eval(source) {
        panic!("Expected success for {:?}, got error: {}", source, e);
    }
    output.take()
}

/// Evaluate `source`, expecting an error
pub fn eval_err(source: &str) -> Error {
    let (runtime, _) = runtime();
    match runtime.eval(source) {
        Err(e) => e,
        Ok(value) => panic!("Expected error for {:?}, got {:?}", source, value),
    }
}

pub fn assert_eval_number(source: &str, expected: f64) {
    match eval(source) {
        Value::Number(n) => assert_eq!(n, expected, "source: {}", source),
        other => panic!("Expected Number({}), got {:?}", expected, other),
    }
}

pub fn assert_eval_string(source: &str, expected: &str) {
    match eval(source) {
        Value::String(s) => assert_eq!(s.as_ref(), expected, "source: {}", source),
        other => panic!("Expected String({:?}), got {:?}", expected, other),
    }
}

pub fn assert_eval_bool(source: &str, expected: bool) {
    match eval(source) {
        Value::Bool(b) => assert_eq!(b, expected, "source: {}", source),
        other => panic!("Expected Bool({}), got {:?}", expected, other),
    }
}

pub fn assert_eval_null(source: &str) {
    match eval(source) {
        Value::Null => {}
        other => panic!("Expected Null, got {:?}", other),
    }
}

/// Assert that `source` fails with the diagnostic `expected_code`
pub fn assert_error_code(source: &str, expected_code: &str) {
    let err = eval_err(source);
    let diag = slopp_runtime::Diagnostic::from_error(&err, source);
    assert_eq!(
        diag.code, expected_code,
        "Expected error code {} for {:?}, got {} ({})",
        expected_code, source, diag.code, diag.message
    );
}
