//! Diagnostics for reporting errors to users
//!
//! Every [`Error`] maps to a [`Diagnostic`] with a stable code, the offending
//! source line, and an optional hint. Diagnostics render either as
//! rustc-style text or as JSON for tooling.

use crate::error::Error;
use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::value::RuntimeError;
use serde::Serialize;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// A single reportable error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub diag_version: u32,
    /// Stable code, e.g. `SL0001`
    pub code: String,
    pub message: String,
    /// Source name shown in the location line
    pub file: String,
    /// Line number (1-based, 0 when unknown)
    pub line: u32,
    /// Column number (1-based, 0 when unknown)
    pub column: u32,
    /// Characters underlined in the snippet
    pub length: usize,
    /// Source line containing the error
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            code: code.into(),
            message: message.into(),
            file: "<input>".to_string(),
            line: 0,
            column: 0,
            length: 0,
            snippet: String::new(),
            help: None,
        }
    }

    /// Build a diagnostic for `error`, pulling the snippet out of `source`
    pub fn from_error(error: &Error, source: &str) -> Self {
        let span = error.span();
        let mut diag = Self::new(code_for(error), error.to_string());
        if let Some(help) = help_for(error) {
            diag = diag.with_help(help);
        }

        if span.is_dummy() {
            return diag;
        }

        diag.line = span.line;
        diag.column = span.column;
        if let Some(line) = source.lines().nth(span.line as usize - 1) {
            let remaining = line
                .chars()
                .count()
                .saturating_sub(span.column as usize - 1);
            diag.snippet = line.to_string();
            diag.length = span.len().clamp(1, remaining.max(1));
        }
        diag
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = format!("error[{}]: {}\n", self.code, self.message);

        if self.line == 0 {
            output.push_str(&format!("  --> {}\n", self.file));
        } else {
            output.push_str(&format!(
                "  --> {}:{}:{}\n",
                self.file, self.line, self.column
            ));
        }

        if !self.snippet.is_empty() {
            let gutter = " ".repeat(self.line.to_string().len());
            output.push_str(&format!("{} |\n", gutter));
            output.push_str(&format!("{} | {}\n", self.line, self.snippet));
            if self.length > 0 {
                let padding = " ".repeat(self.column.saturating_sub(1) as usize);
                output.push_str(&format!(
                    "{} | {}{}\n",
                    gutter,
                    padding,
                    "^".repeat(self.length)
                ));
            }
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("  = help: {}\n", help));
        }

        output
    }

    /// Format as pretty JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

}

fn code_for(error: &Error) -> &'static str {
    use error_codes::*;

    match error {
        Error::Lex(e) | Error::Parse(ParseError::Lex(e)) => match e {
            LexError::UnexpectedCharacter { .. } => UNEXPECTED_CHARACTER,
            LexError::UnterminatedString { .. } => UNTERMINATED_STRING,
        },
        Error::Parse(e) => match e {
            ParseError::Lex(_) => UNEXPECTED_CHARACTER,
            ParseError::UnexpectedToken { .. } => UNEXPECTED_TOKEN,
            ParseError::ExpectedExpression { .. } => EXPECTED_EXPRESSION,
            ParseError::InvalidParameter { .. } => INVALID_PARAMETER,
            ParseError::DuplicateParameter { .. } => DUPLICATE_PARAMETER,
            ParseError::InvalidMemberAccess { .. } => INVALID_MEMBER_ACCESS,
            ParseError::ConstWithoutInitializer { .. } => CONST_WITHOUT_INITIALIZER,
            ParseError::InvalidNumber { .. } => INVALID_NUMBER,
        },
        Error::Runtime(e) => match e {
            RuntimeError::UndefinedVariable { .. } => UNDEFINED_VARIABLE,
            RuntimeError::AlreadyDeclared { .. } => ALREADY_DECLARED,
            RuntimeError::ConstantAssignment { .. } => CONSTANT_ASSIGNMENT,
            RuntimeError::InvalidAssignmentTarget { .. } => INVALID_ASSIGNMENT_TARGET,
            RuntimeError::DivisionByZero { .. } => DIVISION_BY_ZERO,
            RuntimeError::ModuloByZero { .. } => MODULO_BY_ZERO,
            RuntimeError::InvalidOperands { .. } => INVALID_OPERANDS,
            RuntimeError::NotCallable { .. } => NOT_CALLABLE,
            RuntimeError::ArityMismatch { .. } => ARITY_MISMATCH,
            RuntimeError::NotAnObject { .. } => NOT_AN_OBJECT,
            RuntimeError::InvalidKey { .. } => INVALID_KEY,
            RuntimeError::StackOverflow { .. } => STACK_OVERFLOW,
            RuntimeError::NativeArgument { .. } => NATIVE_ARGUMENT,
            RuntimeError::Output { .. } => OUTPUT_FAILED,
        },
        Error::Io { .. } => IO_ERROR,
    }
}

fn help_for(error: &Error) -> Option<&'static str> {
    match error {
        Error::Lex(LexError::UnterminatedString { .. })
        | Error::Parse(ParseError::Lex(LexError::UnterminatedString { .. })) => {
            Some("close the string with a matching '\"'")
        }
        Error::Parse(ParseError::ConstWithoutInitializer { .. }) => {
            Some("give the constant a value: konstanta ime = vrednost;")
        }
        Error::Parse(ParseError::InvalidParameter { .. }) => {
            Some("parameters are names only, e.g. funkcija f(a, b) { ... }")
        }
        Error::Runtime(RuntimeError::UndefinedVariable { .. }) => {
            Some("declare it first with 'rezerviraj'")
        }
        Error::Runtime(RuntimeError::AlreadyDeclared { .. }) => {
            Some("assign without 'rezerviraj' to change an existing variable")
        }
        Error::Runtime(RuntimeError::ConstantAssignment { .. }) => {
            Some("declare it with 'rezerviraj' instead of 'konstanta' to allow reassignment")
        }
        Error::Runtime(RuntimeError::StackOverflow { .. }) => {
            Some("check that recursive functions have a reachable base case")
        }
        _ => None,
    }
}

/// Error code registry
pub mod error_codes {
    // SL0xxx - Runtime errors
    pub const UNDEFINED_VARIABLE: &str = "SL0001";
    pub const ALREADY_DECLARED: &str = "SL0002";
    pub const CONSTANT_ASSIGNMENT: &str = "SL0003";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "SL0004";
    pub const DIVISION_BY_ZERO: &str = "SL0005";
    pub const MODULO_BY_ZERO: &str = "SL0006";
    pub const INVALID_OPERANDS: &str = "SL0007";
    pub const NOT_CALLABLE: &str = "SL0008";
    pub const ARITY_MISMATCH: &str = "SL0009";
    pub const NOT_AN_OBJECT: &str = "SL0010";
    pub const INVALID_KEY: &str = "SL0011";
    pub const STACK_OVERFLOW: &str = "SL0012";
    pub const NATIVE_ARGUMENT: &str = "SL0013";
    pub const OUTPUT_FAILED: &str = "SL0014";

    // SL1xxx - Lexical errors
    pub const UNEXPECTED_CHARACTER: &str = "SL1001";
    pub const UNTERMINATED_STRING: &str = "SL1002";

    // SL2xxx - Syntax errors
    pub const UNEXPECTED_TOKEN: &str = "SL2001";
    pub const EXPECTED_EXPRESSION: &str = "SL2002";
    pub const INVALID_PARAMETER: &str = "SL2003";
    pub const INVALID_MEMBER_ACCESS: &str = "SL2004";
    pub const CONST_WITHOUT_INITIALIZER: &str = "SL2005";
    pub const INVALID_NUMBER: &str = "SL2006";
    pub const DUPLICATE_PARAMETER: &str = "SL2007";

    // SL9xxx - Host errors
    pub const IO_ERROR: &str = "SL9001";
}
