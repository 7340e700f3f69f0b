//! REPL core logic (UI-agnostic)

use crate::diagnostic::Diagnostic;
use crate::interpreter::RuntimeOptions;
use crate::runtime::Slopp;
use crate::stdlib::Output;
use crate::value::Value;
use std::collections::HashSet;

/// Prompt printed before each line
pub const PROMPT: &str = ">>> ";

/// Line that ends an interactive session
pub const EXIT_COMMAND: &str = "koncaj";

/// Greeting printed when a session starts
pub fn banner() -> String {
    format!("SLO++ v{}", crate::VERSION)
}

/// An empty line or `koncaj` ends the session
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line == EXIT_COMMAND
}

/// Outcome of one line
#[derive(Debug)]
pub struct ReplResult {
    /// Value of the last statement (None on error)
    pub value: Option<Value>,
    /// At most one diagnostic; evaluation stops at the first error
    pub diagnostics: Vec<Diagnostic>,
}

impl ReplResult {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A user binding in the session's global scope
#[derive(Debug, Clone, PartialEq)]
pub struct ReplBinding {
    pub name: String,
    pub constant: bool,
    /// Display form of the current value
    pub value: String,
}

/// REPL core state
///
/// One global scope lives across lines, so declarations persist and an
/// error only discards the rest of the failing line.
pub struct ReplCore {
    runtime: Slopp,
    output: Output,
    options: RuntimeOptions,
    prelude: HashSet<String>,
}

impl ReplCore {
    pub fn new() -> Self {
        Self::with_config(Output::Stdout, RuntimeOptions::default())
    }

    pub fn with_config(output: Output, options: RuntimeOptions) -> Self {
        let runtime = Slopp::new()
            .with_output(output.clone())
            .with_options(options);
        let prelude = runtime.globals().names().into_iter().collect();
        Self {
            runtime,
            output,
            options,
            prelude,
        }
    }

    /// Evaluate one line of input against the session scope
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        match self.runtime.eval(input) {
            Ok(value) => ReplResult {
                value: Some(value),
                diagnostics: Vec::new(),
            },
            Err(e) => {
                log::debug!(target: "slopp::repl", "line failed: {}", e);
                ReplResult {
                    value: None,
                    diagnostics: vec![Diagnostic::from_error(&e, input).with_file("<repl>")],
                }
            }
        }
    }

    /// Drop every user binding and start over with a fresh prelude
    pub fn reset(&mut self) {
        *self = Self::with_config(self.output.clone(), self.options);
    }

    /// User bindings, sorted by name
    pub fn variables(&self) -> Vec<ReplBinding> {
        let globals = self.runtime.globals();
        globals
            .names()
            .into_iter()
            .filter(|name| !self.prelude.contains(name))
            .filter_map(|name| {
                let value = globals.lookup(&name).ok()?;
                Some(ReplBinding {
                    constant: globals.is_constant(&name),
                    value: value.to_string(),
                    name,
                })
            })
            .collect()
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        Self::new()
    }
}
