pub mod ast;
pub mod repl;
pub mod run;
pub mod tokens;

use colored::Colorize;
use slopp_runtime::Diagnostic;

/// Render a diagnostic for the terminal, coloring the header line
pub fn format_diagnostic(diag: &Diagnostic) -> String {
    let human = diag.to_human_string();
    let (header, rest) = human.split_once('\n').unwrap_or((human.as_str(), ""));
    let header = match header.split_once(": ") {
        Some((code, message)) => format!("{}: {}", code.red().bold(), message.bold()),
        None => header.red().bold().to_string(),
    };
    format!("{}\n{}", header, rest)
}

/// Print a diagnostic to stderr as text or JSON
pub fn report(diag: &Diagnostic, json: bool) {
    if json {
        match diag.to_json_string() {
            Ok(text) => eprintln!("{}", text),
            Err(_) => eprint!("{}", format_diagnostic(diag)),
        }
    } else {
        eprint!("{}", format_diagnostic(diag));
    }
}

/// Read a source file, reporting failures as diagnostics
pub fn read_source(file_path: &str, json: bool) -> anyhow::Result<String> {
    match std::fs::read_to_string(file_path) {
        Ok(source) => Ok(source),
        Err(source) => {
            let err = slopp_runtime::Error::Io {
                path: file_path.into(),
                source,
            };
            report(&Diagnostic::from_error(&err, "").with_file(file_path), json);
            Err(anyhow::anyhow!("Failed to read source file: {}", file_path))
        }
    }
}
