//! AST dump command - output AST as JSON

use super::{read_source, report};
use anyhow::Result;
use slopp_runtime::ast::VersionedProgram;
use slopp_runtime::{Diagnostic, Error};

/// Parse the file and print its versioned AST as JSON to stdout
pub fn run(file_path: &str) -> Result<()> {
    let source = read_source(file_path, true)?;

    let program = match slopp_runtime::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            let diag = Diagnostic::from_error(&Error::from(e), &source).with_file(file_path);
            report(&diag, true);
            return Err(anyhow::anyhow!("Parse errors"));
        }
    };

    let json = VersionedProgram::new(&program).to_json()?;
    println!("{}", json);

    Ok(())
}
