//! Run command - execute SLO++ source files

use super::{read_source, report};
use crate::config::Config;
use anyhow::Result;
use slopp_runtime::{Diagnostic, Slopp};

/// Run a SLO++ source file
///
/// Program output comes from `izpisi`; the final value is not printed.
pub fn run(file_path: &str, json: bool, config: &Config) -> Result<()> {
    let source = read_source(file_path, json)?;

    log::info!(target: "slopp::cli", "running {}", file_path);
    let runtime = Slopp::new().with_options(config.runtime_options());
    match runtime.eval(&source) {
        Ok(value) => {
            log::debug!(target: "slopp::cli", "program finished with {}", value);
            Ok(())
        }
        Err(e) => {
            let diag = Diagnostic::from_error(&e, &source).with_file(file_path);
            report(&diag, json);
            Err(anyhow::anyhow!("Failed to execute program"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[test]
    fn test_run_simple_program() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "rezerviraj x = 1 + 2;").unwrap();

        let result = run(temp_file.path().to_str().unwrap(), false, &config());
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_runtime_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "1 / 0").unwrap();

        let result = run(temp_file.path().to_str().unwrap(), true, &config());
        assert!(result.is_err());
    }

    #[test]
    fn test_run_missing_file() {
        let result = run("nonexistent.slo", false, &config());
        assert!(result.is_err());
    }
}
