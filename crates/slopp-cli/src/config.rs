//! CLI configuration via environment variables
//!
//! SLO++ uses environment variables for optional configuration.
//! This keeps the CLI simple while allowing customization.

use slopp_runtime::{RuntimeOptions, DEFAULT_MAX_CALL_DEPTH};
use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default to JSON diagnostic output (SLOPP_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (SLOPP_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (SLOPP_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (SLOPP_NO_HISTORY=1)
    pub no_history: bool,
    /// Log level name (SLOPP_LOG=debug)
    pub log_level: Option<String>,
    /// Function call nesting limit (SLOPP_MAX_CALL_DEPTH=500)
    pub max_call_depth: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_call_depth = match lookup("SLOPP_MAX_CALL_DEPTH") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    log::warn!(
                        target: "slopp::config",
                        "ignoring invalid SLOPP_MAX_CALL_DEPTH '{}'",
                        raw
                    );
                    DEFAULT_MAX_CALL_DEPTH
                }
            },
            None => DEFAULT_MAX_CALL_DEPTH,
        };

        Self {
            default_json: lookup("SLOPP_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: lookup("SLOPP_NO_COLOR").is_some() || lookup("NO_COLOR").is_some(),
            history_file: lookup("SLOPP_HISTORY_FILE").map(PathBuf::from),
            no_history: lookup("SLOPP_NO_HISTORY").is_some(),
            log_level: lookup("SLOPP_LOG"),
            max_call_depth,
        }
    }

    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            max_call_depth: self.max_call_depth,
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. SLOPP_HISTORY_FILE if set
    /// 2. ~/.slopp/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".slopp").join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
