use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

mod commands;
mod config;
mod logger;

/// SLO++ interpreter.
///
/// SLO++ is a small scripting language with Slovenian keywords
/// (rezerviraj, konstanta, funkcija, ce, sicer).
///
/// EXAMPLES:
///     slopp run program.slo        Run a program
///     slopp repl                   Start interactive REPL
///     slopp ast program.slo        Print the syntax tree as JSON
///     slopp tokens program.slo     Print the token stream
///
/// ENVIRONMENT VARIABLES:
///     SLOPP_DIAGNOSTICS     Set to 'json' for JSON diagnostics by default
///     SLOPP_NO_HISTORY      Set to disable REPL history
///     SLOPP_HISTORY_FILE    Custom REPL history file
///     SLOPP_LOG             Log level (error, warn, info, debug, trace)
///     SLOPP_MAX_CALL_DEPTH  Function call nesting limit (default 200)
///     NO_COLOR              Set to disable colored output
#[derive(Parser)]
#[command(name = "slopp")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a SLO++ source file
    ///
    /// EXAMPLES:
    ///     slopp run program.slo           Run a program
    ///     slopp run program.slo --json    Output diagnostics as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Path to the SLO++ source file
        file: String,
        /// Output diagnostics in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive REPL
    ///
    /// Each line is evaluated in one persistent global scope. An empty
    /// line or `koncaj` ends the session.
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :reset         Clear all definitions
    ///     :vars          List defined variables
    Repl {
        /// Disable history persistence (for privacy)
        #[arg(long, env = "SLOPP_NO_HISTORY")]
        no_history: bool,
    },

    /// Dump AST to JSON
    ///
    /// EXAMPLES:
    ///     slopp ast program.slo              Print AST
    ///     slopp ast program.slo > ast.json   Save to file
    Ast {
        /// Path to the SLO++ source file
        file: String,
    },

    /// Print the token stream
    Tokens {
        /// Path to the SLO++ source file
        file: String,
        /// Output tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     slopp completions bash > ~/.local/share/bash-completion/completions/slopp
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    let level = logger::level_from(cli.verbose, cli_config.log_level.as_deref());
    if logger::init(level).is_err() {
        eprintln!("warning: logger already initialized");
    }
    if cli_config.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run { file, json } => {
            // Command-line flag overrides environment variable
            let use_json = json || cli_config.default_json;
            commands::run::run(&file, use_json, &cli_config)?;
        }
        Commands::Repl { no_history } => {
            let disable_history = no_history || cli_config.no_history;
            commands::repl::run(disable_history, &cli_config)?;
        }
        Commands::Ast { file } => {
            commands::ast::run(&file)?;
        }
        Commands::Tokens { file, json } => {
            commands::tokens::run(&file, json)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
