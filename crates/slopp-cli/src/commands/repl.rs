//! REPL command implementation

use super::format_diagnostic;
use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use slopp_runtime::repl::{banner, is_exit_command, PROMPT};
use slopp_runtime::{Output, ReplBinding, ReplCore};

/// What the loop should do with one line of input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Help,
    Reset,
    Vars,
    Eval(&'a str),
}

fn classify(line: &str) -> Command<'_> {
    if is_exit_command(line) {
        return Command::Exit;
    }
    match line.trim() {
        ":help" | ":h" => Command::Help,
        ":reset" => Command::Reset,
        ":vars" | ":v" => Command::Vars,
        _ => Command::Eval(line),
    }
}

/// Run the interactive REPL
///
/// If `no_history` is true, history is neither loaded nor saved.
pub fn run(no_history: bool, config: &Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::with_config(Output::Stdout, config.runtime_options());

    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            // Missing history file on first run
            let _ = rl.load_history(path);
        }
    }

    println!("{}", banner());

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match classify(&line) {
                Command::Exit => {
                    println!("Nasvidenje");
                    break;
                }
                Command::Help => print_help(),
                Command::Reset => {
                    repl.reset();
                    println!("REPL state reset");
                }
                Command::Vars => print_vars(&repl.variables()),
                Command::Eval(source) => {
                    let _ = rl.add_history_entry(source);
                    let result = repl.eval_line(source);
                    for diag in &result.diagnostics {
                        eprint!("{}", format_diagnostic(diag));
                    }
                    if let Some(value) = result.value {
                        println!("{}", value);
                    }
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                println!("Use koncaj or an empty line to exit");
            }
            Err(ReadlineError::Eof) => {
                println!("Nasvidenje");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if !no_history {
        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = rl.save_history(&path) {
                log::warn!(target: "slopp::cli", "could not save history: {}", e);
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("SLO++ REPL Commands:");
    println!("  koncaj            Exit the REPL (an empty line also exits)");
    println!("  :reset            Clear all variables and functions");
    println!("  :vars, :v         List defined variables");
    println!("  :help, :h         Show this help message");
    println!();
    println!("Examples:");
    println!("  >>> rezerviraj x = 42;");
    println!("  >>> funkcija podvoji(n) {{ n * 2 }}");
    println!("  >>> izpisi(podvoji(x))");
}

fn format_binding(binding: &ReplBinding) -> String {
    let keyword = if binding.constant {
        "konstanta"
    } else {
        "rezerviraj"
    };
    format!("{} {} = {}", keyword.dimmed(), binding.name.bold(), binding.value)
}

fn print_vars(bindings: &[ReplBinding]) {
    if bindings.is_empty() {
        println!("No variables defined");
        return;
    }
    for binding in bindings {
        println!("{}", format_binding(binding));
    }
}
