//! Token dump command

use super::{read_source, report};
use anyhow::Result;
use slopp_runtime::{Diagnostic, Error, Token};

/// One `Kind 'text'` line per token
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:?} '{}'\n", t.kind, t.text))
        .collect()
}

/// Tokenize the file and print the stream
pub fn run(file_path: &str, json: bool) -> Result<()> {
    let source = read_source(file_path, json)?;

    let tokens = match slopp_runtime::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            let diag = Diagnostic::from_error(&Error::from(e), &source).with_file(file_path);
            report(&diag, json);
            return Err(anyhow::anyhow!("Lexer errors"));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print!("{}", format_tokens(&tokens));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens() {
        let tokens = slopp_runtime::tokenize("rezerviraj x = 1;").unwrap();
        assert_eq!(
            format_tokens(&tokens),
            "Let 'rezerviraj'\n\
             Identifier 'x'\n\
             Equals '='\n\
             Number '1'\n\
             Semicolon ';'\n\
             EndOfFile 'EndOfFile'\n"
        );
    }
}
