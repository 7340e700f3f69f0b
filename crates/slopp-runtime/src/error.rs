//! Umbrella error for the whole pipeline

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::span::Span;
use crate::value::RuntimeError;
use std::path::PathBuf;
use thiserror::Error;

/// Any failure from loading, lexing, parsing or evaluating a program
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Location of the failure; dummy for I/O errors
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span(),
            Error::Parse(e) => e.span(),
            Error::Runtime(e) => e.span(),
            Error::Io { .. } => Span::dummy(),
        }
    }
}
