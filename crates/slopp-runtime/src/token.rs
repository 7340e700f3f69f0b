//! Token types for lexical analysis
//!
//! Defines every token kind recognized by the SLO++ lexer, plus the keyword
//! table that maps Slovenian keyword spellings onto those kinds.

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Literal text. For strings this excludes the quotes.
    pub text: String,
    /// Source location
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals
    /// Number literal (42, 3.14)
    Number,
    /// Identifier
    Identifier,
    /// String literal ("zdravo")
    String,

    // Keywords
    /// `rezerviraj` (variable declaration)
    Let,
    /// `konstanta` (constant declaration)
    Const,
    /// `funkcija` (function declaration)
    Fn,
    /// `ce`
    If,
    /// `sicer`
    Else,

    // Punctuation
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,

    // Operators
    /// One of `+ - * / %`
    BinaryOperator,
    /// `=`
    Equals,
    /// `!`
    Bang,
    /// `!=`
    BangEquals,
    /// `==`
    EqualEquals,
    /// `<`
    Less,
    /// `<=`
    LessEquals,
    /// `>`
    Greater,
    /// `>=`
    GreaterEquals,

    /// End of input
    EndOfFile,
}

impl TokenKind {
    /// Look up a keyword spelling
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "rezerviraj" => Some(TokenKind::Let),
            "konstanta" => Some(TokenKind::Const),
            "funkcija" => Some(TokenKind::Fn),
            "ce" => Some(TokenKind::If),
            "sicer" => Some(TokenKind::Else),
            _ => None,
        }
    }

    /// Human-readable name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Let => "'rezerviraj'",
            TokenKind::Const => "'konstanta'",
            TokenKind::Fn => "'funkcija'",
            TokenKind::If => "'ce'",
            TokenKind::Else => "'sicer'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::BinaryOperator => "operator",
            TokenKind::Equals => "'='",
            TokenKind::Bang => "'!'",
            TokenKind::BangEquals => "'!='",
            TokenKind::EqualEquals => "'=='",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEquals => "'>='",
            TokenKind::EndOfFile => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
