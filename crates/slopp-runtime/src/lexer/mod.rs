//! Lexical analysis (tokenization)
//!
//! The lexer converts SLO++ source code into a flat stream of tokens,
//! always terminated by exactly one `EndOfFile` token. It stops at the
//! first lexical error.

use crate::span::Span;
use crate::token::{Token, TokenKind};
use thiserror::Error;

mod literals;

/// Text carried by the end-of-input token
pub const EOF_TEXT: &str = "EndOfFile";

/// Lexical errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("Unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } | LexError::UnterminatedString { span } => {
                *span
            }
        }
    }
}

/// Tokenize `source` in one call
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Current position in chars
    pub(super) current: usize,
    /// Current line number (1-indexed)
    pub(super) line: u32,
    /// Current column number (1-indexed)
    pub(super) column: u32,
    /// Start position of current token
    pub(super) start_pos: usize,
    /// Start line of current token
    pub(super) start_line: u32,
    /// Start column of current token
    pub(super) start_column: u32,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        log::debug!(target: "slopp::lexer", "produced {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Scan the next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        self.start_pos = self.current;
        self.start_line = self.line;
        self.start_column = self.column;

        if self.is_at_end() {
            return Ok(self.make_token(TokenKind::EndOfFile, EOF_TEXT));
        }

        let c = self.advance();

        let token = match c {
            // Grouping punctuation
            '(' => self.make_token(TokenKind::OpenParen, "("),
            ')' => self.make_token(TokenKind::CloseParen, ")"),
            '{' => self.make_token(TokenKind::OpenBrace, "{"),
            '}' => self.make_token(TokenKind::CloseBrace, "}"),
            '[' => self.make_token(TokenKind::OpenBracket, "["),
            ']' => self.make_token(TokenKind::CloseBracket, "]"),
            ',' => self.make_token(TokenKind::Comma, ","),
            '.' => self.make_token(TokenKind::Dot, "."),
            ':' => self.make_token(TokenKind::Colon, ":"),
            ';' => self.make_token(TokenKind::Semicolon, ";"),

            // Arithmetic is always a single character
            '+' | '-' | '*' | '/' | '%' => {
                self.make_token(TokenKind::BinaryOperator, c.to_string())
            }

            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqualEquals, "==")
                } else {
                    self.make_token(TokenKind::Equals, "=")
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::BangEquals, "!=")
                } else {
                    self.make_token(TokenKind::Bang, "!")
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LessEquals, "<=")
                } else {
                    self.make_token(TokenKind::Less, "<")
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GreaterEquals, ">=")
                } else {
                    self.make_token(TokenKind::Greater, ">")
                }
            }

            '"' => self.string()?,

            c if c.is_ascii_digit() => self.number(),

            c if c.is_alphabetic() => self.identifier(),

            _ => {
                return Err(LexError::UnexpectedCharacter {
                    ch: c,
                    span: self.current_span(),
                })
            }
        };

        Ok(token)
    }

    /// Discard space, tab, newline, carriage return and NUL
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' | '\0' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                _ => return,
            }
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    /// Span from the start of the current token to the cursor
    pub(super) fn current_span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current.max(self.start_pos + 1),
            self.start_line,
            self.start_column,
        )
    }

    pub(super) fn make_token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        let span = Span::new(
            self.start_pos,
            self.current,
            self.start_line,
            self.start_column,
        );
        Token::new(kind, text, span)
    }
}
