//! Literal scanning for the lexer

use crate::lexer::{LexError, Lexer};
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal. There are no escape sequences.
    pub(super) fn string(&mut self) -> Result<Token, LexError> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            return Err(LexError::UnterminatedString {
                span: self.current_span(),
            });
        }

        self.advance(); // Closing "
        Ok(self.make_token(TokenKind::String, value))
    }

    /// Scan a number literal: a run of digits and dots.
    ///
    /// Malformed runs such as `1.2.3` are left for the parser to reject.
    pub(super) fn number(&mut self) -> Token {
        let start = self.current - 1;

        while !self.is_at_end() && (self.peek().is_ascii_digit() || self.peek() == '.') {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();
        self.make_token(TokenKind::Number, text)
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        let start = self.current - 1;

        while !self.is_at_end() && self.peek().is_alphabetic() {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);

        self.make_token(kind, text)
    }
}
