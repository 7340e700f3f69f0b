//! Parsing (tokens to AST)
//!
//! Recursive descent with one token of lookahead. Statements are handled in
//! `stmt.rs` and the expression precedence ladder in `expr.rs`. Parsing stops
//! at the first error; there is no recovery.

mod expr;
mod stmt;

use crate::ast::Program;
use crate::lexer::{self, LexError, EOF_TEXT};
use crate::span::Span;
use crate::token::{Token, TokenKind};
use thiserror::Error;

/// Syntax errors (lexical errors are folded in so `parse` has one error type)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Expected {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("Unexpected {found} '{text}' where an expression was expected")]
    ExpectedExpression {
        found: TokenKind,
        text: String,
        span: Span,
    },

    #[error("Function parameters must be plain identifiers")]
    InvalidParameter { span: Span },

    #[error("Duplicate parameter '{name}'")]
    DuplicateParameter { name: String, span: Span },

    #[error("Expected identifier after '.', found {found}")]
    InvalidMemberAccess { found: TokenKind, span: Span },

    #[error("Constant '{name}' must be initialized")]
    ConstWithoutInitializer { name: String, span: Span },

    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::InvalidParameter { span }
            | ParseError::DuplicateParameter { span, .. }
            | ParseError::InvalidMemberAccess { span, .. }
            | ParseError::ConstWithoutInitializer { span, .. }
            | ParseError::InvalidNumber { span, .. } => *span,
        }
    }
}

/// Tokenize and parse a complete source unit
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = lexer::tokenize(source)?;
    Parser::new(tokens).parse()
}

/// Parser state for building AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
}

impl Parser {
    /// Create a new parser for the given tokens
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfFile) {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::EndOfFile, EOF_TEXT, span));
        }
        Self { tokens, current: 0 }
    }

    /// Parse tokens into a program
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        log::debug!(target: "slopp::parser", "parsed {} top-level statements", body.len());
        Ok(Program { body })
    }

    // === Helper methods ===

    /// Advance to next token and return the consumed one
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Last consumed token
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Match and consume token if it matches
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail naming both kinds
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            Err(ParseError::UnexpectedToken {
                expected: kind,
                found: found.kind,
                span: found.span,
            })
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    /// Span from `start` through the last consumed token
    pub(super) fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous().span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> Program {
        parse(source).unwrap()
    }

    #[test]
    fn test_parse_empty_program() {
        assert_eq!(parse_source("").body.len(), 0);
        assert_eq!(parse_source("  \n\t").body.len(), 0);
    }

    #[test]
    fn test_parser_appends_missing_eof() {
        let tokens = vec![Token::new(TokenKind::Number, "7", Span::new(0, 1, 1, 1))];
        let program = Parser::new(tokens).parse().unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parser_accepts_empty_token_list() {
        let program = Parser::new(Vec::new()).parse().unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_lex_error_surfaces_through_parse() {
        let err = parse("x = \"abc").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_expect_names_both_kinds() {
        let err = parse("ce (x { 1 }").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::CloseParen,
                found: TokenKind::OpenBrace,
                span: Span::new(6, 7, 1, 7),
            }
        );
        assert_eq!(err.to_string(), "Expected ')', found '{'");
    }

    #[test]
    fn test_multiple_statements() {
        let program = parse_source("rezerviraj a = 1; rezerviraj b = 2; a + b");
        assert_eq!(program.body.len(), 3);
        assert!(matches!(program.body[2], Stmt::Expr(Expr::Binary(_))));
    }
}
