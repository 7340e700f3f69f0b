//! Statement parsing

use crate::ast::*;
use crate::parser::{ParseError, Parser};
use crate::token::TokenKind;
use std::rc::Rc;

impl Parser {
    /// Parse a statement
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::Let | TokenKind::Const => self.parse_var_decl().map(Stmt::VarDecl),
            TokenKind::Fn => self.parse_function_decl().map(Stmt::FunctionDecl),
            TokenKind::If => self.parse_if_stmt().map(Stmt::If),
            _ => {
                let expr = self.parse_expression()?;
                // Trailing semicolon is optional after an expression
                self.match_token(TokenKind::Semicolon);
                Ok(Stmt::Expr(expr))
            }
        }
    }

    /// Parse `rezerviraj name;`, `rezerviraj name = expr;` or `konstanta name = expr;`
    fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let keyword = self.advance();
        let constant = keyword.kind == TokenKind::Const;
        let start = keyword.span;

        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = Identifier::new(name_tok.text.clone(), name_tok.span);

        if self.match_token(TokenKind::Semicolon) {
            if constant {
                return Err(ParseError::ConstWithoutInitializer {
                    name: name.name,
                    span: self.span_from(start),
                });
            }
            return Ok(VarDecl {
                name,
                constant,
                init: None,
                span: self.span_from(start),
            });
        }

        self.expect(TokenKind::Equals)?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(VarDecl {
            name,
            constant,
            init: Some(init),
            span: self.span_from(start),
        })
    }

    /// Parse `funkcija name(a, b) { ... }`
    fn parse_function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        let start = self.advance().span;

        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = Identifier::new(name_tok.text.clone(), name_tok.span);

        // Parameters go through the argument-list parser and are then
        // required to be bare identifiers.
        let params = self
            .parse_args()?
            .into_iter()
            .map(|arg| match arg {
                Expr::Identifier(id) => Ok(id),
                other => Err(ParseError::InvalidParameter { span: other.span() }),
            })
            .collect::<Result<Vec<Identifier>, _>>()?;

        for (i, param) in params.iter().enumerate() {
            if params[..i].iter().any(|earlier| earlier.name == param.name) {
                return Err(ParseError::DuplicateParameter {
                    name: param.name.clone(),
                    span: param.span,
                });
            }
        }

        self.expect(TokenKind::OpenBrace)?;
        let body = self.parse_block()?;

        Ok(FunctionDecl {
            name,
            params,
            body: Rc::from(body),
            span: self.span_from(start),
        })
    }

    /// Parse `ce (test) { ... }` with an optional `sicer` branch
    fn parse_if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.advance().span;

        self.expect(TokenKind::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;

        self.expect(TokenKind::OpenBrace)?;
        let consequent = self.parse_block()?;

        let alternate = if self.match_token(TokenKind::Else) {
            if self.check(TokenKind::If) {
                vec![Stmt::If(self.parse_if_stmt()?)]
            } else {
                self.expect(TokenKind::OpenBrace)?;
                self.parse_block()?
            }
        } else {
            Vec::new()
        };

        Ok(IfStmt {
            test,
            consequent,
            alternate,
            span: self.span_from(start),
        })
    }

    /// Parse statements up to and including the closing `}`.
    /// The opening brace must already be consumed.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::CloseBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::CloseBrace)?;
        Ok(statements)
    }
}
