//! Expression parsing
//!
//! Precedence, lowest first:
//! assignment, object literal, additive and comparison (one tier),
//! multiplicative, call, member, primary.

use crate::ast::*;
use crate::parser::{ParseError, Parser};
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Right-associative `target = value`
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_object_or_additive()?;

        if self.match_token(TokenKind::Equals) {
            let value = self.parse_assignment()?;
            let span = target.span().merge(value.span());
            return Ok(Expr::Assign(AssignExpr {
                target: Box::new(target),
                value: Box::new(value),
                span,
            }));
        }

        Ok(target)
    }

    /// Object literal when the current token is `{`, additive otherwise
    fn parse_object_or_additive(&mut self) -> Result<Expr, ParseError> {
        if !self.check(TokenKind::OpenBrace) {
            return self.parse_additive();
        }

        let start = self.advance().span;
        let mut properties = Vec::new();

        while !self.check(TokenKind::CloseBrace) && !self.is_at_end() {
            let key_tok = self.expect(TokenKind::Identifier)?;
            let key = Identifier::new(key_tok.text.clone(), key_tok.span);

            // Shorthand: `{ a, b }` or `{ a }`
            if self.match_token(TokenKind::Comma) {
                let span = key.span;
                properties.push(Property {
                    key,
                    value: None,
                    span,
                });
                continue;
            }
            if self.check(TokenKind::CloseBrace) {
                let span = key.span;
                properties.push(Property {
                    key,
                    value: None,
                    span,
                });
                continue;
            }

            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression()?;
            let span = key.span.merge(value.span());
            properties.push(Property {
                key,
                value: Some(value),
                span,
            });

            if !self.check(TokenKind::CloseBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }

        self.expect(TokenKind::CloseBrace)?;

        Ok(Expr::Object(ObjectLiteral {
            properties,
            span: self.span_from(start),
        }))
    }

    /// `+ - == != < <= > >=`, left-associative
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.additive_operator() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// `* / %`, left-associative
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_call_member()?;

        while let Some(op) = self.multiplicative_operator() {
            self.advance();
            let right = self.parse_call_member()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn additive_operator(&self) -> Option<BinaryOp> {
        let token = self.peek();
        match token.kind {
            TokenKind::BinaryOperator => match BinaryOp::from_symbol(&token.text)? {
                op @ (BinaryOp::Add | BinaryOp::Sub) => Some(op),
                _ => None,
            },
            TokenKind::EqualEquals
            | TokenKind::BangEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals => BinaryOp::from_symbol(&token.text),
            _ => None,
        }
    }

    fn multiplicative_operator(&self) -> Option<BinaryOp> {
        let token = self.peek();
        if token.kind != TokenKind::BinaryOperator {
            return None;
        }
        match BinaryOp::from_symbol(&token.text)? {
            op @ (BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod) => Some(op),
            _ => None,
        }
    }

    /// A member chain followed by any number of call suffixes: `f(a)(b)`
    fn parse_call_member(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_member()?;

        while self.check(TokenKind::OpenParen) {
            let args = self.parse_args()?;
            let span = self.span_from(expr.span());
            expr = Expr::Call(CallExpr {
                callee: Box::new(expr),
                args,
                span,
            });
        }

        Ok(expr)
    }

    /// Parenthesized, comma-separated argument list
    pub(super) fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::OpenParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::CloseParen) {
            args.push(self.parse_assignment()?);
            while self.match_token(TokenKind::Comma) {
                args.push(self.parse_assignment()?);
            }
        }

        self.expect(TokenKind::CloseParen)?;
        Ok(args)
    }

    /// Primary followed by `.name` and `[expr]` accesses
    fn parse_member(&mut self) -> Result<Expr, ParseError> {
        let mut object = self.parse_primary()?;

        loop {
            let property = if self.match_token(TokenKind::Dot) {
                let token = self.peek();
                if token.kind != TokenKind::Identifier {
                    return Err(ParseError::InvalidMemberAccess {
                        found: token.kind,
                        span: token.span,
                    });
                }
                let token = self.advance();
                MemberProperty::Named(Identifier::new(token.text.clone(), token.span))
            } else if self.match_token(TokenKind::OpenBracket) {
                let key = self.parse_expression()?;
                self.expect(TokenKind::CloseBracket)?;
                MemberProperty::Computed(Box::new(key))
            } else {
                break;
            };

            let span = self.span_from(object.span());
            object = Expr::Member(MemberExpr {
                object: Box::new(object),
                property,
                span,
            });
        }

        Ok(object)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier(Identifier::new(token.text, token.span)))
            }
            TokenKind::Number => {
                self.advance();
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        text: token.text.clone(),
                        span: token.span,
                    })?;
                Ok(Expr::Literal(Literal::Number(value), token.span))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(Literal::String(token.text), token.span))
            }
            TokenKind::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            found => Err(ParseError::ExpectedExpression {
                found,
                text: token.text,
                span: token.span,
            }),
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span().merge(right.span());
    Expr::Binary(BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}
