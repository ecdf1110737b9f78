//! Expression parsing implementation
//!
//! This module handles parsing of N4 expressions using one function per
//! precedence level, each looping over its operators so that binary operators
//! associate to the left.
//!
//! # Precedence (lowest to highest)
//!
//! 1. Comparison: `<` `>` `<=` `>=`
//! 2. Additive: `+` `-`
//! 3. Multiplicative: `*` `/`
//! 4. Unary prefix: `-` (negate), `*` (dereference), `&` (address-of)
//! 5. Primary: identifier, number, `( expr )`, call `name(args)`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_comparison)
    }

    /// Parse comparison (< > <= >=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while self.current_kind().is_comparison() {
            let op = self.advance().clone();
            let right = self.parse_additive()?;
            left = Expr::Binary {
                line: left.line(),
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while matches!(self.current_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance().clone();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                line: left.line(),
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while matches!(self.current_kind(), TokenKind::Star | TokenKind::Slash) {
            let op = self.advance().clone();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                line: left.line(),
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse unary prefix (- * &)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(
            self.current_kind(),
            TokenKind::Minus | TokenKind::Star | TokenKind::Amp
        ) {
            let op = self.advance().clone();
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::Unary {
                line: op.line,
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parse primary: identifier, number, call or parenthesized expression
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_kind() {
            TokenKind::Ident if self.peek(1).kind == TokenKind::LParen => self.parse_call(),
            TokenKind::Ident | TokenKind::Number => {
                Ok(Expr::Primary(Primary::new(self.advance().clone())))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            found => Err(ParseError::ExpectedExpression {
                found,
                line: self.current_line(),
            }),
        }
    }

    /// Parse call: name(arg, arg, ...)
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let callee = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        while self.current_kind().starts_expression() {
            args.push(self.parse_expression()?);
            if !self.check(TokenKind::RParen) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(Expr::Call {
            line: callee.line(),
            callee,
            args,
        })
    }
}
