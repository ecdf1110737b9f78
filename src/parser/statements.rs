//! Statement parsing implementation
//!
//! This module handles parsing of bodies and all N4 statement types:
//!
//! - Definitions: `x : int = 42`
//! - Assignments: `x = 1`, `*p = 2`
//! - Control flow: `if` / `else`, `while`
//! - `return`
//! - Expression statements: `f(x)`
//!
//! # Grammar
//!
//! ```text
//! body      ::= (statement | newline)*
//! statement ::= (definition | assignment | if_stmt | while_stmt
//!               | return_stmt | expr) newline
//! definition ::= ident ":" type "=" expr
//! assignment ::= lvalue "=" expr
//! if_stmt    ::= "if" expr newline body ("else" newline body)? "end"
//! while_stmt ::= "while" expr newline body "end"
//! return_stmt ::= "return" expr
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse statements while the current token can start one.
    ///
    /// Errors inside the body are recovered here, so a body always parses.
    pub(crate) fn parse_body(&mut self) -> Result<Body, ParseError> {
        self.nested(|parser| {
            let mut statements = Vec::new();

            while parser.current_kind().starts_statement() {
                if parser.match_token(TokenKind::Newline) {
                    continue;
                }

                match parser.parse_statement() {
                    Ok(statement) => statements.push(statement),
                    Err(err) => parser.recover(err),
                }
            }

            Ok(Body::new(statements))
        })
    }

    /// Parse a newline-terminated statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.current_kind() {
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Ident | TokenKind::Number | TokenKind::Star
                if self.peek(1).kind == TokenKind::Colon =>
            {
                self.parse_definition()?
            }
            kind if kind.starts_expression() => {
                let expr = self.parse_expression()?;
                if self.check(TokenKind::Assign) {
                    self.parse_assignment(expr)?
                } else {
                    Statement::Expression(expr)
                }
            }
            _ => {
                return Err(ParseError::ExpectedStatement {
                    line: self.current_line(),
                })
            }
        };

        self.expect(TokenKind::Newline)?;
        Ok(statement)
    }

    /// Parse definition: ident : type = expr
    fn parse_definition(&mut self) -> Result<Statement, ParseError> {
        let ident = self.expect_identifier()?;
        let line = ident.line();

        self.expect(TokenKind::Colon)?;
        let declared_type = self.parse_type()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(Statement::Definition {
            ident,
            declared_type,
            value,
            line,
        })
    }

    /// Parse the `= expr` tail of an assignment whose target is `lhs`
    fn parse_assignment(&mut self, lhs: Expr) -> Result<Statement, ParseError> {
        if !lhs.is_lvalue() {
            return Err(ParseError::InvalidLvalue {
                line: self.current_line(),
            });
        }

        self.expect(TokenKind::Assign)?;
        let rhs = self.parse_expression()?;

        Ok(Statement::Assignment {
            line: lhs.line(),
            lhs,
            rhs,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.expect(TokenKind::If)?.line;

        let condition = self.parse_expression()?;
        self.expect(TokenKind::Newline)?;
        let true_body = self.parse_body()?;

        let false_body = if self.match_token(TokenKind::Else) {
            self.expect(TokenKind::Newline)?;
            Some(self.parse_body()?)
        } else {
            None
        };

        self.expect(TokenKind::End)?;

        Ok(Statement::If {
            condition,
            true_body,
            false_body,
            line,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.expect(TokenKind::While)?.line;

        let condition = self.parse_expression()?;
        self.expect(TokenKind::Newline)?;
        let body = self.parse_body()?;
        self.expect(TokenKind::End)?;

        Ok(Statement::While {
            condition,
            body,
            line,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.expect(TokenKind::Return)?.line;
        let expr = self.parse_expression()?;
        Ok(Statement::Return { expr, line })
    }
}
