//! Declaration parsing implementation
//!
//! This module handles parsing of function definitions and type annotations:
//!
//! - Function definitions: `fn name(a: int, b: ptr<byte>): int`
//! - Parameters: comma-separated `ident : type` pairs
//! - Types: a type name, or `ptr<type>` for a pointer to `type`
//!
//! # Grammar
//!
//! ```text
//! function ::= "fn" ident "(" params ")" ":" type newline body "end"
//! params   ::= (ident ":" type ("," ident ":" type)*)?
//! type     ::= type_name | "ptr" "<" type ">"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition: fn name(params): type \n body end
    pub(crate) fn parse_function_definition(&mut self) -> Result<FunctionDefinition, ParseError> {
        let line = self.expect(TokenKind::Fn)?.line;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::Colon)?;
        let return_type = self.parse_type()?;
        self.expect(TokenKind::Newline)?;

        let body = self.parse_body()?;
        self.expect(TokenKind::End)?;

        Ok(FunctionDefinition {
            name,
            params,
            return_type,
            body,
            line,
        })
    }

    /// Parse parameter list up to (not including) the closing paren
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        while self.check(TokenKind::Ident) {
            let ident = self.expect_identifier()?;
            self.expect(TokenKind::Colon)?;
            let param_type = self.parse_type()?;
            params.push(Param { ident, param_type });

            if !self.check(TokenKind::RParen) {
                self.expect(TokenKind::Comma)?;
            }
        }

        Ok(params)
    }

    /// Parse type: type_name | ptr<type>
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let token = self.expect(TokenKind::Type)?;
        let base = BaseType::from_name(&token.literal).ok_or(ParseError::Expected {
            expected: TokenKind::Type,
            found: token.kind,
            line: token.line,
        })?;

        if base == BaseType::Ptr && self.match_token(TokenKind::Lt) {
            let pointee = self.nested(Self::parse_type)?;
            self.expect(TokenKind::Gt)?;
            return Ok(pointee.with_pointer());
        }

        Ok(Type::new(base))
    }
}
