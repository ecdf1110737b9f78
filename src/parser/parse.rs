//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, error recovery and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery and coordination
//! - `declarations`: Function definitions, parameters and types
//! - `statements`: Bodies and statements (definitions, `if`, `while`, ...)
//! - `expressions`: Expressions with one function per precedence level
//!
//! # Error Recovery
//!
//! A failing production returns a [`ParseError`] through `?` until it reaches
//! the statement loop of the program or of the enclosing body. There the
//! error is recorded as a syntax [`Diagnostic`] and tokens are discarded up
//! to and including the next newline, `end` or `else`. Parsing then resumes,
//! so every malformed statement costs exactly one diagnostic and the parser
//! always returns a [`Program`].

use crate::config::FrontendConfig;
use crate::diagnostics::Diagnostic;
use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, got {found}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        line: usize,
    },

    #[error("expected an expression, got {found}")]
    ExpectedExpression { found: TokenKind, line: usize },

    #[error("expected a statement")]
    ExpectedStatement { line: usize },

    #[error("invalid lvalue")]
    InvalidLvalue { line: usize },

    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize, line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Expected { line, .. }
            | ParseError::ExpectedExpression { line, .. }
            | ParseError::ExpectedStatement { line }
            | ParseError::InvalidLvalue { line }
            | ParseError::NestingTooDeep { line, .. } => *line,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::syntax(err.to_string(), err.line())
    }
}

/// Recursive descent parser for N4
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
    max_depth: usize,
    errors: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, &FrontendConfig::default())
    }

    pub fn with_config(mut tokens: Vec<Token>, config: &FrontendConfig) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::eof());
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth: config.max_nesting_depth,
            errors: Vec::new(),
        }
    }

    /// Parse the entire program (functions and top-level statements)
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.is_at_end() {
            if self.match_token(TokenKind::Newline) {
                continue;
            }

            let item = if self.check(TokenKind::Fn) {
                self.parse_function_definition().map(Item::Function)
            } else {
                self.parse_statement().map(Item::Statement)
            };

            match item {
                Ok(item) => program.items.push(item),
                Err(err) => self.recover(err),
            }
        }

        program
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    // ===== Recovery =====

    /// Record `err` and skip past the next newline, `end` or `else`
    pub(crate) fn recover(&mut self, err: ParseError) {
        self.errors.push(err.into());

        while !self.is_at_end() {
            let kind = self.advance().kind;
            if matches!(kind, TokenKind::Newline | TokenKind::End | TokenKind::Else) {
                return;
            }
        }
    }

    /// Run `parse` one nesting level deeper, failing once the limit is reached
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                line: self.current_line(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ===== Helper methods =====

    /// Token `ahead` positions past the current one; EOF once past the end
    pub(crate) fn peek(&self, ahead: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + ahead).min(last)]
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.peek(0).kind
    }

    pub(crate) fn current_line(&self) -> usize {
        self.peek(0).line
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token; EOF is never consumed
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
            &self.tokens[self.position - 1]
        } else {
            self.peek(0)
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume a token of `kind` or fail with the kind actually found
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(ParseError::Expected {
                expected: kind,
                found: self.current_kind(),
                line: self.current_line(),
            })
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Primary, ParseError> {
        self.expect(TokenKind::Ident).map(Primary::new)
    }
}

/// Parse a token stream into a program plus its syntax diagnostics.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    parse_with_config(tokens, &FrontendConfig::default())
}

pub fn parse_with_config(tokens: Vec<Token>, config: &FrontendConfig) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::with_config(tokens, config);
    let program = parser.parse_program();
    (program, parser.into_errors())
}
