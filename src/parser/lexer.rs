//! Lexer (tokenizer) for N4 source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Newlines are significant (they terminate statements) and are emitted as
//! tokens. The lexer never fails: unknown characters are reported as lexical
//! [`Diagnostic`]s and skipped, and the stream always ends with one EOF token.
//!
//! Keywords and type names are not recognised while scanning. Every word is
//! scanned as an identifier first and a second pass reclassifies exact matches.

use super::ast::BaseType;
use crate::diagnostics::Diagnostic;
use std::fmt;

/// Starts a comment that runs to the end of the line
pub const COMMENT_CHAR: char = ';';

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Fn,
    If,
    Else,
    While,
    End,
    Return,

    // Names and literals
    Ident,
    Number,
    Type, // literal holds the type name

    // Structure
    LParen,  // (
    RParen,  // )
    Comma,   // ,
    Newline, // \n
    Eof,

    // Operators
    Plus,   // +
    Minus,  // -
    Star,   // * (also dereference)
    Slash,  // /
    Colon,  // :
    Assign, // =
    Lt,     // <
    Gt,     // >
    Le,     // <=
    Ge,     // >=
    Amp,    // & (address-of)
}

impl TokenKind {
    /// Keyword kind for an exact keyword spelling
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "fn" => Some(TokenKind::Fn),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "end" => Some(TokenKind::End),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Tokens that may begin an expression
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Number
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Amp
        )
    }

    /// Tokens that keep a statement body going (blank lines included)
    pub fn starts_statement(self) -> bool {
        self.starts_expression()
            || matches!(
                self,
                TokenKind::If | TokenKind::While | TokenKind::Return | TokenKind::Newline
            )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Fn => "'fn'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::End => "'end'",
            TokenKind::Return => "'return'",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Type => "type name",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Colon => "':'",
            TokenKind::Assign => "'='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Le => "'<='",
            TokenKind::Ge => "'>='",
            TokenKind::Amp => "'&'",
        };
        f.write_str(text)
    }
}

/// A lexical unit. Line is 1-based; the EOF token carries line 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line,
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "", 0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.literal),
            TokenKind::Number => write!(f, "number {}", self.literal),
            TokenKind::Type => write!(f, "type '{}'", self.literal),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer for N4 source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input, returning the tokens and any lexical errors.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while let Some(ch) = self.peek() {
            self.scan(ch);
        }

        resolve_keywords(&mut self.tokens);
        self.tokens.push(Token::eof());

        (self.tokens, self.errors)
    }

    /// Consume at least one character starting at `ch`
    fn scan(&mut self, ch: char) {
        let line = self.line;

        match ch {
            ' ' | '\t' | '\r' => {
                self.advance();
            }

            c if c.is_alphabetic() || c == '_' => {
                let word = self.read_while(|c| c.is_alphanumeric() || c == '_');
                self.push(TokenKind::Ident, word, line);
            }

            c if c.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                self.push(TokenKind::Number, digits, line);
            }

            COMMENT_CHAR => self.skip_comment(),

            '<' | '>' if self.peek_ahead(1) == Some('=') => {
                self.advance();
                self.advance();
                if ch == '<' {
                    self.push(TokenKind::Le, "<=", line);
                } else {
                    self.push(TokenKind::Ge, ">=", line);
                }
            }

            _ => {
                self.advance();
                match single_char_kind(ch) {
                    Some(kind) => self.push(kind, ch.to_string(), line),
                    None => self.errors.push(Diagnostic::lexical(
                        format!("invalid character: {}", shown_char(ch)),
                        line,
                    )),
                }
            }
        }
    }

    fn push(&mut self, kind: TokenKind, literal: impl Into<String>, line: usize) {
        self.tokens.push(Token::new(kind, literal, line));
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    /// Skip a comment, leaving the terminating newline to be tokenized
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }
}

/// The character as written, escaped only when it would not print
fn shown_char(ch: char) -> String {
    if ch.is_control() {
        ch.escape_debug().to_string()
    } else {
        ch.to_string()
    }
}

/// Operators and structural characters that are a single character long
fn single_char_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        ':' => TokenKind::Colon,
        '=' => TokenKind::Assign,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '&' => TokenKind::Amp,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        ',' => TokenKind::Comma,
        '\n' => TokenKind::Newline,
        _ => return None,
    };
    Some(kind)
}

/// Reclassify identifiers that exactly match a keyword or a type name
fn resolve_keywords(tokens: &mut [Token]) {
    for token in tokens.iter_mut().filter(|t| t.kind == TokenKind::Ident) {
        if let Some(kind) = TokenKind::keyword(&token.literal) {
            token.kind = kind;
        } else if BaseType::from_name(&token.literal).is_some() {
            token.kind = TokenKind::Type;
        }
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}
