//! N4 source code parser
//!
//! This module transforms N4 source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, recovery and entry points (tokens → AST)
//! - [`ast`]: AST node and type definitions
//!
//! # Language
//!
//! - Types: `void`, `byte`/`ubyte`, `short`/`ushort`, `int`/`uint`, `ptr`,
//!   `long`/`ulong`, and `ptr<T>` pointers
//! - Statements: definitions, assignments, `if`/`else`, `while`, `return`,
//!   bare expressions
//! - Expressions: comparison, arithmetic, unary `-` `*` `&`, calls
//! - Newlines terminate statements; `;` starts a comment
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one function per precedence
//! level. No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use lexer::tokenize;
pub use parse::{parse, parse_with_config, ParseError, Parser};
