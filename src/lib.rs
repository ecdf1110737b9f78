//! # Introduction
//!
//! `n4c` is the front end of N4, a small statically-typed procedural
//! language. It tokenizes source text, parses it into an AST with error
//! recovery, and binds every identifier to its declared type.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic analyzer → Annotated AST
//! ```
//!
//! 1. [`parser::lexer`] — splits source into tokens, reporting invalid
//!    characters.
//! 2. [`parser`] — recursive descent with one production per precedence
//!    level; a malformed statement costs one diagnostic and is skipped.
//! 3. [`semantic`] — post-order walk over a scope stack; reports
//!    use-before-definition and redefinition once per name.
//! 4. [`compile()`] — runs all three and collects the results in a
//!    [`Compilation`].
//!
//! No stage aborts. Each keeps its own list of [`diagnostics::Diagnostic`]s.
//!
//! ## The language
//!
//! ```text
//! fn add(a: int, b: int): long
//!   return a + b      ; comments run to end of line
//! end
//!
//! total : long = add(1, 2)
//! if total > 2
//!   p : ptr<long> = &total
//!   *p = 0
//! end
//! ```

pub mod compile;
pub mod config;
pub mod diagnostics;
pub mod parser;
pub mod semantic;

pub use compile::{compile, compile_with_config, Compilation};
pub use config::FrontendConfig;
pub use diagnostics::{Diagnostic, Stage};
