//! Semantic analysis of parsed N4 programs
//!
//! - [`scope`]: the lexical scope stack (name → type)
//! - [`analyzer`]: the post-order walk that binds identifiers to types
//!
//! The analyzer never fails. It annotates every resolved identifier
//! [`Primary`](crate::parser::ast::Primary) with its declared type and reports
//! use-before-definition and redefinition, at most once per name.

pub mod analyzer;
pub mod scope;

pub use analyzer::{analyze, analyze_with_config, SemanticAnalyzer};
pub use scope::ScopeStack;
