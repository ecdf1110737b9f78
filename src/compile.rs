//! Whole front-end pipeline over one source text

use crate::config::FrontendConfig;
use crate::diagnostics::{write_diagnostics, Diagnostic};
use crate::parser::ast::Program;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::parse_with_config;
use crate::semantic::analyze_with_config;
use std::io::{self, Write};

/// Everything the front end produced for one source text
#[derive(Debug, Clone)]
pub struct Compilation {
    pub source_name: String,
    pub tokens: Vec<Token>,
    /// Annotated program; partial when there were syntax errors
    pub program: Program,
    pub lexical_errors: Vec<Diagnostic>,
    pub syntax_errors: Vec<Diagnostic>,
    pub semantic_errors: Vec<Diagnostic>,
}

impl Compilation {
    /// All diagnostics: lexical, then syntax, then semantic
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lexical_errors
            .iter()
            .chain(&self.syntax_errors)
            .chain(&self.semantic_errors)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().next().is_some()
    }

    /// Write every diagnostic, one per line, prefixed with the source name
    pub fn emit<W: Write>(&self, out: &mut W, colored: bool) -> io::Result<()> {
        write_diagnostics(out, &self.source_name, self.diagnostics(), colored)
    }
}

/// Run the tokenizer, parser and analyzer over `source`.
///
/// Every stage runs regardless of errors in the previous one.
pub fn compile(source_name: &str, source: &str) -> Compilation {
    compile_with_config(source_name, source, &FrontendConfig::default())
}

pub fn compile_with_config(source_name: &str, source: &str, config: &FrontendConfig) -> Compilation {
    let (tokens, lexical_errors) = tokenize(source);
    let (mut program, syntax_errors) = parse_with_config(tokens.clone(), config);
    let semantic_errors = analyze_with_config(&mut program, config);

    Compilation {
        source_name: source_name.to_string(),
        tokens,
        program,
        lexical_errors,
        syntax_errors,
        semantic_errors,
    }
}
