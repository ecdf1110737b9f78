//! Diagnostic records shared by every front-end pass
//!
//! Each pass owns an append-only list of [`Diagnostic`]s and always runs to
//! completion, so a single compilation can surface lexical, syntax and
//! semantic problems together. Rendering follows the usual
//! `<source-name>:<line>: <stage> error: <message>` layout.

use crossterm::style::Stylize;
use std::fmt;
use std::io::{self, Write};

/// Pipeline stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Lexical => "lexical",
            Stage::Syntax => "syntax",
            Stage::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single reported problem. Line 0 means the location is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub line: usize,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>, line: usize) -> Self {
        Diagnostic {
            stage,
            message: message.into(),
            line,
        }
    }

    pub fn lexical(message: impl Into<String>, line: usize) -> Self {
        Self::new(Stage::Lexical, message, line)
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(Stage::Syntax, message, line)
    }

    pub fn semantic(message: impl Into<String>, line: usize) -> Self {
        Self::new(Stage::Semantic, message, line)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} error: {}", self.line, self.stage, self.message)
    }
}

/// Format one diagnostic as `<source-name>:<line>: <stage> error: <message>`.
pub fn render(source_name: &str, diagnostic: &Diagnostic) -> String {
    format!("{}:{}", source_name, diagnostic)
}

/// Write diagnostics one per line, in the order given.
///
/// With `colored` set the `<stage> error:` label is emitted bold red using
/// ANSI escapes; the rest of the line is identical to [`render`].
pub fn write_diagnostics<'a, W, I>(
    out: &mut W,
    source_name: &str,
    diagnostics: I,
    colored: bool,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Diagnostic>,
{
    for diagnostic in diagnostics {
        if colored {
            let label = format!("{} error:", diagnostic.stage);
            writeln!(
                out,
                "{}:{}: {} {}",
                source_name,
                diagnostic.line,
                label.red().bold(),
                diagnostic.message
            )?;
        } else {
            writeln!(out, "{}", render(source_name, diagnostic))?;
        }
    }
    Ok(())
}
