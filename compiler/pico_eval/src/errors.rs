//! Compile errors and the umbrella error returned by `Runtime::evaluate`.

use std::fmt;

use pico_ir::{LineIndex, Span};
use pico_parse::ParseError;
use pico_value::{HostSignal, RuntimeError};
use thiserror::Error;

/// A syntax tree node the compiler cannot turn into code.
///
/// Compilation stops at the first such node; nothing from the chunk runs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    /// Kind of the offending node, e.g. `"goto statement"`.
    pub node: &'static str,
    pub span: Span,
}

impl CompileError {
    pub fn new(message: impl Into<String>, node: &'static str, span: Span) -> Self {
        CompileError {
            message: message.into(),
            node,
            span,
        }
    }
}

/// Any failure from `evaluate`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Source location, for parse and compile errors.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Parse(err) => Some(err.span),
            Error::Compile(err) => Some(err.span),
            Error::Runtime(_) => None,
        }
    }

    /// The host signal carried by a runtime error, if any.
    pub fn signal(&self) -> Option<HostSignal> {
        match self {
            Error::Runtime(err) => err.signal(),
            _ => None,
        }
    }

    /// Render with a `line:col` prefix when the error has a location.
    pub fn display_with<'a>(&'a self, index: &'a LineIndex) -> impl fmt::Display + 'a {
        Located { error: self, index }
    }
}

struct Located<'a> {
    error: &'a Error,
    index: &'a LineIndex,
}

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error.span() {
            Some(span) => {
                let (line, col) = self.index.line_col(span.start);
                write!(f, "{line}:{col}: {}", self.error)
            }
            None => write!(f, "{}", self.error),
        }
    }
}
