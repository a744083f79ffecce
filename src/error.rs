use std::fmt::{self, Display};

use crate::object::Object;
use crate::token::{Token, Type};

/// Collects the errors reported by the pipeline stages.
///
/// Each stage reports its errors here as it finds them; the driver checks the
/// flags between stages and skips the rest of the pipeline once a static
/// error was recorded. Unlike errors, warnings do not suppress evaluation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Reports a static (scan, parse or resolve) error.
    pub fn error(&mut self, error: &dyn Display) {
        eprintln!("{error}");
        self.had_error = true;
    }

    /// Reports a warning without setting the error flag.
    pub fn warning(&mut self, warning: &dyn Display) {
        eprintln!("{warning}");
    }

    /// Reports an error that aborted evaluation.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{error}");
        self.had_runtime_error = true;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the flags between prompt lines.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// Writes the `[line N] Error at ...` form shared by parse and resolve errors.
fn write_at_token(f: &mut fmt::Formatter, token: &Token, message: &str) -> fmt::Result {
    if token.r#type == Type::EOF {
        write!(f, "[line {line}] Error at the end: {message}", line = token.line)
    } else {
        write!(
            f,
            "[line {line}] Error at '{lexeme}': {message}",
            line = token.line,
            lexeme = token.lexeme,
        )
    }
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line {line}] Error: {message}", line = self.line, message = self.message)
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_at_token(f, &self.token, &self.message)
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_at_token(f, &self.token, &self.message)
    }
}

/// Represents a soft diagnostic from resolution, such as an unused variable.
#[derive(Debug)]
pub struct ResolveWarning {
    pub token: Token,
    pub message: String,
}

impl Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {line}] Warning at '{lexeme}': {message}",
            line = self.token.line,
            lexeme = self.token.lexeme,
            message = self.message,
        )
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{lexeme}: {message}\n[line {line}]",
            lexeme = self.token.lexeme,
            message = self.message,
            line = self.token.line,
        )
    }
}

/// Non-local exits that travel up the execution stack.
///
/// A `return` statement unwinds to the nearest function call, which consumes
/// the carried value. A runtime error unwinds all the way to the driver.
/// Only `Function::call` is allowed to catch the `Return` variant.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
